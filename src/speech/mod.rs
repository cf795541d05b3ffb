//! Speech collaborators
//!
//! Narrow async contracts for the external speech services. Request
//! handling depends only on these traits and on the success/failure of
//! each call, never on a vendor SDK's object model.

mod azure;

pub use azure::{AzureLanguageDetector, AzureSpeechClient};

use futures_util::future::BoxFuture;
use hyper::body::Bytes;
use thiserror::Error;

/// Errors raised by the speech collaborators
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// No subscription key configured.
    #[error("speech service key is not configured")]
    MissingKey,

    /// Request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Synthesis succeeded but produced no audio.
    #[error("service returned no audio")]
    EmptyAudio,

    /// Response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Result of a language detection call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLanguage {
    /// BCP-47 language code, e.g. `en` or `pt-BR`
    pub code: String,
    /// Human readable name, e.g. `English`
    pub display_name: String,
}

/// Text-to-speech capability
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` with `voice`, returning encoded MP3 audio
    fn synthesize<'a>(
        &'a self,
        text: &'a str,
        voice: &'a str,
    ) -> BoxFuture<'a, Result<Bytes, CollaboratorError>>;
}

/// Language detection capability
pub trait LanguageDetector: Send + Sync {
    fn detect_language<'a>(
        &'a self,
        text: &'a str,
    ) -> BoxFuture<'a, Result<DetectedLanguage, CollaboratorError>>;
}

/// English display name for a language code
///
/// Unknown codes are echoed back unchanged.
pub fn language_display_name(code: &str) -> String {
    let primary = code.split('-').next().unwrap_or(code);
    let name = match primary {
        "ar" => "Arabic",
        "da" => "Danish",
        "de" => "German",
        "en" => "English",
        "es" => "Spanish",
        "et" => "Estonian",
        "fi" => "Finnish",
        "fr" => "French",
        "it" => "Italian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "nb" | "no" => "Norwegian",
        "nl" => "Dutch",
        "pl" => "Polish",
        "pt" => "Portuguese",
        "ru" => "Russian",
        "sv" => "Swedish",
        "uk" => "Ukrainian",
        "zh" | "zh-Hans" | "zh-Hant" => "Chinese",
        _ => return code.to_string(),
    };
    name.to_string()
}

//! Azure Cognitive Services clients
//!
//! Synthesis goes through the Speech REST endpoint with SSML input,
//! detection through the Translator `detect` endpoint.

use super::{
    language_display_name, CollaboratorError, DetectedLanguage, LanguageDetector,
    SpeechSynthesizer,
};
use crate::config::SpeechConfig;
use crate::logger;
use futures_util::future::BoxFuture;
use hyper::body::Bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Text-to-speech client
pub struct AzureSpeechClient {
    client: reqwest::Client,
    key: Option<String>,
    endpoint: String,
    output_format: String,
}

impl AzureSpeechClient {
    pub fn new(config: &SpeechConfig) -> Result<Self, CollaboratorError> {
        Ok(Self {
            client: build_client(config.request_timeout)?,
            key: config.key.clone(),
            endpoint: format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                config.region
            ),
            output_format: config.output_format.clone(),
        })
    }

    async fn speak(&self, text: &str, voice: &str) -> Result<Bytes, CollaboratorError> {
        let key = self.key.as_deref().ok_or(CollaboratorError::MissingKey)?;
        logger::log_info(&format!("[TTS] Synthesizing speech for text: {text}"));

        let response = self
            .client
            .post(&self.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .body(build_ssml(text, voice))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(CollaboratorError::EmptyAudio);
        }
        Ok(audio)
    }
}

impl SpeechSynthesizer for AzureSpeechClient {
    fn synthesize<'a>(
        &'a self,
        text: &'a str,
        voice: &'a str,
    ) -> BoxFuture<'a, Result<Bytes, CollaboratorError>> {
        Box::pin(self.speak(text, voice))
    }
}

/// Language detection client
pub struct AzureLanguageDetector {
    client: reqwest::Client,
    key: Option<String>,
    region: String,
    endpoint: String,
}

#[derive(Serialize)]
struct DetectInput<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

#[derive(Deserialize)]
struct DetectOutput {
    language: String,
}

impl AzureLanguageDetector {
    pub fn new(config: &SpeechConfig) -> Result<Self, CollaboratorError> {
        Ok(Self {
            client: build_client(config.request_timeout)?,
            key: config.key.clone(),
            region: config.region.clone(),
            endpoint: format!(
                "{}/detect?api-version=3.0",
                config.translator_endpoint.trim_end_matches('/')
            ),
        })
    }

    async fn detect(&self, text: &str) -> Result<DetectedLanguage, CollaboratorError> {
        let key = self.key.as_deref().ok_or(CollaboratorError::MissingKey)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .json(&[DetectInput { text }])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let results: Vec<DetectOutput> = response.json().await?;
        let code = results
            .into_iter()
            .next()
            .map(|r| r.language)
            .ok_or_else(|| CollaboratorError::Decode("empty detection result".to_string()))?;

        Ok(DetectedLanguage {
            display_name: language_display_name(&code),
            code,
        })
    }
}

impl LanguageDetector for AzureLanguageDetector {
    fn detect_language<'a>(
        &'a self,
        text: &'a str,
    ) -> BoxFuture<'a, Result<DetectedLanguage, CollaboratorError>> {
        Box::pin(self.detect(text))
    }
}

fn build_client(timeout_secs: u64) -> Result<reqwest::Client, CollaboratorError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Wrap text in a single-voice SSML document
fn build_ssml(text: &str, voice: &str) -> String {
    // "fi-FI-NooraNeural" -> "fi-FI"
    let lang = voice.rsplit_once('-').map_or("en-US", |(locale, _)| locale);
    format!(
        "<speak version='1.0' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
        escape_xml(lang),
        escape_xml(voice),
        escape_xml(text)
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

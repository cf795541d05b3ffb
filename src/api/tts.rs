//! GET /api/tts
//!
//! Synthesizes `text` with the `voice` parameter, or with the voice
//! configured for the detected language of the text.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::collections::HashMap;

use crate::config::AppState;
use crate::error::HttpError;
use crate::http::{self, cache::CachePolicy};

const AUDIO_MPEG: &str = "audio/mpeg";

pub async fn handle_tts(
    params: &HashMap<String, String>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HttpError> {
    let text = non_empty(params, "text")
        .ok_or_else(|| HttpError::BadRequest("missing 'text' query parameter".to_string()))?;

    let voice = match non_empty(params, "voice") {
        Some(voice) => voice.to_string(),
        None => {
            let language = state
                .detector
                .detect_language(text)
                .await
                .map_err(|e| HttpError::Internal(format!("Language detection failed: {e}")))?;
            state.config.speech.voice_for(&language.code).to_string()
        }
    };

    let audio = state
        .synthesizer
        .synthesize(text, &voice)
        .await
        .map_err(|e| HttpError::Internal(format!("Speech synthesis failed: {e}")))?;

    Ok(http::build_body_response(
        AUDIO_MPEG,
        &CachePolicy::NoStore.to_header_value(),
        audio,
    ))
}

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
///
/// Immutable after start-up; shared as `Arc<Config>`.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub speech: SpeechConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Static site and API behaviour toggles
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Root directory for static assets
    pub public_dir: String,
    /// Fallback page served with 404, relative to `public_dir`
    pub not_found_page: String,
    /// Path prefix that separates API traffic from static assets
    pub api_prefix: String,
    /// Serve `.min.js` / `.min.css` variants
    pub production: bool,
    /// Emit `ETag` / `Cache-Control` and answer conditional requests
    pub enable_caching: bool,
    /// `max-age` for `Cache-Control`, in seconds
    pub cache_max_age: u32,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    /// Redirect requests forwarded as plain http to https
    pub redirect_http: bool,
    /// Upper bound for JSON request bodies, see `handler::predicates::read_json_body`
    pub max_body_size: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Speech service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Subscription key, shared by synthesis and language detection
    #[serde(default)]
    pub key: Option<String>,
    pub region: String,
    pub default_voice: String,
    pub output_format: String,
    pub translator_endpoint: String,
    /// Language code -> voice name
    #[serde(default = "default_voices")]
    pub voices: HashMap<String, String>,
    /// Per-call timeout in seconds
    pub request_timeout: u64,
}

fn default_voices() -> HashMap<String, String> {
    [
        ("en", "en-US-JennyNeural"),
        ("fi", "fi-FI-NooraNeural"),
        ("sv", "sv-SE-SofieNeural"),
        ("de", "de-DE-KatjaNeural"),
        ("fr", "fr-FR-DeniseNeural"),
        ("es", "es-ES-ElviraNeural"),
    ]
    .into_iter()
    .map(|(code, voice)| (code.to_string(), voice.to_string()))
    .collect()
}

impl SpeechConfig {
    /// Pick the voice configured for a language, or the default voice
    pub fn voice_for(&self, language_code: &str) -> &str {
        self.voices
            .get(language_code)
            .or_else(|| {
                // "pt-BR" falls back to "pt"
                language_code
                    .split('-')
                    .next()
                    .and_then(|primary| self.voices.get(primary))
            })
            .map_or(self.default_voice.as_str(), String::as_str)
    }
}

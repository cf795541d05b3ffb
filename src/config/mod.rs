// Configuration module entry point
// Loads the immutable start-up configuration and the per-process state built from it

mod state;
mod types;

use config::builder::DefaultState;
use config::ConfigBuilder;
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AppConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SpeechConfig,
};

/// Environment variable conventionally holding the speech service key
const SPEECH_KEY_VAR: &str = "SPEECH_KEY";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SPEECH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("speech.key", std::env::var(SPEECH_KEY_VAR).ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// Configuration made of defaults only, no file or environment
    pub fn from_defaults() -> Result<Self, config::ConfigError> {
        with_defaults(config::Config::builder())?
            .build()?
            .try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("app.public_dir", "public")?
        .set_default("app.not_found_page", "404.html")?
        .set_default("app.api_prefix", "/api")?
        .set_default("app.production", false)?
        .set_default("app.enable_caching", false)?
        .set_default("app.cache_max_age", 24 * 60 * 60)?
        .set_default("http.server_name", "speech-webserver")?
        .set_default("http.redirect_http", false)?
        .set_default("http.max_body_size", 1_048_576)? // 1MB
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("speech.region", "northeurope")?
        .set_default("speech.default_voice", "en-US-JennyNeural")?
        .set_default("speech.output_format", "audio-48khz-192kbitrate-mono-mp3")?
        .set_default(
            "speech.translator_endpoint",
            "https://api.cognitive.microsofttranslator.com",
        )?
        .set_default("speech.request_timeout", 15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_defaults().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.app.public_dir, "public");
        assert_eq!(cfg.app.api_prefix, "/api");
        assert!(!cfg.app.production);
        assert!(!cfg.app.enable_caching);
        assert_eq!(cfg.app.cache_max_age, 86400);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.speech.key.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::from_defaults().unwrap();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_voice_for() {
        let cfg = Config::from_defaults().unwrap();
        assert_eq!(cfg.speech.voice_for("fi"), "fi-FI-NooraNeural");
        assert_eq!(cfg.speech.voice_for("sv-FI"), "sv-SE-SofieNeural");
        assert_eq!(cfg.speech.voice_for("xx"), cfg.speech.default_voice);
    }
}

// Application state module
// Everything a request needs, built once at start-up and never mutated

use std::sync::Arc;

use super::types::Config;
use crate::handler::{RouteTable, StaticFileRenderer};
use crate::speech::{
    AzureLanguageDetector, AzureSpeechClient, CollaboratorError, LanguageDetector,
    SpeechSynthesizer,
};

/// Application state
pub struct AppState {
    pub config: Arc<Config>,
    pub routes: RouteTable,
    pub renderer: StaticFileRenderer,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub detector: Arc<dyn LanguageDetector>,
}

impl AppState {
    /// `app.api_prefix` is stored without a trailing `/`, so the route
    /// table and the static/API split agree on it.
    pub fn new(
        mut config: Config,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        let trimmed = config.app.api_prefix.trim_end_matches('/').len();
        config.app.api_prefix.truncate(trimmed);

        Self {
            routes: RouteTable::with_prefix(&config.app.api_prefix),
            renderer: StaticFileRenderer::new(&config.app),
            config: Arc::new(config),
            synthesizer,
            detector,
        }
    }

    /// State wired to the Azure speech services
    pub fn with_azure(config: Config) -> Result<Self, CollaboratorError> {
        let synthesizer = Arc::new(AzureSpeechClient::new(&config.speech)?);
        let detector = Arc::new(AzureLanguageDetector::new(&config.speech)?);
        Ok(Self::new(config, synthesizer, detector))
    }
}

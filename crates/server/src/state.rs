use std::sync::Arc;

use cloudsaver_core::{Acquirer, Config, HistoryStore, MediaFilter, ResultSource, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    filter: Arc<MediaFilter>,
    history: Arc<dyn HistoryStore>,
    /// Search backend and the acquirer built on it, when configured.
    source: Option<Arc<dyn ResultSource>>,
    acquirer: Option<Arc<Acquirer>>,
}

impl AppState {
    pub fn new(config: Config, filter: Arc<MediaFilter>, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            config,
            filter,
            history,
            source: None,
            acquirer: None,
        }
    }

    pub fn with_source(mut self, source: Arc<dyn ResultSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_acquirer(mut self, acquirer: Arc<Acquirer>) -> Self {
        self.acquirer = Some(acquirer);
        self
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn filter(&self) -> &MediaFilter {
        self.filter.as_ref()
    }

    pub fn history(&self) -> &dyn HistoryStore {
        self.history.as_ref()
    }

    pub fn source(&self) -> Option<&dyn ResultSource> {
        self.source.as_deref()
    }

    pub fn acquirer(&self) -> Option<&Acquirer> {
        self.acquirer.as_deref()
    }
}

// Application state module
// Immutable state shared by every connection task

use super::types::Config;
use crate::error::StartupError;
use crate::routing::Roots;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical server root and its parent, resolved once at startup
    pub roots: Roots,
}

impl AppState {
    /// Resolve the configured root directory and build the shared state
    pub fn new(config: Config) -> Result<Self, StartupError> {
        let roots = Roots::new(&config.server.root).map_err(|source| StartupError::Root {
            path: config.server.root.clone(),
            source,
        })?;

        Ok(Self { config, roots })
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}

//! Session setup and initialization

use crate::backend::{Backend, BackendClient};
use crate::config::Config;
use crate::environment::Environment;
use crate::listing::ListingQuery;
use std::error::Error;
use std::sync::Arc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Client for the listings backend
    pub backend: Arc<dyn Backend>,
    /// Backend the session talks to
    pub environment: Environment,
    /// Listings page the dashboard opens on
    pub query: ListingQuery,
}

/// Sets up a dashboard session
///
/// This function handles the setup common to TUI and headless modes:
/// 1. Builds the HTTP client for the chosen backend
/// 2. Picks the initial page size from the config
///
/// # Arguments
/// * `config` - Loaded configuration (defaults when no file exists)
/// * `env` - Backend to connect to
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub fn setup_session(config: &Config, env: Environment) -> Result<SessionData, Box<dyn Error>> {
    let client = BackendClient::new(env.clone())?;
    let query = ListingQuery::new(None, config.page_size(), 0);

    Ok(SessionData {
        backend: Arc::new(client),
        environment: env,
        query,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_uses_configured_page_size() {
        let config = Config {
            page_size: 20,
            ..Config::default()
        };
        let session = setup_session(&config, Environment::Local).unwrap();
        assert_eq!(session.query, ListingQuery::new(None, 20, 0));
        assert_eq!(session.backend.environment(), &Environment::Local);
    }
}

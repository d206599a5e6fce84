use std::path::PathBuf;

use log::{debug, warn};

use crate::domains::auth::Session;
use crate::infra::api_client::ApiClient;
use crate::infra::api_types::AuthToken;
use crate::infra::config::{ClientConfig, ConfigError, TOKEN_ENV};

/// Everything a command needs: resolved configuration, the saved session and
/// an HTTP client carrying it.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    /// `None` when the platform has no config directory
    pub config_dir: Option<PathBuf>,
    pub session: Session,
    pub api: ApiClient,
}

impl AppContext {
    /// Layering: defaults, `config.json`, environment, then `server` from the
    /// command line. The token comes from `REELSHELF_TOKEN` or the saved
    /// session, in that order.
    pub fn bootstrap(server: Option<String>) -> Result<Self, ConfigError> {
        let config_dir = ClientConfig::config_dir();
        let mut config = ClientConfig::load();
        if let Some(server) = server {
            config.server_url = server;
        }
        config.validated_server_url()?;

        let session = Self::resolve_session(config_dir.as_deref());
        debug!(
            "[App] server {} ({})",
            config.server_url,
            if session.is_authenticated() {
                "authenticated"
            } else {
                "anonymous"
            }
        );

        let api = ApiClient::from_config(&config, session.clone());
        Ok(Self {
            config,
            config_dir,
            session,
            api,
        })
    }

    fn resolve_session(dir: Option<&std::path::Path>) -> Session {
        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            return Session::with_token(AuthToken::new(token.trim()));
        }
        match dir {
            Some(dir) => Session::load_from_dir(dir).unwrap_or_else(|e| {
                warn!("[App] ignoring saved session: {}", e);
                Session::anonymous()
            }),
            None => Session::anonymous(),
        }
    }
}

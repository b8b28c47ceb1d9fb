use std::env;

use shuttle_runtime::SecretStore;
use tracing::info;

pub const FLASK_API_URL_KEY: &str = "FlaskApiUrl";
pub const DEFAULT_FLASK_API_URL: &str = "http://host.docker.internal:5000";

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub flask_api_url: String,
}

impl GatewayConfig {
    pub fn new(flask_api_url: impl Into<String>) -> Self {
        let flask_api_url: String = flask_api_url.into();
        Self {
            flask_api_url: flask_api_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Secret store first, then the process environment, then the default.
    pub fn load(secret_store: &SecretStore) -> Self {
        let (flask_api_url, source) = resolve(
            secret_store.get(FLASK_API_URL_KEY),
            env::var(FLASK_API_URL_KEY).ok(),
        );
        let config = Self::new(flask_api_url);
        info!(url = %config.flask_api_url, source, "{FLASK_API_URL_KEY} resolved");
        config
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FLASK_API_URL)
    }
}

fn resolve(from_secrets: Option<String>, from_env: Option<String>) -> (String, &'static str) {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

    if present(&from_secrets) {
        (from_secrets.unwrap_or_default(), "secrets")
    } else if present(&from_env) {
        (from_env.unwrap_or_default(), "environment")
    } else {
        (DEFAULT_FLASK_API_URL.to_string(), "default")
    }
}

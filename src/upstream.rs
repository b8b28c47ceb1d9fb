use axum::http::StatusCode;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{config::GatewayConfig, err_responses::Problem, recipes::Recipe};

pub const RECIPES_PATH: &str = "/recetas";

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("could not reach the recipe service: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("recipe service answered {status}")]
    Status { status: StatusCode, body: String },

    #[error("recipe service sent malformed data: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Problem for UpstreamError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Connection(_) | Self::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Status { status, .. } => *status,
        }
    }

    fn title(&self) -> String {
        match self {
            Self::Connection(_) => "Error de conexión".to_string(),
            Self::Decode(_) => "Datos inválidos del servicio de recetas".to_string(),
            Self::Status { status, .. } => status
                .canonical_reason()
                .unwrap_or("Error del servicio de recetas")
                .to_string(),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            Self::Status { body, .. } => Some(body.clone()),
            other => Some(other.to_string()),
        }
    }

    fn is_relayed(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

/// Client for the service that owns the recipe collection.
#[derive(Clone)]
pub struct RecipeSource {
    http_client: reqwest::Client,
    recipes_url: String,
}

impl RecipeSource {
    pub fn new(http_client: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            http_client,
            recipes_url: format!("{}{RECIPES_PATH}", config.flask_api_url),
        }
    }

    pub fn recipes_url(&self) -> &str {
        &self.recipes_url
    }

    /// Fetches the whole collection. Nothing is cached and nothing is retried.
    pub async fn fetch_recipes(&self) -> Result<Vec<Recipe>, UpstreamError> {
        let response = self
            .http_client
            .get(&self.recipes_url)
            .send()
            .await
            .map_err(|err| {
                error!(url = %self.recipes_url, error = %err, "recipe service unreachable");
                UpstreamError::Connection(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.recipes_url, %status, "recipe service returned an error status");
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let body = response.text().await.map_err(|err| {
            error!(url = %self.recipes_url, error = %err, "recipe service body unreadable");
            UpstreamError::Connection(err)
        })?;

        let recipes = decode_recipes(&body).map_err(|err| {
            error!(url = %self.recipes_url, error = %err, "recipe service sent malformed data");
            err
        })?;
        debug!(url = %self.recipes_url, count = recipes.len(), "fetched recipes");
        Ok(recipes)
    }
}

/// A `null` body is an empty collection.
pub fn decode_recipes(body: &str) -> Result<Vec<Recipe>, UpstreamError> {
    serde_json::from_str::<Option<Vec<Recipe>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(UpstreamError::Decode)
}

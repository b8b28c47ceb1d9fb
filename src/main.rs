use axum::Router;
use shuttle_runtime::SecretStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod err_responses;
mod recipes;
mod upstream;

use config::GatewayConfig;
use upstream::RecipeSource;

#[derive(Clone)]
struct AppState {
    recipe_source: RecipeSource,
}

impl AppState {
    fn new(config: GatewayConfig) -> Self {
        let http_client = reqwest::Client::new();
        Self {
            recipe_source: RecipeSource::new(http_client, &config),
        }
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .merge(recipes::router(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[shuttle_runtime::main]
async fn main(#[shuttle_runtime::Secrets] secret_store: SecretStore) -> shuttle_axum::ShuttleAxum {
    let config = GatewayConfig::load(&secret_store);
    let state = AppState::new(config);
    info!(upstream = state.recipe_source.recipes_url(), "recipe gateway ready");

    Ok(app(state).into())
}

use axum::{extract::State, response::Response, Json};
use tracing::info;

use super::Recipe;
use crate::err_responses::{ErrorResponse, MapErrorResponse};

pub async fn list_recipes(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<Recipe>>, Response> {
    let recipes = state
        .recipe_source
        .fetch_recipes()
        .await
        .map_err_response(ErrorResponse::Problem)?;

    info!(count = recipes.len(), "listing recipes");
    Ok(Json(recipes))
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::get, Router};

    use crate::recipes::tests::{
        body_json, gateway_at, gateway_for, get_path, refused_addr, serving_json,
    };

    #[tokio::test]
    async fn relays_the_whole_collection() {
        let app = gateway_for(serving_json(
            r#"[{"id":1,"nombre":"Pasta Carbonara","ingredientes":"pasta, huevos, panceta","instrucciones":"..."},
                {"id":2,"Nombre":"Gazpacho","ingredientes":null,"instrucciones":"triturar"}]"#,
        ))
        .await;

        let response = get_path(app, "/recetas").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!([
                {"id": 1, "nombre": "Pasta Carbonara", "ingredientes": "pasta, huevos, panceta", "instrucciones": "..."},
                {"id": 2, "nombre": "Gazpacho", "ingredientes": "", "instrucciones": "triturar"}
            ])
        );
    }

    #[tokio::test]
    async fn upstream_error_status_is_passed_through() {
        let upstream = Router::new().route(
            "/recetas",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "mantenimiento") }),
        );
        let app = gateway_for(upstream).await;

        let response = get_path(app, "/recetas").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let problem = body_json(response).await;
        assert_eq!(problem["status"], 503);
        assert_eq!(problem["detail"], "mantenimiento");
    }

    #[tokio::test]
    async fn connection_refused_is_internal_error() {
        let app = gateway_at(refused_addr().await);

        let response = get_path(app, "/recetas").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let problem = body_json(response).await;
        assert_eq!(problem["title"], "Error de conexión");
        assert!(problem["detail"].as_str().unwrap().contains("could not reach"));
    }

    #[tokio::test]
    async fn malformed_upstream_json_is_internal_error() {
        let app = gateway_for(serving_json("<html>oops</html>")).await;

        let response = get_path(app, "/recetas").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["title"],
            "Datos inválidos del servicio de recetas"
        );
    }

    #[tokio::test]
    async fn null_upstream_body_is_empty_list() {
        let app = gateway_for(serving_json("null")).await;

        let response = get_path(app, "/recetas").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }
}

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use serde::Serialize;
use tracing::debug;

use super::Recipe;
use crate::err_responses::{ErrorResponse, MapErrorResponse};

pub const MAX_RECOMMENDATIONS: usize = 5;
const TOKEN_SEPARATORS: [char; 4] = [' ', ',', '.', ';'];

#[derive(Serialize, Debug, PartialEq)]
pub struct SearchResponse {
    #[serde(rename = "Resultados")]
    pub results: Vec<Recipe>,
    #[serde(rename = "EsRecomendacion")]
    pub is_recommendation: bool,
    #[serde(rename = "MensajeBusqueda")]
    pub message: String,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn tokens(term: &str) -> impl Iterator<Item = &str> {
    term.split(TOKEN_SEPARATORS).filter(|token| !token.is_empty())
}

/// Whether any token of `term` appears in `text`, ignoring case.
pub fn is_similar(text: &str, term: &str) -> bool {
    tokens(term).any(|token| contains_ignore_case(text, token))
}

/// Exact substring matches in collection order, or up to
/// [`MAX_RECOMMENDATIONS`] token matches when there are none.
pub fn search(recipes: Vec<Recipe>, term: &str) -> SearchResponse {
    let (exact, rest): (Vec<Recipe>, Vec<Recipe>) = recipes.into_iter().partition(|recipe| {
        recipe
            .text_fields()
            .iter()
            .any(|field| contains_ignore_case(field, term))
    });

    if !exact.is_empty() {
        return SearchResponse {
            results: exact,
            is_recommendation: false,
            message: format!("Resultados para '{term}':"),
        };
    }

    let recommendations = rest
        .into_iter()
        .filter(|recipe| {
            recipe
                .text_fields()
                .iter()
                .any(|field| is_similar(field, term))
        })
        .take(MAX_RECOMMENDATIONS)
        .collect();

    SearchResponse {
        results: recommendations,
        is_recommendation: true,
        message: format!(
            "No se encontraron resultados exactos para '{term}'. Aquí hay algunas recomendaciones:"
        ),
    }
}

pub async fn search_recipes(
    Path(term): Path<String>,
    State(state): State<crate::AppState>,
) -> Result<Json<SearchResponse>, Response> {
    let recipes = state
        .recipe_source
        .fetch_recipes()
        .await
        .map_err_response(ErrorResponse::RelayStatus)?;

    let response = search(recipes, &term);
    debug!(
        %term,
        count = response.results.len(),
        recommendation = response.is_recommendation,
        "search finished"
    );
    Ok(Json(response))
}

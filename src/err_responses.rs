use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Anything that can be rendered as a problem body.
pub trait Problem {
    fn status(&self) -> StatusCode;
    fn title(&self) -> String;
    fn detail(&self) -> Option<String>;

    /// The status was produced by the remote side, not by the gateway.
    fn is_relayed(&self) -> bool {
        false
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: "about:blank".to_string(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.filter(|d| !d.trim().is_empty()),
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
            Json(self),
        )
            .into_response()
    }
}

pub enum ErrorResponse {
    /// Problem body for every error.
    Problem,
    /// Relayed statuses go out bare; the gateway's own failures still get a problem body.
    RelayStatus,
}

pub trait MapErrorResponse<T> {
    fn map_err_response(self, mapper: ErrorResponse) -> Result<T, Response>;
}

impl<T, E: Problem> MapErrorResponse<T> for Result<T, E> {
    fn map_err_response(self, mapper: ErrorResponse) -> Result<T, Response> {
        match self {
            Ok(val) => Ok(val),
            Err(err) => Err(mapper.transform(&err)),
        }
    }
}

impl ErrorResponse {
    pub fn transform<E: Problem>(&self, err: &E) -> Response {
        match self {
            Self::RelayStatus if err.is_relayed() => err.status().into_response(),
            Self::Problem | Self::RelayStatus => {
                ProblemDetails::new(err.status(), err.title(), err.detail()).into_response()
            }
        }
    }
}

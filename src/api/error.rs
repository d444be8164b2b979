//! HTTP error mapping.
//!
//! Every failure leaves the service as `{"error": "..."}` with a status
//! derived from the crate [`Error`]. Internal details are logged, never
//! sent to the client.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::Error;
use crate::model::ErrorResponse;

/// Error returned by handlers.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    /// 400: missing or malformed input
    BadRequest(String),
    /// 404: entity or route absent
    NotFound(String),
    /// 500: enrichment or store failure
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Internal(m) => m,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err.root() {
            Error::Validation(message) => {
                tracing::warn!(target: "api", error = %err, "Rejected request");
                Self::BadRequest(message.clone())
            }
            Error::NotFound { entity, id } => {
                tracing::warn!(target: "api", entity, id, "Not found");
                Self::NotFound(format!("{entity} not found"))
            }
            Error::Enrichment(_) => {
                tracing::error!(target: "api", error = %err, "Song info lookup failed");
                Self::Internal("failed to fetch song details".to_string())
            }
            _ => {
                tracing::error!(target: "api", error = %err, "Request failed");
                Self::Internal("internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(target: "api", error = %rejection.body_text(), "Malformed request body");
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(target: "api", error = %rejection.body_text(), "Malformed path");
        Self::BadRequest("invalid song id".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(target: "api", error = %rejection.body_text(), "Malformed query string");
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::EnrichmentError;

    #[test]
    fn test_validation_maps_to_400() {
        let err = ApiError::from(Error::validation("fields group and song are required"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "fields group and song are required");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(Error::not_found("song", 9).context("loading song"));
        assert_eq!(err, ApiError::NotFound("song not found".to_string()));
    }

    #[test]
    fn test_enrichment_detail_is_hidden() {
        let err = ApiError::from(Error::Enrichment(EnrichmentError::Network(
            "dns error: secret-host.internal".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("secret-host"));
    }

    #[test]
    fn test_database_maps_to_500() {
        let err = ApiError::from(Error::Database(sqlx::Error::PoolTimedOut).context("listing songs"));
        assert_eq!(err, ApiError::Internal("internal server error".to_string()));
    }
}

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use translator_core::TranslatorError;

use crate::models::ErrorResponse;

/// Message returned for every failure the caller cannot act on.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

pub const INVALID_HOST_MESSAGE: &str = "Invalid host.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be bound to an endpoint's parameters.
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid host.")]
    InvalidHost,

    #[error(transparent)]
    Internal(#[from] TranslatorError),
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => {
                tracing::debug!("Rejected malformed request: {message}");
                (StatusCode::BAD_REQUEST, message)
            }
            Self::InvalidHost => (StatusCode::BAD_REQUEST, INVALID_HOST_MESSAGE.to_string()),
            Self::Internal(err) => {
                tracing::error!("Request failed: {}", error_chain(&err));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UNEXPECTED_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// `err` followed by each source not already spelled out in its parent's
/// message, joined with `: `.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !chain.ends_with(&message) {
            chain.push_str(": ");
            chain.push_str(&message);
        }
        source = cause.source();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn internal_errors_hide_details() {
        let response = ApiError::from(TranslatorError::Timeout).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::InvalidHost.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::BadRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct SendFailed(#[source] Refused);

    #[test]
    fn error_chain_includes_hidden_sources() {
        let err = TranslatorError::Credentials(translator_secrets::SecretsError::Decrypt);
        assert_eq!(error_chain(&err), "Credential error: failed to decrypt value");

        #[derive(Debug, thiserror::Error)]
        #[error("Network error: {0}")]
        struct Outer(#[source] SendFailed);

        assert_eq!(
            error_chain(&Outer(SendFailed(Refused))),
            "Network error: error sending request: connection refused"
        );
    }
}

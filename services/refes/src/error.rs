//! Error types for the protocol server
//!
//! Every failure ends the request the same way: the cause is logged, the
//! body stays empty and the status is a 4xx. A 5xx would make the gateway
//! in front of us swap in its own error page, which the client can't parse.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::{archive::ArchiveError, endpoint::Endpoint};

/// Error type for the protocol server
#[derive(Error, Debug)]
pub enum ApiError {
    /// Anything other than POST
    #[error("{0} method not supported")]
    MethodNotAllowed(String),

    /// Body could not be read, or is larger than the server accepts
    #[error("failed to read request body: {0}")]
    UnreadableBody(#[source] axum::Error),

    /// Request carried no body at all
    #[error("empty request body")]
    EmptyBody,

    /// Form-encoded body that isn't percent-decodable or lacks `args=`
    #[error("malformed request envelope: {0}")]
    MalformedEnvelope(String),

    /// Path is not in the endpoint table
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// Search keyword failed the charset check
    #[error("keyword {0:?} not allowed")]
    InvalidKeyword(String),

    /// Request JSON does not match the endpoint's request shape
    #[error("failed to decode request: {0}")]
    DecodeFailure(#[from] serde_json::Error),

    /// Catalog store error
    #[error("catalog error: {0}")]
    StorageFailure(#[from] common::error::DatabaseError),

    /// Missing or corrupt content archive
    #[error("archive error: {0}")]
    ArchiveFailure(#[from] ArchiveError),

    /// Endpoint is recognised but has no logic behind it
    #[error("{0} is not implemented")]
    NotImplemented(Endpoint),

    /// Download requested for a game that isn't visible in its region
    #[error("attempt to download non-public game: {sid}/{region}")]
    NotPublic { sid: i64, region: String },
}

impl ApiError {
    /// Status sent to the client. Never a 5xx.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Failures the client caused, as opposed to ones on our side
    fn is_client_fault(&self) -> bool {
        matches!(
            self,
            ApiError::MethodNotAllowed(_)
                | ApiError::UnreadableBody(_)
                | ApiError::EmptyBody
                | ApiError::MalformedEnvelope(_)
                | ApiError::UnknownEndpoint(_)
                | ApiError::InvalidKeyword(_)
                | ApiError::DecodeFailure(_)
                | ApiError::NotImplemented(_)
                | ApiError::NotPublic { .. }
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_client_fault() {
            warn!("Request rejected: {}", self);
        } else {
            error!("Request failed: {}", self);
        }

        self.status().into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_error_maps_to_server_error() {
        let errors = vec![
            ApiError::MethodNotAllowed("GET".to_string()),
            ApiError::UnreadableBody(axum::Error::new(std::io::Error::other("length limit"))),
            ApiError::EmptyBody,
            ApiError::MalformedEnvelope("missing args= prefix".to_string()),
            ApiError::UnknownEndpoint("/api/nope".to_string()),
            ApiError::InvalidKeyword("##bad##".to_string()),
            ApiError::ArchiveFailure(ArchiveError::InvalidId(-1)),
            ApiError::NotImplemented(Endpoint::News),
            ApiError::NotPublic {
                sid: 1,
                region: "US".to_string(),
            },
        ];

        for err in errors {
            let status = err.status();
            assert!(status.is_client_error(), "{} mapped to {}", err, status);
        }
    }

    #[test]
    fn test_method_not_allowed_status() {
        assert_eq!(
            ApiError::MethodNotAllowed("PUT".to_string()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::EmptyBody.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_error_response_has_empty_body() {
        let response = ApiError::NotImplemented(Endpoint::RpgUpload).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}

//! Central error type for the feed service.
//!
//! Delivery failures on the streaming path are deliberately not represented
//! here: a failed send deregisters the subscriber and ends its loop without
//! surfacing an error anywhere else.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the historical query path.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FeedError::InvalidParameter(msg) => (StatusCode::BAD_REQUEST, msg),
            FeedError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "Response": "Error",
            "Message": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_maps_to_bad_request() {
        let response =
            FeedError::InvalidParameter("limit must be positive".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_maps_to_server_error() {
        let response = FeedError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

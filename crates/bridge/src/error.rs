//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Error bodies are JSON:
//!
//! ```json
//! {"success": false, "error": "No items could be mapped to the target store", "details": ["..."]}
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::shopify::RemoteApiError;

/// Application-level error type for the bridge.
#[derive(Debug, Error)]
pub enum AppError {
    /// Checkout translation or draft order creation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Store API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] RemoteApiError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Checkout(CheckoutError::EmptyCart | CheckoutError::NoItemsMapped { .. })
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Checkout(CheckoutError::Remote(_)) | Self::Shopify(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn remote(&self) -> Option<&RemoteApiError> {
        match self {
            Self::Checkout(CheckoutError::Remote(err)) | Self::Shopify(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose upstream bodies to clients
        let upstream = self.remote().and_then(RemoteApiError::status);
        let (error, details) = match self {
            Self::Checkout(CheckoutError::NoItemsMapped { warnings }) => (
                "No items could be mapped to the target store".to_string(),
                Some(warnings),
            ),
            Self::Checkout(CheckoutError::EmptyCart) => ("Cart is empty".to_string(), None),
            Self::BadRequest(msg) => (msg, None),
            Self::Checkout(CheckoutError::Remote(_)) | Self::Shopify(_) => (
                "External service error".to_string(),
                upstream.map(|status| vec![format!("Upstream status {status}")]),
            ),
        };

        let body = ErrorBody {
            success: false,
            error,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");

        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: Cart is empty");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::NoItemsMapped {
                warnings: vec!["Line 1 (SKU: X): no matching variant in target store".to_string()],
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Shopify(RemoteApiError::Status {
                status: 401,
                body: "Unauthorized".to_string(),
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::Remote(
                RemoteApiError::Status {
                    status: 422,
                    body: "{}".to_string(),
                }
            ))),
            StatusCode::BAD_GATEWAY
        );
    }
}

//! Unified error handling for the HTTP surface.
//!
//! Provides a unified `AppError` type mapping pipeline errors onto status
//! codes. All route handlers return `Result<T, AppError>`; every error
//! surfaces as one human-readable message and none are fatal - the
//! operator resubmits the form from a clean state.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::forms::FormError;
use crate::reference::ReferenceError;

/// Application-level error type for the register server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A submission failed somewhere in the pipeline.
    #[error("Submission error: {0}")]
    Form(#[from] FormError),

    /// Reference data could not be served.
    #[error("Reference data error: {0}")]
    Reference(#[from] ReferenceError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // User-correctable: the operator fixes the field and resubmits.
            Self::Form(FormError::Validation { .. } | FormError::Derivation { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            // The append reached the store and failed there.
            Self::Form(FormError::Write(_)) => StatusCode::BAD_GATEWAY,
            // Transient: reference reload failed with nothing to fall back on.
            Self::Form(FormError::Reference(_)) | Self::Reference(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request error");
        }

        // Validation and derivation messages name the offending fields and
        // are written for the operator; pass them through as-is.
        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_maps_to_unprocessable() {
        let err = AppError::Form(FormError::Validation {
            missing: vec!["quantity".to_owned()],
        });
        assert_eq!(status_of(err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_derivation_maps_to_unprocessable() {
        let err = AppError::Form(FormError::Derivation {
            field: "sku",
            message: "SKU 00000123 not found in catalog".to_owned(),
        });
        assert_eq!(status_of(err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_write_failure_maps_to_bad_gateway() {
        let err = AppError::Form(FormError::Write(crate::sheets::SheetsError::Api {
            status: 500,
            message: "boom".to_owned(),
        }));
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of(AppError::NotFound("store 9".to_owned())),
            StatusCode::NOT_FOUND
        );
    }
}

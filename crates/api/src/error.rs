use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use exmage_core::error::CoreError;
use exmage_db::StoreError;
use exmage_registry::RegistryError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds variants for the two
/// external collaborators. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
///
/// The `missing_parameter` and `rest_forbidden` codes are part of the
/// public API contract and must not change.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `exmage-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A metadata store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The image-link registry failed to return a record.
    #[error("Registry call failed: {0}")]
    Registry(#[from] RegistryError),

    /// A required request parameter is absent or falsy.
    #[error("post_id and url are required.")]
    MissingParameter,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "invalid_parameter", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "rest_forbidden", msg.clone())
                }
            },

            AppError::Store(err) => {
                tracing::error!(error = %err, "Metadata store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }

            AppError::Registry(err) => {
                tracing::error!(error = %err, "Image link registry error");
                (
                    StatusCode::BAD_GATEWAY,
                    "registry_failed",
                    "The image link registry did not return an image record.".to_string(),
                )
            }

            AppError::MissingParameter => (
                StatusCode::BAD_REQUEST,
                "missing_parameter",
                "post_id and url are required.".to_string(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

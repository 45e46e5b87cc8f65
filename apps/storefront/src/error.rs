//! # App Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Remote failure? ─── ApiClientError::Http(..) ──────┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Rule rejected? ─── CoreError::MissingAddress ──── AppError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Remote details are logged, the shopper sees a generic message.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::error;

use darb_api::ApiClientError;
use darb_core::{CoreError, ValidationError};

/// Convenience alias for command results.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CHECKOUT_REJECTED",
///   "message": "Please enter your delivery address"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message fit to show the shopper
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or user does not exist
    NotFound,

    /// Input failed validation (bad code, blank comment, ...)
    ValidationError,

    /// The storefront API failed or could not be reached
    RemoteError,

    /// Logged in, but the role may not do this
    Unauthorized,

    /// Nobody is logged in
    LoginRequired,

    /// A checkout precondition failed
    CheckoutRejected,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn login_required() -> Self {
        AppError::new(ErrorCode::LoginRequired, "Please log in to continue")
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id),
            CoreError::InvalidDiscountCode { .. } | CoreError::UnknownBottle(_) => {
                AppError::validation(err.to_string())
            }
            CoreError::EmptyCart
            | CoreError::MissingAddress
            | CoreError::EmptyBundleSelection
            | CoreError::TooManyBottles { .. } => AppError::new(ErrorCode::CheckoutRejected, err.to_string()),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts API client errors to app errors.
impl From<ApiClientError> for AppError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::NotFound(path) => {
                AppError::new(ErrorCode::NotFound, format!("Not found: {}", path))
            }
            ApiClientError::Validation(body) => {
                error!("API rejected request: {}", body);
                AppError::validation("The store rejected this request")
            }
            ApiClientError::Unauthorized(body) => {
                error!("API refused request: {}", body);
                AppError::unauthorized("The store refused this request")
            }
            ApiClientError::InvalidConfig(_)
            | ApiClientError::InvalidUrl(_)
            | ApiClientError::Io(_)
            | ApiClientError::ConfigParse(_)
            | ApiClientError::ConfigSerialize(_) => AppError::internal(err.to_string()),
            ApiClientError::Http(e) => {
                error!("Storefront API unreachable: {}", e);
                AppError::new(ErrorCode::RemoteError, "Could not reach the store. Please try again.")
            }
            ApiClientError::Remote { status, body } => {
                error!(status, "Storefront API error: {}", body);
                AppError::new(ErrorCode::RemoteError, "The store could not complete the request. Please try again.")
            }
            ApiClientError::Decode(e) => {
                error!("Unexpected API response: {}", e);
                AppError::new(ErrorCode::RemoteError, "The store sent an unexpected response")
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_rejections_map_to_checkout_code() {
        for err in [
            CoreError::EmptyCart,
            CoreError::MissingAddress,
            CoreError::EmptyBundleSelection,
            CoreError::TooManyBottles { selected: 7, cap: 6 },
        ] {
            assert_eq!(AppError::from(err).code, ErrorCode::CheckoutRejected);
        }
    }

    #[test]
    fn test_invalid_code_is_validation_error() {
        let err = AppError::from(CoreError::InvalidDiscountCode {
            code: "SALE".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("PTCU59 or PTCU60"));
    }

    #[test]
    fn test_remote_error_hides_body() {
        let err = AppError::from(ApiClientError::Remote {
            status: 500,
            body: "stack trace".to_string(),
        });
        assert_eq!(err.code, ErrorCode::RemoteError);
        assert!(!err.message.contains("stack trace"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(AppError::login_required()).unwrap();
        assert_eq!(json["code"], "LOGIN_REQUIRED");
        assert_eq!(json["message"], "Please log in to continue");
    }
}

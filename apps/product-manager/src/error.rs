//! # Service Error Type
//!
//! One error type for everything a service call can return.
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Source                                   Status   Body                 │
//! │  ──────────────────────────────────────   ──────   ──────────────────   │
//! │  CoreError (Domain: validation, rules)    400      error message        │
//! │  CoreError (NotFound)                     404      error message        │
//! │  DbError::NotFound                        404      "X not found: id"    │
//! │  DbError::UniqueViolation                 400      "already exists"     │
//! │  Unauthorized (missing/invalid token)     401      error message        │
//! │  Forbidden (role doesn't satisfy policy)  403      error message        │
//! │  Everything else                          500      generic, logged      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details (SQL messages, config problems) are logged with
//! `tracing::error!` and never returned to the caller.

use prodman_core::{CoreError, ErrorCategory, ValidationError};
use prodman_db::DbError;
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use crate::config::ConfigError;

/// Errors returned by services and auth.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// No token, a bad signature, wrong issuer or an expired token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role doesn't satisfy the policy.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(err.into())
    }
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Validation or business rule (400)
    Domain,
    /// Entity not found (404)
    NotFound,
    /// Authentication required or failed (401)
    Unauthorized,
    /// Role not allowed (403)
    Forbidden,
    /// Anything else (500)
    Internal,
}

impl ErrorCode {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorCode::Domain => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::Unauthorized => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::Internal => 500,
        }
    }
}

/// JSON body returned to the caller when a request fails.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Product with sku 123 was not found!" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Core(err) => match err.category() {
                ErrorCategory::Domain => ErrorCode::Domain,
                ErrorCategory::NotFound => ErrorCode::NotFound,
            },
            ServiceError::Db(DbError::NotFound { .. }) => ErrorCode::NotFound,
            ServiceError::Db(DbError::UniqueViolation { .. }) => ErrorCode::Domain,
            ServiceError::Db(_) => ErrorCode::Internal,
            ServiceError::Unauthorized(_) => ErrorCode::Unauthorized,
            ServiceError::Forbidden(_) => ErrorCode::Forbidden,
            ServiceError::Config(_) | ServiceError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> u16 {
        self.code().status_code()
    }

    /// Builds the response body, logging anything that maps to a 500.
    pub fn to_response(&self) -> ErrorResponse {
        let code = self.code();
        let message = match self {
            ServiceError::Db(DbError::UniqueViolation { field, .. }) => {
                format!("Value for {field} already exists")
            }
            _ if code == ErrorCode::Internal => {
                tracing::error!(error = %self, "Internal error");
                "An internal error occurred.".to_string()
            }
            _ => self.to_string(),
        };

        ErrorResponse { code, message }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_400() {
        let err = ServiceError::from(ValidationError::InvalidSku);
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_response().message,
            "Product sku should contain only alphanumeric characters."
        );

        assert_eq!(ServiceError::from(CoreError::InvalidCredentials).status_code(), 400);
        assert_eq!(
            ServiceError::from(CoreError::ProductAlreadyExists("123".into())).status_code(),
            400
        );
        assert_eq!(ServiceError::from(DbError::duplicate("users.email", "x")).status_code(), 400);
    }

    #[test]
    fn test_not_found_errors_are_404() {
        let err = ServiceError::from(CoreError::ProductNotFound("123".into()));
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.to_response(),
            ErrorResponse {
                code: ErrorCode::NotFound,
                message: "Product with sku 123 was not found!".into(),
            }
        );

        assert_eq!(ServiceError::from(CoreError::RoleNotFound("x".into())).status_code(), 404);
        assert_eq!(ServiceError::from(DbError::not_found("Product", "1")).status_code(), 404);
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(ServiceError::Unauthorized("no token".into()).status_code(), 401);
        assert_eq!(ServiceError::Forbidden("admin only".into()).status_code(), 403);
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ServiceError::from(DbError::QueryFailed("near \"SELEC\": syntax error".into()));
        assert_eq!(err.status_code(), 500);

        let response = err.to_response();
        assert_eq!(response.code, ErrorCode::Internal);
        assert!(!response.message.contains("SELEC"));
    }

    #[test]
    fn test_response_serialization() {
        let response = ServiceError::Forbidden("nope".into()).to_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "FORBIDDEN");
        assert_eq!(json["message"], "Forbidden: nope");
    }
}

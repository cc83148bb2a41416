//! # Error Types
//!
//! Domain-specific error types for prodman-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  prodman-core errors (this file)                                       │
//! │  ├── ValidationError  - A value object or entity rejected its input    │
//! │  └── CoreError        - Business rule violations + missing entities    │
//! │                                                                         │
//! │  prodman-db errors (separate crate)                                    │
//! │  └── DbError          - Persistence failures                           │
//! │                                                                         │
//! │  product-manager errors (app)                                          │
//! │  └── ServiceError     - What the web layer sees (status code + text)   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → 400 / 404 / 500    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Categories
//! Every [`CoreError`] falls in one of two categories:
//! - [`ErrorCategory::Domain`]: validation or business-rule violation (400)
//! - [`ErrorCategory::NotFound`]: a looked-up entity does not exist (404)

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A value object or entity rejected its input.
///
/// One variant per validated field. The message is the one shown to the
/// caller, so it names the rule that was broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product sku should contain only alphanumeric characters.")]
    InvalidSku,

    #[error("Product name should contain only alphanumeric characters and spaces.")]
    InvalidProductName,

    #[error("Product description should contain only alphanumeric characters and spaces.")]
    InvalidDescription,

    #[error("Stock of product can not be less than 0.")]
    InvalidStock,

    #[error("Weight of product can not be less than 0.")]
    InvalidWeight,

    #[error("Cost of product can not be less than or equal to 0.")]
    InvalidCost,

    /// Net price is either not positive or not above the cost.
    #[error("Net price of product can not be less than or equal to {bound}.")]
    InvalidNetPrice { bound: &'static str },

    #[error("Tax percentage for product can not be {reason}.")]
    InvalidTaxPercentage { reason: &'static str },

    #[error("User name should contain only alphanumeric characters.")]
    InvalidUsername,

    #[error("Email is invalid.")]
    InvalidEmail,

    #[error("User password should start with an alphanumeric character.")]
    InvalidPassword,

    #[error("Role name should contain only alphanumeric characters.")]
    InvalidRoleName,
}

// =============================================================================
// Core Error
// =============================================================================

/// Which family an error belongs to.
///
/// The web layer turns this into a status code; the domain only decides
/// the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Validation or business-rule violation.
    Domain,
    /// A referenced entity does not exist.
    NotFound,
}

/// Core business errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input validation failed (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// User already holds a role with this name.
    #[error("User already has role '{0}'.")]
    DuplicateRole(String),

    /// Registration with an email that is already taken.
    #[error("Email '{0}' is already in use.")]
    EmailAlreadyUsed(String),

    /// A product with this SKU is already stored.
    #[error("Product with sku {0} already exists!")]
    ProductAlreadyExists(String),

    /// Login failed.
    ///
    /// ## Why one variant?
    /// Unknown email, wrong password and missing role all collapse here so
    /// a caller cannot learn which check failed.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// The three facets handed to an aggregate do not share a SKU.
    #[error("Product facets disagree on sku: catalog '{catalog}', {facet} '{other}'")]
    MismatchedSku {
        catalog: String,
        facet: &'static str,
        other: String,
    },

    #[error("Product with sku {0} was not found!")]
    ProductNotFound(String),

    #[error("Role '{0}' does not exist.")]
    RoleNotFound(String),

    #[error("User with id: '{0}' does not exist.")]
    UserNotFound(String),
}

impl CoreError {
    /// Returns the family of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreError::ProductNotFound(_)
            | CoreError::RoleNotFound(_)
            | CoreError::UserNotFound(_) => ErrorCategory::NotFound,
            _ => ErrorCategory::Domain,
        }
    }

    /// Shorthand for `category() == ErrorCategory::NotFound`.
    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::InvalidSku.to_string(),
            "Product sku should contain only alphanumeric characters."
        );
        assert_eq!(
            ValidationError::InvalidNetPrice { bound: "cost" }.to_string(),
            "Net price of product can not be less than or equal to cost."
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidEmail.into();
        assert!(matches!(core_err, CoreError::Validation(ValidationError::InvalidEmail)));
        assert_eq!(core_err.to_string(), "Email is invalid.");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            CoreError::ProductNotFound("123".into()).category(),
            ErrorCategory::NotFound
        );
        assert!(CoreError::RoleNotFound("admin".into()).is_not_found());
        assert!(CoreError::UserNotFound("x".into()).is_not_found());

        assert_eq!(CoreError::InvalidCredentials.category(), ErrorCategory::Domain);
        assert_eq!(
            CoreError::ProductAlreadyExists("123".into()).category(),
            ErrorCategory::Domain
        );
        assert_eq!(
            CoreError::from(ValidationError::InvalidCost).category(),
            ErrorCategory::Domain
        );
    }
}

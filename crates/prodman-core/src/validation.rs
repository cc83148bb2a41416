//! # Validation Module
//!
//! Named validation predicates and validators for Product Manager.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: DTO deserialization (serde)                                  │
//! │  └── Types and required fields                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Value object constructors                                    │
//! │  └── THIS MODULE: is_valid_sku, is_valid_email, ...                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE constraints (sku, email, role name)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Predicates return `bool` so they can be tested on their own; the
//! `validate_*` wrappers turn them into typed errors.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, ValidationResult};

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("invalid alphanumeric pattern"));

static ALPHANUMERIC_WITH_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").expect("invalid product text pattern"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[a-z\d.-]*[^.]$").expect("invalid email pattern"));

static PASSWORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]").expect("invalid password pattern"));

// =============================================================================
// Predicates
// =============================================================================

/// Non-blank and only ASCII letters and digits.
///
/// Shared by SKUs, user names and role names.
///
/// ## Example
/// ```rust
/// use prodman_core::validation::is_alphanumeric;
///
/// assert!(is_alphanumeric("ABC123"));
/// assert!(!is_alphanumeric("COKE-330"));
/// assert!(!is_alphanumeric("   "));
/// ```
pub fn is_alphanumeric(value: &str) -> bool {
    !value.trim().is_empty() && ALPHANUMERIC.is_match(value)
}

/// Valid SKU: see [`is_alphanumeric`].
pub fn is_valid_sku(sku: &str) -> bool {
    is_alphanumeric(sku)
}

/// Non-blank and only ASCII letters, digits and spaces.
///
/// Used for product names and descriptions.
pub fn is_valid_product_text(value: &str) -> bool {
    !value.trim().is_empty() && ALPHANUMERIC_WITH_SPACES.is_match(value)
}

/// Email address check.
///
/// ## Rules
/// - Local part: word characters, dots, hyphens
/// - Domain: starts with a lowercase letter or digit, contains a dot,
///   only lowercase letters, digits, dots and hyphens, must not end with a dot
///
/// ## Example
/// ```rust
/// use prodman_core::validation::is_valid_email;
///
/// assert!(is_valid_email("user@email.com"));
/// assert!(!is_valid_email("user@localhost"));
/// assert!(!is_valid_email("user@email.com."));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.trim().is_empty() || !EMAIL.is_match(email) {
        return false;
    }

    // The pattern guarantees exactly one usable '@' split point for the domain
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };

    let starts_alnum = domain
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

    starts_alnum && domain[1..].contains('.')
}

/// Plaintext password check: non-blank and starting with a letter or digit.
pub fn is_valid_password(password: &str) -> bool {
    !password.trim().is_empty() && PASSWORD_START.is_match(password)
}

/// Stock must not be negative.
pub fn is_valid_stock(stock: i32) -> bool {
    stock >= 0
}

/// Weight must be a finite, non-negative number.
pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}

/// Tax percentage must be in `0..100`.
pub fn is_valid_tax_percentage(percentage: i32) -> bool {
    (0..100).contains(&percentage)
}

// =============================================================================
// Validators
// =============================================================================

/// Validates a plaintext password before it is hashed.
///
/// ## Example
/// ```rust
/// use prodman_core::validation::validate_password;
///
/// assert!(validate_password("secret").is_ok());
/// assert!(validate_password("").is_err());
/// assert!(validate_password("$ecret").is_err());
/// ```
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if !is_valid_password(password) {
        return Err(ValidationError::InvalidPassword);
    }
    Ok(())
}

/// Validates a user name.
pub fn validate_username(name: &str) -> ValidationResult<()> {
    if !is_alphanumeric(name) {
        return Err(ValidationError::InvalidUsername);
    }
    Ok(())
}

/// Validates an email address.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validates a role name.
pub fn validate_role_name(name: &str) -> ValidationResult<()> {
    if !is_alphanumeric(name) {
        return Err(ValidationError::InvalidRoleName);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! JWT authentication, password hashing and role policies.
//!
//! ```text
//! login ──► verify_password (argon2) ──► JwtHandler::create_token ──► JwtDto
//!
//! request ──► extract_bearer_token ──► JwtHandler::validate_token ──► Claims
//!                                                                       │
//!                                            authorize(&claims, Policy) ◄┘
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use prodman_core::user::{ADMIN, CATALOG_MANAGER, SALES_MANAGER, WAREHOUSE_MANAGER};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::dto::JwtDto;
use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Tokens
// =============================================================================

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Role the user logged in with
    pub role: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

impl Claims {
    /// The user id in `sub`.
    pub fn user_id(&self) -> ServiceResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| ServiceError::Unauthorized("Token subject is not a user id".to_string()))
    }
}

/// Issues and checks HS256 tokens.
pub struct JwtHandler {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtHandler {
    pub fn new(settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.key.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.key.as_bytes());
        JwtHandler {
            settings,
            encoding_key,
            decoding_key,
        }
    }

    /// Signs a token for `user_id` acting as `role`.
    pub fn create_token(&self, user_id: Uuid, role: &str) -> ServiceResult<JwtDto> {
        let now = Utc::now();
        let exp = now + Duration::minutes(i64::from(self.settings.expiry_minutes));

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            iss: self.settings.issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(format!("Failed to generate token: {}", e)))?;

        Ok(JwtDto {
            token,
            role: role.to_string(),
            expires: claims.exp,
        })
    }

    /// Checks signature, expiry and issuer, and returns the claims.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.settings.issuer.as_str()]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

// =============================================================================
// Passwords
// =============================================================================

/// Hashes a password with argon2id and a random salt (PHC string).
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {}", e)))
}

/// `true` if `candidate` matches the stored hash. A malformed hash never
/// matches.
pub fn verify_password(hash: &str, candidate: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// =============================================================================
// Role Policies
// =============================================================================

/// Protected operations and the role each one needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// `GET products/browse[/{sku}]`
    BrowseProducts,
    /// `GET account`
    OwnAccount,
    /// `POST products/create`
    CreateProduct,
    /// `POST products/update/catalog`
    UpdateCatalog,
    /// `POST products/update/warehouse`
    UpdateWarehouse,
    /// `POST products/update/sales`
    UpdateSales,
    /// `GET account/{id}`
    AccountById,
}

impl Policy {
    /// Role required, or `None` when any authenticated user is allowed.
    pub fn required_role(self) -> Option<&'static str> {
        match self {
            Policy::BrowseProducts | Policy::OwnAccount => None,
            Policy::CreateProduct | Policy::UpdateCatalog => Some(CATALOG_MANAGER),
            Policy::UpdateWarehouse => Some(WAREHOUSE_MANAGER),
            Policy::UpdateSales => Some(SALES_MANAGER),
            Policy::AccountById => Some(ADMIN),
        }
    }
}

/// Checks the token's role against `policy`.
pub fn authorize(claims: &Claims, policy: Policy) -> ServiceResult<()> {
    match policy.required_role() {
        Some(role) if claims.role != role => Err(ServiceError::Forbidden(format!(
            "{:?} requires role '{}'",
            policy, role
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodman_core::user::USER;

    fn settings(key: &str, issuer: &str) -> JwtSettings {
        JwtSettings {
            key: key.to_string(),
            issuer: issuer.to_string(),
            expiry_minutes: 60,
        }
    }

    fn handler() -> JwtHandler {
        JwtHandler::new(settings("test-secret", "product-manager"))
    }

    #[test]
    fn test_jwt_roundtrip() {
        let handler = handler();
        let user_id = Uuid::new_v4();

        let jwt = handler.create_token(user_id, ADMIN).unwrap();
        assert_eq!(jwt.role, ADMIN);
        assert!(jwt.expires > Utc::now().timestamp());

        let claims = handler.validate_token(&jwt.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, ADMIN);
        assert_eq!(claims.iss, "product-manager");
        assert_eq!(claims.exp, jwt.expires);
    }

    #[test]
    fn test_wrong_key_rejected() {
        let jwt = handler().create_token(Uuid::new_v4(), USER).unwrap();

        let other = JwtHandler::new(settings("other-secret", "product-manager"));
        let err = other.validate_token(&jwt.token).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let jwt = handler().create_token(Uuid::new_v4(), USER).unwrap();

        let other = JwtHandler::new(settings("test-secret", "someone-else"));
        assert!(other.validate_token(&jwt.token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let past = Utc::now().timestamp() - 3600;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: USER.to_string(),
            iss: "product-manager".to_string(),
            iat: past - 60,
            exp: past,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(handler().validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hash = hash_password("secret").unwrap();

        assert_ne!(hash, "secret");
        assert!(verify_password(&hash, "secret"));
        assert!(!verify_password(&hash, "Secret"));
        assert!(!verify_password("not-a-phc-string", "secret"));

        // Random salt: same input, different hash
        assert_ne!(hash_password("secret").unwrap(), hash);
    }

    #[test]
    fn test_policy_matrix() {
        let claims_for = |role: &str| Claims {
            sub: Uuid::new_v4().to_string(),
            role: role.to_string(),
            iss: "product-manager".to_string(),
            iat: 0,
            exp: 0,
            jti: String::new(),
        };

        let user = claims_for(USER);
        assert!(authorize(&user, Policy::BrowseProducts).is_ok());
        assert!(authorize(&user, Policy::OwnAccount).is_ok());
        assert!(authorize(&user, Policy::CreateProduct).is_err());
        assert!(authorize(&user, Policy::AccountById).is_err());

        let catalog = claims_for(CATALOG_MANAGER);
        assert!(authorize(&catalog, Policy::CreateProduct).is_ok());
        assert!(authorize(&catalog, Policy::UpdateCatalog).is_ok());
        assert!(authorize(&catalog, Policy::UpdateSales).is_err());

        assert!(authorize(&claims_for(WAREHOUSE_MANAGER), Policy::UpdateWarehouse).is_ok());
        assert!(authorize(&claims_for(SALES_MANAGER), Policy::UpdateSales).is_ok());
        assert!(authorize(&claims_for(ADMIN), Policy::AccountById).is_ok());

        let err = authorize(&claims_for(ADMIN), Policy::UpdateWarehouse).unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}

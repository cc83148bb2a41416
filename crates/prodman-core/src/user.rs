//! # Users and Roles
//!
//! A [`User`] owns a set of [`Role`]s, unique by name. Access control in the
//! application layer is driven entirely by role names, so the well-known
//! names live here as constants.

use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::validation::{validate_email, validate_role_name, validate_username};

// =============================================================================
// Well-Known Roles
// =============================================================================

pub const CATALOG_MANAGER: &str = "CatalogManager";
pub const SALES_MANAGER: &str = "SalesManager";
pub const WAREHOUSE_MANAGER: &str = "WarehouseManager";
/// Default role for self-registration.
pub const USER: &str = "user";
pub const ADMIN: &str = "admin";

/// Every role the system knows about out of the box.
pub const WELL_KNOWN_ROLES: [&str; 5] = [CATALOG_MANAGER, SALES_MANAGER, WAREHOUSE_MANAGER, USER, ADMIN];

// =============================================================================
// Role
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role {
    id: Uuid,
    name: String,
}

impl Role {
    pub fn new(name: &str) -> ValidationResult<Self> {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(id: Uuid, name: &str) -> ValidationResult<Self> {
        validate_role_name(name)?;
        Ok(Self {
            id,
            name: name.to_string(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// User
// =============================================================================

/// An account.
///
/// `password` holds the hash, never the plaintext. The plaintext rules are
/// checked by [`crate::validation::validate_password`] before hashing.
///
/// ## Roles
/// Keyed by name (case-sensitive), so the same role can't be held twice:
/// ```rust
/// use prodman_core::user::{Role, User};
/// use uuid::Uuid;
///
/// let mut user = User::new(Uuid::new_v4(), "user@email.com", "Username", "hash").unwrap();
/// user.add_role(Role::new("admin").unwrap()).unwrap();
/// assert!(user.add_role(Role::new("admin").unwrap()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    email: String,
    name: String,
    password: String,
    roles: BTreeMap<String, Role>,
}

impl User {
    pub fn new(id: Uuid, email: &str, name: &str, password_hash: &str) -> ValidationResult<Self> {
        validate_email(email)?;
        validate_username(name)?;
        if password_hash.trim().is_empty() {
            return Err(ValidationError::InvalidPassword);
        }

        Ok(Self {
            id,
            email: email.to_string(),
            name: name.to_string(),
            password: password_hash.to_string(),
            roles: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored password hash.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Roles in name order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles.keys().cloned().collect()
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// The held role whose name matches `name` ignoring ASCII case.
    pub fn find_role(&self, name: &str) -> Option<&Role> {
        self.roles
            .values()
            .find(|role| role.name().eq_ignore_ascii_case(name))
    }

    pub fn add_role(&mut self, role: Role) -> CoreResult<()> {
        if self.roles.contains_key(role.name()) {
            return Err(CoreError::DuplicateRole(role.name().to_string()));
        }
        self.roles.insert(role.name().to_string(), role);
        Ok(())
    }

    pub fn remove_role(&mut self, role: &Role) -> CoreResult<()> {
        self.roles
            .remove(role.name())
            .map(|_| ())
            .ok_or_else(|| CoreError::RoleNotFound(role.name().to_string()))
    }

    pub fn with_name(self, name: &str) -> ValidationResult<Self> {
        validate_username(name)?;
        Ok(Self {
            name: name.to_string(),
            ..self
        })
    }

    pub fn with_email(self, email: &str) -> ValidationResult<Self> {
        validate_email(email)?;
        Ok(Self {
            email: email.to_string(),
            ..self
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(Uuid::new_v4(), "user@email.com", "Username", "hash").unwrap()
    }

    #[test]
    fn test_role_name_validation() {
        assert!(Role::new("CatalogManager").is_ok());
        assert_eq!(Role::new("Catalog Manager"), Err(ValidationError::InvalidRoleName));
        assert_eq!(Role::new(""), Err(ValidationError::InvalidRoleName));
    }

    #[test]
    fn test_user_validation() {
        let id = Uuid::new_v4();
        assert_eq!(
            User::new(id, "not-an-email", "Username", "hash"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            User::new(id, "user@email.com", "user name", "hash"),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            User::new(id, "user@email.com", "Username", "  "),
            Err(ValidationError::InvalidPassword)
        );
        // PHC hash strings start with '$' and are accepted as stored hashes
        assert!(User::new(id, "user@email.com", "Username", "$argon2id$v=19$...").is_ok());
    }

    #[test]
    fn test_add_role() {
        let mut user = user();
        user.add_role(Role::new(ADMIN).unwrap()).unwrap();
        assert!(user.has_role(ADMIN));
        assert_eq!(user.role_names(), vec![ADMIN.to_string()]);
    }

    #[test]
    fn test_add_same_role_twice_fails() {
        let mut user = user();
        user.add_role(Role::new(ADMIN).unwrap()).unwrap();

        // A different id does not make it a different role
        let err = user.add_role(Role::new(ADMIN).unwrap()).unwrap_err();
        assert_eq!(err, CoreError::DuplicateRole(ADMIN.into()));
        assert_eq!(user.roles().count(), 1);
    }

    #[test]
    fn test_role_names_are_case_sensitive() {
        let mut user = user();
        user.add_role(Role::new("admin").unwrap()).unwrap();
        user.add_role(Role::new("Admin").unwrap()).unwrap();
        assert_eq!(user.roles().count(), 2);
    }

    #[test]
    fn test_find_role_ignores_case() {
        let mut user = user();
        user.add_role(Role::new(CATALOG_MANAGER).unwrap()).unwrap();

        assert_eq!(user.find_role("catalogmanager").unwrap().name(), CATALOG_MANAGER);
        assert!(user.find_role("admin").is_none());
    }

    #[test]
    fn test_remove_role() {
        let mut user = user();
        let role = Role::new(SALES_MANAGER).unwrap();
        user.add_role(role.clone()).unwrap();

        user.remove_role(&role).unwrap();
        assert!(!user.has_role(SALES_MANAGER));

        let err = user.remove_role(&role).unwrap_err();
        assert_eq!(err, CoreError::RoleNotFound(SALES_MANAGER.into()));
    }

    #[test]
    fn test_with_updaters() {
        let user = user().with_name("Renamed").unwrap();
        assert_eq!(user.name(), "Renamed");
        assert!(user.clone().with_email("broken").is_err());
        assert_eq!(user.with_email("new@email.com").unwrap().email(), "new@email.com");
    }
}

//! User service: registration, login and account lookup.

use std::sync::Arc;

use prodman_core::user::USER;
use prodman_core::validation::validate_password;
use prodman_core::{CoreError, User};
use prodman_db::UserRepository;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password, JwtHandler};
use crate::dto::{AccountDto, JwtDto, LoginRequest, RegisterRequest};
use crate::error::ServiceResult;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtHandler>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtHandler>) -> Self {
        UserService { users, jwt }
    }

    /// Creates an account holding exactly one role.
    ///
    /// ## Check Order
    /// 1. Role exists, else `RoleNotFound`
    /// 2. Email free, else `EmailAlreadyUsed`
    /// 3. Email, name and password are valid
    pub async fn register(
        &self,
        id: Uuid,
        email: &str,
        name: &str,
        password: &str,
        role: &str,
    ) -> ServiceResult<()> {
        let role = self
            .users
            .get_role_by_name(role)
            .await?
            .ok_or_else(|| CoreError::RoleNotFound(role.to_string()))?;

        if self.users.get_user_by_email(email).await?.is_some() {
            return Err(CoreError::EmailAlreadyUsed(email.to_string()).into());
        }

        validate_password(password)?;
        let hash = hash_password(password)?;

        let mut user = User::new(id, email, name, &hash)?;
        user.add_role(role)?;

        self.users.add_user(&user).await?;
        info!(user_id = %id, "User registered");
        Ok(())
    }

    /// [`register`](Self::register) from a request body, with a fresh id.
    pub async fn register_request(&self, request: RegisterRequest) -> ServiceResult<Uuid> {
        let id = Uuid::new_v4();
        let role = request.role.as_deref().unwrap_or(USER);
        self.register(id, &request.email, &request.name, &request.password, role)
            .await?;
        Ok(id)
    }

    /// Issues a token for `role`, matched ignoring ASCII case.
    ///
    /// Unknown email, wrong password and a role the user doesn't hold all
    /// fail with the same `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str, role: &str) -> ServiceResult<JwtDto> {
        let Some(user) = self.users.get_user_by_email(email).await? else {
            warn!("Login rejected: unknown email");
            return Err(CoreError::InvalidCredentials.into());
        };

        if !verify_password(user.password(), password) {
            warn!(user_id = %user.id(), "Login rejected: password mismatch");
            return Err(CoreError::InvalidCredentials.into());
        }

        // Role names match like the repository lookups; the token carries the stored name
        let Some(held) = user.find_role(role) else {
            warn!(user_id = %user.id(), role = %role, "Login rejected: role not held");
            return Err(CoreError::InvalidCredentials.into());
        };

        let jwt = self.jwt.create_token(user.id(), held.name())?;
        info!(user_id = %user.id(), role = %held.name(), "User logged in");
        Ok(jwt)
    }

    pub async fn login_request(&self, request: LoginRequest) -> ServiceResult<JwtDto> {
        self.login(&request.email, &request.password, &request.role).await
    }

    pub async fn get_account(&self, id: Uuid) -> ServiceResult<AccountDto> {
        let user = self
            .users
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))?;

        Ok(AccountDto::from(&user))
    }
}

//! # User Repository (SQLite)
//!
//! Users, roles and the `user_roles` link table.
//!
//! Roles are loaded with a separate query per user, so a user with no roles
//! still comes back.

use async_trait::async_trait;
use prodman_core::{Role, User};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::UserRepository;
use crate::error::{DbError, DbResult};

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    password: String,
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: String,
    name: String,
}

impl TryFrom<RoleRow> for Role {
    type Error = DbError;

    fn try_from(row: RoleRow) -> DbResult<Self> {
        let id = Uuid::parse_str(&row.id).map_err(|e| DbError::corrupt("Role", e))?;
        Role::with_id(id, &row.name).map_err(|e| DbError::corrupt("Role", e))
    }
}

/// SQLite-backed [`UserRepository`].
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteUserRepository { pool }
    }

    async fn roles_of(&self, user_id: &str) -> DbResult<Vec<Role>> {
        let rows: Vec<RoleRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.name
            FROM roles r
            INNER JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = ?1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Role::try_from).collect()
    }

    async fn hydrate(&self, row: UserRow) -> DbResult<User> {
        let id = Uuid::parse_str(&row.id).map_err(|e| DbError::corrupt("User", e))?;
        let mut user = User::new(id, &row.email, &row.name, &row.password)
            .map_err(|e| DbError::corrupt("User", e))?;

        for role in self.roles_of(&row.id).await? {
            user.add_role(role)?;
        }

        Ok(user)
    }

    async fn fetch_user(&self, column: &str, value: &str) -> DbResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT id, email, name, password FROM users WHERE {column} = ?1"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn fetch_role(&self, column: &str, value: &str) -> DbResult<Option<Role>> {
        let row: Option<RoleRow> =
            sqlx::query_as(&format!("SELECT id, name FROM roles WHERE {column} = ?1"))
                .bind(value)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Role::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn get_user_by_id(&self, id: Uuid) -> DbResult<Option<User>> {
        self.fetch_user("id", &id.to_string()).await
    }

    async fn get_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        // users.email is COLLATE NOCASE
        self.fetch_user("email", email).await
    }

    async fn add_user(&self, user: &User) -> DbResult<()> {
        let user_id = user.id().to_string();
        debug!(user_id = %user_id, "Inserting user");

        sqlx::query("INSERT INTO users (id, email, name, password) VALUES (?1, ?2, ?3, ?4)")
            .bind(&user_id)
            .bind(user.email())
            .bind(user.name())
            .bind(user.password())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DbError::from(e).with_unique_value(&[
                    ("users.id", user_id.as_str()),
                    ("users.email", user.email()),
                    ("users.name", user.name()),
                ])
            })?;

        for role in user.roles() {
            let stored = match self.get_role_by_name(role.name()).await? {
                Some(stored) => stored,
                None => {
                    self.add_role(role).await?;
                    role.clone()
                }
            };

            sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES (?1, ?2)")
                .bind(&user_id)
                .bind(stored.id().to_string())
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    async fn get_role_by_id(&self, id: Uuid) -> DbResult<Option<Role>> {
        self.fetch_role("id", &id.to_string()).await
    }

    async fn get_role_by_name(&self, name: &str) -> DbResult<Option<Role>> {
        // roles.name is COLLATE NOCASE
        self.fetch_role("name", name).await
    }

    async fn add_role(&self, role: &Role) -> DbResult<()> {
        debug!(role = %role.name(), "Inserting role");

        sqlx::query("INSERT INTO roles (id, name) VALUES (?1, ?2)")
            .bind(role.id().to_string())
            .bind(role.name())
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from(e).with_unique_value(&[("roles.name", role.name())]))?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

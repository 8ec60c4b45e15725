use async_trait::async_trait;
use sqlx::PgPool;
use tavolo_core::identity::{User, UserRepository, UserType};
use tavolo_core::CoreError;
use tavolo_shared::pii::Masked;
use uuid::Uuid;

use crate::map_db_err;

pub struct StoreUserRepository {
    pool: PgPool,
}

impl StoreUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    user_type: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, CoreError> {
        let user_type = UserType::parse(&self.user_type).ok_or_else(|| {
            CoreError::InternalError(format!("unknown user_type in row: {}", self.user_type))
        })?;
        Ok(User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: Masked(self.password_hash),
            user_type,
            created_at: self.created_at,
        })
    }
}

const SELECT_USER: &str =
    "SELECT id, username, email, password_hash, user_type, created_at FROM users";

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn create_user(
        &self,
        user: &User,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, user_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.password_hash.inner())
        .bind(user.user_type.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose().map_err(Into::into)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose().map_err(Into::into)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE username = $1", SELECT_USER))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose().map_err(Into::into)
    }
}

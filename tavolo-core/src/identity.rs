use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tavolo_shared::pii::Masked;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Customer,
    Owner,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "customer",
            UserType::Owner => "owner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(UserType::Customer),
            "owner" => Some(UserType::Owner),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account. The password hash is wrapped so it never leaks
/// through Debug formatting in logs.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Masked<String>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String, user_type: UserType) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: Masked(password_hash),
            user_type,
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for account data access
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(
        &self,
        user: &User,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>>;
}

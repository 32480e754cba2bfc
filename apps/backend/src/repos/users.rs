//! Credential store: user records behind a trait so the document database can
//! be swapped for the in-process store used in development and tests.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::error::AppError;

/// Gravatar URL for `email` at 200px, PG rating, falling back to the
/// "mystery person" image. `email` must already be normalized.
pub fn gravatar_url(email: &str) -> String {
    format!(
        "//www.gravatar.com/avatar/{:x}?s=200&r=pg&d=mm",
        md5::compute(email.as_bytes())
    )
}

/// Stored user record. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// Fields required to create a user. `email` must already be normalized.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("a user with this email already exists")]
    EmailTaken,
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EmailTaken => AppError::UserExists,
            StoreError::Unavailable(detail) => AppError::internal(detail),
        }
    }
}

#[async_trait]
pub trait UserStore: fmt::Debug + Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Look up by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user, failing with [`StoreError::EmailTaken`] if the email is in use.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
}

/// In-process store keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        // Uniqueness check and insert happen under one write lock.
        let mut users = self.users.write();
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            avatar: gravatar_url(&new_user.email),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            date: OffsetDateTime::now_utc(),
        };
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}

/// Trim, NFKC-normalize and lowercase an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

//! Account entity and its transfer object.
//!
//! `Account` mirrors a row of the `accounts` table. `AccountDto` is what the
//! service accepts from and hands back to callers; its credential fields are
//! input-only and never serialized.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A persisted account.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Account {
    /// Assigned by storage on first save; `None` until then.
    pub id: Option<i64>,
    pub username: String,
    /// Encoded credential. Never holds plaintext.
    pub password_hash: String,
}

/// External projection of an [`Account`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AccountDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Username must be between 1-255 characters"
    ))]
    pub username: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    #[serde(default, skip_serializing)]
    pub password_confirmation: Option<String>,
}

impl AccountDto {
    /// Convenience constructor for a create/update request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            id: None,
            username: username.into(),
            password_confirmation: Some(password.clone()),
            password: Some(password),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

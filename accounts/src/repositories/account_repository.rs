//! Persistence for accounts.
//!
//! [`AccountRepository`] is the seam the service depends on;
//! [`SqliteAccountRepository`] is the SQLite implementation.

use crate::database::models::Account;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Storage operations for the Account entity.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// `Some(Account)` if an account has this id, `None` otherwise.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>>;

    /// `Some(Account)` if an account has this username, `None` otherwise.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// All accounts, in storage order.
    async fn find_all(&self) -> Result<Vec<Account>>;

    /// Inserts the account when it has no id yet, otherwise updates it.
    /// Returns the stored row.
    async fn save(&self, account: Account) -> Result<Account>;

    async fn delete(&self, account: &Account) -> Result<()>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> SqliteAccountRepository<'a> {
    /// Creates a new SqliteAccountRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl<'a> AccountRepository for SqliteAccountRepository<'a> {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password_hash FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password_hash FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    async fn find_all(&self) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, username, password_hash FROM accounts ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(accounts)
    }

    async fn save(&self, account: Account) -> Result<Account> {
        let saved = match account.id {
            None => {
                sqlx::query_as::<_, Account>(
                    r#"
                    INSERT INTO accounts (username, password_hash)
                    VALUES (?, ?)
                    RETURNING id, username, password_hash
                    "#,
                )
                .bind(&account.username)
                .bind(&account.password_hash)
                .fetch_one(self.pool)
                .await?
            }
            Some(id) => sqlx::query_as::<_, Account>(
                r#"
                UPDATE accounts SET username = ?, password_hash = ?
                WHERE id = ?
                RETURNING id, username, password_hash
                "#,
            )
            .bind(&account.username)
            .bind(&account.password_hash)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .with_context(|| format!("Account {id} does not exist"))?,
        };

        Ok(saved)
    }

    async fn delete(&self, account: &Account) -> Result<()> {
        let id = account
            .id
            .ok_or_else(|| anyhow!("Cannot delete an account that was never saved"))?;

        sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

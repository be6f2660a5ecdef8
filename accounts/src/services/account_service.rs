//! Account business logic service.
//!
//! Enforces username uniqueness, credential confirmation and existence
//! checks before anything is written, and turns absence or conflict into a
//! typed [`ServiceError`].

use crate::database::models::{Account, AccountDto};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::AccountRepository;
use crate::utils::encoder::CredentialEncoder;
use crate::utils::mapper::AccountMapping;
use tracing::{debug, info, warn};
use validator::Validate;

/// Service layer for account operations.
///
/// Holds no state of its own between calls; the repository is the only
/// source of truth.
pub struct AccountService<R, M, E> {
    repository: R,
    mapper: M,
    encoder: E,
}

impl<R, M, E> AccountService<R, M, E>
where
    R: AccountRepository,
    M: AccountMapping,
    E: CredentialEncoder,
{
    /// Creates a new AccountService instance.
    ///
    /// # Arguments
    /// * `repository` - Account storage
    /// * `mapper` - Entity/transfer object conversion
    /// * `encoder` - One-way credential encoder
    pub fn new(repository: R, mapper: M, encoder: E) -> Self {
        Self {
            repository,
            mapper,
            encoder,
        }
    }

    /// Retrieves an account by ID.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if no account has this id
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<AccountDto> {
        let account = self.load(id).await?;
        Ok(self.mapper.to_dto(&account))
    }

    /// Retrieves an account by username.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if no account has this username
    pub async fn get_by_username(&self, username: &str) -> ServiceResult<AccountDto> {
        debug!(username, "Looking up account by username");

        let Some(account) = self.repository.find_by_username(username).await? else {
            warn!(username, "Account not found");
            return Err(ServiceError::not_found("Account", username));
        };

        Ok(self.mapper.to_dto(&account))
    }

    /// Lists every account in the order storage returns them.
    pub async fn get_all(&self) -> ServiceResult<Vec<AccountDto>> {
        let accounts = self.repository.find_all().await?;
        debug!(count = accounts.len(), "Loaded accounts");

        Ok(self.mapper.to_dtos(&accounts))
    }

    /// Creates a new account.
    ///
    /// # Arguments
    /// * `dto` - Username, plaintext password and its confirmation
    ///
    /// # Returns
    /// The stored account with its assigned id
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Invalid fields, a missing password or a confirmation mismatch
    ///   (`InvalidState`), checked before storage is touched
    /// - A username that is already taken (`DuplicateResource`)
    pub async fn create(&self, dto: AccountDto) -> ServiceResult<AccountDto> {
        dto.validate().map_err(ServiceError::from_validation)?;
        let password = Self::confirmed_password(&dto)?;

        if self
            .repository
            .find_by_username(&dto.username)
            .await?
            .is_some()
        {
            warn!(username = %dto.username, "Rejected account creation: username taken");
            return Err(ServiceError::duplicate_resource(&dto.username));
        }

        let password_hash = self.encoder.encode(password)?;

        let mut account = self.mapper.to_entity(&dto);
        // Storage assigns the id of a new account.
        account.id = None;
        account.password_hash = password_hash;

        let saved = self.repository.save(account).await?;
        info!(id = ?saved.id, username = %saved.username, "Account created");

        Ok(self.mapper.to_dto(&saved))
    }

    /// Updates the username and password of an existing account.
    ///
    /// The password is re-encoded on every call, so callers that only rename
    /// an account must still resupply the current password.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Invalid fields or a missing id (`InvalidState`)
    /// - An unknown id (`NotFound`), checked before uniqueness
    /// - A new username owned by another account (`DuplicateResource`)
    /// - A missing password (`InvalidState`)
    pub async fn update(&self, dto: AccountDto) -> ServiceResult<AccountDto> {
        dto.validate().map_err(ServiceError::from_validation)?;
        let id = dto
            .id
            .ok_or_else(|| ServiceError::invalid_state("Account id is required"))?;

        let existing = self.load(id).await?;

        if dto.username != existing.username {
            let taken = self
                .repository
                .find_by_username(&dto.username)
                .await?
                .is_some_and(|owner| owner.id != existing.id);

            if taken {
                warn!(id, username = %dto.username, "Rejected account update: username taken");
                return Err(ServiceError::duplicate_resource(&dto.username));
            }
        }

        let mut account = self.mapper.to_entity(&dto);
        account.id = existing.id;

        let password = dto
            .password
            .as_deref()
            .ok_or_else(|| ServiceError::invalid_state("Password is required"))?;
        account.password_hash = self.encoder.encode(password)?;

        let saved = self.repository.save(account).await?;
        info!(id, username = %saved.username, "Account updated");

        Ok(self.mapper.to_dto(&saved))
    }

    /// Deletes an account.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if no account has this id
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let account = self.load(id).await?;

        self.repository.delete(&account).await?;
        info!(id, "Account deleted");

        Ok(())
    }

    async fn load(&self, id: i64) -> ServiceResult<Account> {
        debug!(id, "Looking up account by id");

        self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!(id, "Account not found");
            ServiceError::not_found("Account", id)
        })
    }

    /// Returns the plaintext password once it is present and confirmed.
    fn confirmed_password(dto: &AccountDto) -> ServiceResult<&str> {
        let password = dto
            .password
            .as_deref()
            .ok_or_else(|| ServiceError::invalid_state("Password is required"))?;

        match dto.password_confirmation.as_deref() {
            Some(confirmation) if confirmation == password => Ok(password),
            _ => Err(ServiceError::invalid_state("Passwords do not match")),
        }
    }
}

//! Conversion between [`Account`] entities and [`AccountDto`] transfer objects.

use crate::database::models::{Account, AccountDto};

pub trait AccountMapping: Send + Sync {
    /// Projects an entity for callers. Credential fields are left empty.
    fn to_dto(&self, account: &Account) -> AccountDto;

    /// Maps a sequence, preserving order.
    fn to_dtos(&self, accounts: &[Account]) -> Vec<AccountDto> {
        accounts.iter().map(|account| self.to_dto(account)).collect()
    }

    /// Builds an entity from caller input. `password_hash` is left empty for
    /// the service to fill with the encoded credential.
    fn to_entity(&self, dto: &AccountDto) -> Account;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccountMapper;

impl AccountMapping for AccountMapper {
    fn to_dto(&self, account: &Account) -> AccountDto {
        AccountDto {
            id: account.id,
            username: account.username.clone(),
            password: None,
            password_confirmation: None,
        }
    }

    fn to_entity(&self, dto: &AccountDto) -> Account {
        Account {
            id: dto.id,
            username: dto.username.clone(),
            password_hash: String::new(),
        }
    }
}

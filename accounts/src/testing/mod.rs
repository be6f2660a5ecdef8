//! In-memory collaborators for service tests.
//!
//! Each double shares its state through an `Arc`, so a test can keep a clone
//! and inspect the recorded calls after handing the original to the service.

use crate::database::models::{Account, AccountDto};
use crate::repositories::account_repository::AccountRepository;
use crate::utils::encoder::{CredentialEncoder, EncodeError};
use crate::utils::mapper::{AccountMapper, AccountMapping};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

/// A repository call as observed by [`InMemoryAccountRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCall {
    FindById(i64),
    FindByUsername(String),
    FindAll,
    Save(Account),
    Delete(Account),
}

#[derive(Default)]
struct RepoState {
    rows: Vec<Account>,
    calls: Vec<RepoCall>,
    failure: Option<String>,
}

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    state: Arc<Mutex<RepoState>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. Rows keep the given order.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let repo = Self::new();
        repo.state.lock().unwrap().rows.extend(accounts);
        repo
    }

    /// Every subsequent call fails with `message`.
    pub fn failing(message: &str) -> Self {
        let repo = Self::new();
        repo.state.lock().unwrap().failure = Some(message.to_string());
        repo
    }

    pub fn rows(&self) -> Vec<Account> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn calls(&self) -> Vec<RepoCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, matches: impl Fn(&RepoCall) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    pub fn saves(&self) -> Vec<Account> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RepoCall::Save(account) => Some(account),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<Account> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RepoCall::Delete(account) => Some(account),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RepoCall) -> Result<MutexGuard<'_, RepoState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some(message) = &state.failure {
            bail!("{message}");
        }
        Ok(state)
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>> {
        let state = self.record(RepoCall::FindById(id))?;
        Ok(state.rows.iter().find(|a| a.id == Some(id)).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let state = self.record(RepoCall::FindByUsername(username.to_string()))?;
        Ok(state.rows.iter().find(|a| a.username == username).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>> {
        let state = self.record(RepoCall::FindAll)?;
        Ok(state.rows.clone())
    }

    async fn save(&self, account: Account) -> Result<Account> {
        let mut state = self.record(RepoCall::Save(account.clone()))?;
        match account.id {
            None => {
                let next_id = state.rows.iter().filter_map(|a| a.id).max().unwrap_or(0) + 1;
                let saved = Account {
                    id: Some(next_id),
                    ..account
                };
                state.rows.push(saved.clone());
                Ok(saved)
            }
            Some(id) => {
                let row = state
                    .rows
                    .iter_mut()
                    .find(|a| a.id == Some(id))
                    .ok_or_else(|| anyhow!("Account {id} does not exist"))?;
                *row = account.clone();
                Ok(account)
            }
        }
    }

    async fn delete(&self, account: &Account) -> Result<()> {
        let mut state = self.record(RepoCall::Delete(account.clone()))?;
        state.rows.retain(|a| a.id != account.id);
        Ok(())
    }
}

/// Wraps [`AccountMapper`] and counts how often each conversion runs.
#[derive(Clone, Default)]
pub struct RecordingMapper {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingMapper {
    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|&&call| call == name)
            .count()
    }

    pub fn total(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl AccountMapping for RecordingMapper {
    fn to_dto(&self, account: &Account) -> AccountDto {
        self.calls.lock().unwrap().push("to_dto");
        AccountMapper.to_dto(account)
    }

    fn to_dtos(&self, accounts: &[Account]) -> Vec<AccountDto> {
        self.calls.lock().unwrap().push("to_dtos");
        AccountMapper.to_dtos(accounts)
    }

    fn to_entity(&self, dto: &AccountDto) -> Account {
        self.calls.lock().unwrap().push("to_entity");
        AccountMapper.to_entity(dto)
    }
}

/// Deterministic encoder: `"password"` becomes `"encoded:password"`.
#[derive(Clone, Default)]
pub struct PrefixEncoder {
    inputs: Arc<Mutex<Vec<String>>>,
    broken: bool,
}

impl PrefixEncoder {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// Plaintexts passed to `encode`, in call order.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

impl CredentialEncoder for PrefixEncoder {
    fn encode(&self, raw: &str) -> Result<String, EncodeError> {
        self.inputs.lock().unwrap().push(raw.to_string());
        if self.broken {
            return Err(EncodeError::Hashing("encoder unavailable".to_string()));
        }
        Ok(format!("encoded:{raw}"))
    }
}

pub fn account(id: i64, username: &str, password_hash: &str) -> Account {
    Account {
        id: Some(id),
        username: username.to_string(),
        password_hash: password_hash.to_string(),
    }
}

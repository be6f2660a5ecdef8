//! Account management core.
//!
//! [`services::account_service::AccountService`] owns the business rules for
//! creating, reading, updating and deleting accounts. Storage, mapping and
//! credential encoding are injected through the traits in
//! [`repositories::account_repository`], [`utils::mapper`] and
//! [`utils::encoder`].

pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

#[cfg(test)]
mod testing;

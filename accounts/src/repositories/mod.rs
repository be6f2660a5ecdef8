//! Data access layer.

pub mod account_repository;

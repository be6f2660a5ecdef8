//! One-way credential encoding.
//!
//! ## Usage
//!
//! ```rust
//! use accounts::utils::encoder::{BcryptEncoder, CredentialEncoder};
//!
//! let encoder = BcryptEncoder::new(4);
//! let hash = encoder.encode("secret data").unwrap();
//! assert_ne!(hash, "secret data");
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Turns a plaintext credential into its stored representation.
///
/// Implementations must not be reversible.
pub trait CredentialEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> Result<String, EncodeError>;
}

/// bcrypt-backed encoder. Every call uses a fresh salt.
#[derive(Debug, Clone, Copy)]
pub struct BcryptEncoder {
    cost: u32,
}

impl BcryptEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptEncoder {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl CredentialEncoder for BcryptEncoder {
    fn encode(&self, raw: &str) -> Result<String, EncodeError> {
        bcrypt::hash(raw, self.cost).map_err(|e| EncodeError::Hashing(e.to_string()))
    }
}

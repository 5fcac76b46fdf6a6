//! Password hashing utilities using bcrypt.
//!
//! Hashing at cost 12 takes a noticeable slice of CPU time, so request
//! handlers go through the `*_async` variants which run on tokio's blocking
//! pool.

use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt work factor used for every new hash.
pub const HASH_COST: u32 = 12;

/// Hashes a password using bcrypt with a fresh random salt.
///
/// # Errors
///
/// Returns an internal error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against a bcrypt hash.
///
/// # Errors
///
/// Returns an internal error if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

pub async fn hash_password_async(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

pub async fn verify_password_async(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?
}

/// Password carried by an account on its way to the store.
///
/// Only a `Plaintext` value is ever hashed, and only once, so re-saving an
/// account with an already hashed password leaves the hash untouched.
#[derive(Clone, PartialEq, Eq)]
pub enum Password {
    Plaintext(String),
    Hashed(String),
}

impl Password {
    /// Resolves to the hash that gets persisted.
    pub async fn into_hash(self) -> Result<String, AppError> {
        match self {
            Self::Plaintext(plain) => hash_password_async(plain).await,
            Self::Hashed(hash) => Ok(hash),
        }
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plaintext(_) => f.write_str("Password::Plaintext(***)"),
            Self::Hashed(_) => f.write_str("Password::Hashed(***)"),
        }
    }
}

//! Errors shared by the settings store and the password policy.
use thiserror::Error;

use crate::passwords::PasswordRule;

/// Errors returned when reading or changing the database configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A policy threshold was set below its floor.
    #[error("The {setting} must be at least {floor}, got {value}")]
    InvalidArgument {
        setting: &'static str,
        floor: usize,
        value: usize,
    },
    /// A password broke the secure password policy.
    #[error("Invalid password: {0}")]
    InvalidPassword(PasswordRule),
    /// No password was given where one is required.
    #[error("A password must be provided")]
    MissingPassword,
    #[error("Unknown setting key: {0}")]
    UnknownKey(String),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error(transparent)]
    Hashing(#[from] HashingError),
    /// The docker secret holding the password could not be read.
    #[error("Failed to read docker secret {name}")]
    Secret {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by the Argon2 hashing backend.
#[derive(Debug, Error)]
pub enum HashingError {
    #[error(transparent)]
    Params(#[from] argon2::Error),
    #[error(transparent)]
    Hash(#[from] argon2::password_hash::Error),
}

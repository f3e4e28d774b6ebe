//! Configuration for an embedded database access layer: where the database
//! lives, who owns it, and how its password is stored.
//!
//! With secure passwords turned on, passwords must satisfy a configurable
//! complexity policy and only their one-way Argon2id hash is kept.
//!
//! ```no_run
//! use dbconfig::DbConfig;
//!
//! let mut config = DbConfig::from_env()?;
//! config.turn_on_secure_passwords();
//! config.set_password("LongEnough1!")?;
//! assert!(config.secure_password_matches("LongEnough1!"));
//! # Ok::<(), dbconfig::ConfigError>(())
//! ```
pub mod config;
pub mod constants;
pub mod errors;
pub mod passwords;

pub use config::{DbConfig, SecurityMode, SettingKey};
pub use errors::{ConfigError, HashingError};
pub use passwords::{
    hashing::{Argon2Hasher, PasswordHasher},
    CharClass, CharacterCounts, PasswordPolicy, PasswordRule,
};

//! Building a `DbConfig` from environment variables and docker secrets.
use std::path::Path;

use log::debug;

use super::{DbConfig, SettingKey};
use crate::{
    constants::{
        db::{
            DB_CREATE_VAR, DB_NAME_VAR, DB_PASSWORD_DOCKER_SECRET_VAR, DB_PASSWORD_MIN_DIGITS_VAR,
            DB_PASSWORD_MIN_LENGTH_VAR, DB_PASSWORD_MIN_SYMBOLS_VAR,
            DB_PASSWORD_MIN_UPPERCASE_VAR, DB_PASSWORD_VAR, DB_PATH_VAR,
            DB_SECURE_PASSWORDS_VAR, DB_USER_VAR,
        },
        secrets::{read_secret, DOCKER_SECRETS_PATH},
    },
    errors::ConfigError,
    passwords::hashing::{Argon2Hasher, PasswordHasher},
};

/// Variables applied before the password, so a password given alongside
/// `DB_SECURE_PASSWORDS=true` is checked against the configured policy.
const ENV_SETTINGS: [(&str, SettingKey); 9] = [
    (DB_NAME_VAR, SettingKey::DatabaseName),
    (DB_PATH_VAR, SettingKey::DatabasePath),
    (DB_USER_VAR, SettingKey::DatabaseUser),
    (DB_CREATE_VAR, SettingKey::Create),
    (DB_PASSWORD_MIN_LENGTH_VAR, SettingKey::MinPasswordLength),
    (DB_PASSWORD_MIN_SYMBOLS_VAR, SettingKey::MinSymbolCount),
    (DB_PASSWORD_MIN_DIGITS_VAR, SettingKey::MinDigitCount),
    (DB_PASSWORD_MIN_UPPERCASE_VAR, SettingKey::MinUppercaseCount),
    (DB_SECURE_PASSWORDS_VAR, SettingKey::SecurePasswords),
];

impl DbConfig {
    /// Build a configuration from the process environment. Unset variables
    /// keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(Argon2Hasher, |name| std::env::var(name).ok())
    }
}

impl<H: PasswordHasher> DbConfig<H> {
    /// Build a configuration from the variables `lookup` returns, reading
    /// docker secrets from the standard secrets directory.
    pub fn from_lookup<F>(hasher: H, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load(hasher, lookup, Path::new(DOCKER_SECRETS_PATH))
    }

    fn load<F>(hasher: H, lookup: F, secrets_dir: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(hasher);
        for (var, key) in ENV_SETTINGS {
            if let Some(value) = lookup(var) {
                debug!("Applying {var} to {key}");
                config.apply(key, &value)?;
            }
        }
        if let Some(password) = lookup(DB_PASSWORD_VAR) {
            config.set_password(password.as_str())?;
        } else if let Some(name) = lookup(DB_PASSWORD_DOCKER_SECRET_VAR) {
            let password = read_secret(secrets_dir, &name)
                .map_err(|source| ConfigError::Secret { name, source })?;
            config.set_password(password.as_str())?;
        }
        Ok(config)
    }
}

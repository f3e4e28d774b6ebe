//! String view of the settings, keyed by dotted property names. Values are
//! parsed once when written and go through the same checks as the typed
//! setters.
use core::{fmt, str::FromStr};

use super::{DbConfig, SecurityMode};
use crate::{errors::ConfigError, passwords::hashing::PasswordHasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    DatabaseName,
    DatabasePath,
    DatabaseUser,
    DatabasePassword,
    Create,
    SecurePasswords,
    MinPasswordLength,
    MinSymbolCount,
    MinDigitCount,
    MinUppercaseCount,
}

impl SettingKey {
    pub const ALL: [Self; 10] = [
        Self::DatabaseName,
        Self::DatabasePath,
        Self::DatabaseUser,
        Self::DatabasePassword,
        Self::Create,
        Self::SecurePasswords,
        Self::MinPasswordLength,
        Self::MinSymbolCount,
        Self::MinDigitCount,
        Self::MinUppercaseCount,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DatabaseName => "db.name",
            Self::DatabasePath => "db.path",
            Self::DatabaseUser => "db.user",
            Self::DatabasePassword => "db.password",
            Self::Create => "db.create",
            Self::SecurePasswords => "db.secure.passwords",
            Self::MinPasswordLength => "db.secure.passwords.length",
            Self::MinSymbolCount => "db.secure.passwords.symbols",
            Self::MinDigitCount => "db.secure.passwords.numbers",
            Self::MinUppercaseCount => "db.secure.passwords.upper",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_owned()))
    }
}

fn parse_bool(key: SettingKey, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(invalid_value(key, value)),
    }
}

fn parse_count(key: SettingKey, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| invalid_value(key, value))
}

fn invalid_value(key: SettingKey, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.as_str(),
        value: value.to_owned(),
    }
}

impl<H: PasswordHasher> DbConfig<H> {
    /// The string form of a setting.
    pub fn setting(&self, key: SettingKey) -> String {
        match key {
            SettingKey::DatabaseName => self.database_name.clone(),
            SettingKey::DatabasePath => self.database_path.display().to_string(),
            SettingKey::DatabaseUser => self.database_user.clone(),
            SettingKey::DatabasePassword => self.database_password.clone(),
            SettingKey::Create => self.create.to_string(),
            SettingKey::SecurePasswords => self.secure_passwords_enabled().to_string(),
            SettingKey::MinPasswordLength => self.min_password_length().to_string(),
            SettingKey::MinSymbolCount => self.min_symbol_count().to_string(),
            SettingKey::MinDigitCount => self.min_digit_count().to_string(),
            SettingKey::MinUppercaseCount => self.min_uppercase_count().to_string(),
        }
    }

    /// Parse `value` for `key` and store it through the typed setter.
    pub fn apply(&mut self, key: SettingKey, value: &str) -> Result<(), ConfigError> {
        match key {
            SettingKey::DatabaseName => self.set_database_name(value),
            SettingKey::DatabasePath => self.set_database_path(value),
            SettingKey::DatabaseUser => self.set_database_user(value),
            SettingKey::DatabasePassword => self.set_password(value)?,
            SettingKey::Create => self.set_create(parse_bool(key, value)?),
            SettingKey::SecurePasswords => {
                if parse_bool(key, value)? {
                    self.set_security_mode(SecurityMode::Secure);
                } else {
                    self.set_security_mode(SecurityMode::Insecure);
                }
            }
            SettingKey::MinPasswordLength => {
                self.set_min_password_length(parse_count(key, value)?)?;
            }
            SettingKey::MinSymbolCount => {
                self.set_min_symbol_count(parse_count(key, value)?)?;
            }
            SettingKey::MinDigitCount => {
                self.set_min_digit_count(parse_count(key, value)?)?;
            }
            SettingKey::MinUppercaseCount => {
                self.set_min_uppercase_count(parse_count(key, value)?)?;
            }
        }
        Ok(())
    }

    /// Look a setting up by its dotted name. Unknown names give `None`.
    pub fn property(&self, key: &str) -> Option<String> {
        key.parse::<SettingKey>().ok().map(|key| self.setting(key))
    }

    /// Set a setting by its dotted name.
    ///
    /// Thresholds are parsed as unsigned counts first: a value which is not
    /// a non-negative integer (`"ten"`, `"-1"`) fails with
    /// `ConfigError::InvalidValue`, while a count below the floor (`"0"`,
    /// `"7"` for the length) fails with `ConfigError::InvalidArgument`.
    pub fn set_property(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key.parse::<SettingKey>()?, value)
    }
}

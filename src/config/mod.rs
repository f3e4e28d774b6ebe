//! The database settings store. A `DbConfig` is owned by the application
//! which composes the database layer and handed to whatever needs it.
mod env;
pub mod properties;

use core::fmt;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::{
    constants::db::{DEFAULT_DB_CREATE, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD, DEFAULT_DB_USER},
    errors::{ConfigError, HashingError},
    passwords::{
        hashing::{Argon2Hasher, PasswordHasher},
        PasswordPolicy, PasswordRule,
    },
};

pub use properties::SettingKey;

/// How the database password is stored and compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecurityMode {
    /// The password is kept in clear text.
    #[default]
    Insecure,
    /// The password must satisfy the `PasswordPolicy` and only its one-way
    /// hash is kept.
    Secure,
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insecure => f.write_str("insecure"),
            Self::Secure => f.write_str("secure"),
        }
    }
}

/// The current user's home directory, or the working directory if the
/// platform cannot tell us.
fn default_database_path() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        warn!("Could not determine the home directory, defaulting the database path to '.'");
        PathBuf::from(".")
    })
}

/// Settings for the embedded database, including the secure password policy.
pub struct DbConfig<H = Argon2Hasher> {
    /// Name of the database, translated to a folder under `database_path`.
    database_name: String,
    database_path: PathBuf,
    database_user: String,
    /// Clear text in `Insecure` mode, a digest for passwords set in `Secure` mode.
    database_password: String,
    /// Set once a password replaces the default one.
    password_set: bool,
    /// Whether the database is created if it does not exist yet.
    create: bool,
    mode: SecurityMode,
    policy: PasswordPolicy,
    hasher: H,
}

impl<H> fmt::Debug for DbConfig<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("database_name", &self.database_name)
            .field("database_path", &self.database_path)
            .field("database_user", &self.database_user)
            .field("database_password", &"[REDACTED]")
            .field("create", &self.create)
            .field("mode", &self.mode)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::new(Argon2Hasher)
    }
}

impl<H: PasswordHasher> DbConfig<H> {
    /// Construct a configuration holding the defaults, hashing secure
    /// passwords with `hasher`.
    pub fn new(hasher: H) -> Self {
        Self {
            database_name: DEFAULT_DB_NAME.to_owned(),
            database_path: default_database_path(),
            database_user: DEFAULT_DB_USER.to_owned(),
            database_password: DEFAULT_DB_PASSWORD.to_owned(),
            password_set: false,
            create: DEFAULT_DB_CREATE,
            mode: SecurityMode::Insecure,
            policy: PasswordPolicy::default(),
            hasher,
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn set_database_name(&mut self, name: impl Into<String>) {
        self.database_name = name.into();
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn set_database_path(&mut self, path: impl Into<PathBuf>) {
        self.database_path = path.into();
    }

    pub fn database_user(&self) -> &str {
        &self.database_user
    }

    pub fn set_database_user(&mut self, user: impl Into<String>) {
        self.database_user = user.into();
    }

    /// The stored password: clear text, or the one-way hash of a password set
    /// while secure passwords were on.
    pub fn database_password(&self) -> &str {
        &self.database_password
    }

    pub const fn should_create(&self) -> bool {
        self.create
    }

    pub fn set_create(&mut self, create: bool) {
        self.create = create;
    }

    pub const fn security_mode(&self) -> SecurityMode {
        self.mode
    }

    pub fn secure_passwords_enabled(&self) -> bool {
        self.mode == SecurityMode::Secure
    }

    /// Require complex passwords and store only their hash from now on. The
    /// password already stored is left as it is.
    pub fn turn_on_secure_passwords(&mut self) {
        self.set_security_mode(SecurityMode::Secure);
    }

    /// Store passwords in clear text from now on. A hash stored while secure
    /// passwords were on cannot be reversed, so the password has to be set
    /// again.
    pub fn turn_off_secure_passwords(&mut self) {
        self.set_security_mode(SecurityMode::Insecure);
    }

    fn set_security_mode(&mut self, mode: SecurityMode) {
        if self.mode == mode {
            return;
        }
        if self.stored_password_needs_reset() {
            warn!("Switching to {mode} passwords; the stored database password is not converted");
        }
        debug!("Secure passwords mode changed from {} to {mode}", self.mode);
        self.mode = mode;
    }

    /// Whether a password set by the caller is stored, and so would have to
    /// be set again after a mode change. The default password does not count.
    pub const fn stored_password_needs_reset(&self) -> bool {
        self.password_set && !self.database_password.is_empty()
    }

    pub const fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    pub const fn min_password_length(&self) -> usize {
        self.policy.min_length()
    }

    pub fn set_min_password_length(&mut self, minimum: usize) -> Result<(), ConfigError> {
        self.policy.set_min_length(minimum)
    }

    pub const fn min_symbol_count(&self) -> usize {
        self.policy.min_symbols()
    }

    pub fn set_min_symbol_count(&mut self, minimum: usize) -> Result<(), ConfigError> {
        self.policy.set_min_symbols(minimum)
    }

    pub const fn min_digit_count(&self) -> usize {
        self.policy.min_digits()
    }

    pub fn set_min_digit_count(&mut self, minimum: usize) -> Result<(), ConfigError> {
        self.policy.set_min_digits(minimum)
    }

    pub const fn min_uppercase_count(&self) -> usize {
        self.policy.min_uppercase()
    }

    pub fn set_min_uppercase_count(&mut self, minimum: usize) -> Result<(), ConfigError> {
        self.policy.set_min_uppercase(minimum)
    }

    /// Hash `secret` with the salt derived from its length.
    fn digest(&self, secret: &str, length: usize) -> Result<String, HashingError> {
        let salt = self.hasher.generate_salt(length)?;
        self.hasher.hash_password(secret, &salt)
    }

    /// Store a new database password.
    ///
    /// With secure passwords off the candidate is stored verbatim, including
    /// an empty one. With secure passwords on it must satisfy the policy, and
    /// only its hash is stored. A rejected password leaves the stored one
    /// unchanged.
    pub fn set_password<'a>(
        &mut self,
        candidate: impl Into<Option<&'a str>>,
    ) -> Result<(), ConfigError> {
        let candidate: Option<&str> = candidate.into();
        match self.mode {
            SecurityMode::Insecure => {
                let secret = candidate.ok_or(ConfigError::MissingPassword)?;
                secret.clone_into(&mut self.database_password);
            }
            SecurityMode::Secure => {
                let secret = candidate.ok_or(ConfigError::InvalidPassword(PasswordRule::Length))?;
                let counts = self.policy.validate(secret)?;
                self.database_password = self.digest(secret, counts.length)?;
            }
        }
        self.password_set = true;
        debug!("Database password updated ({} mode)", self.mode);
        Ok(())
    }

    /// Check a clear-text candidate against the stored hash. Meant for use
    /// while secure passwords are on.
    ///
    /// Missing, empty and whitespace-only candidates never match. This never
    /// fails: a hashing error is logged and treated as a mismatch.
    pub fn secure_password_matches<'a>(&self, candidate: impl Into<Option<&'a str>>) -> bool {
        let candidate: Option<&str> = candidate.into();
        let Some(secret) = candidate.filter(|s| !s.trim().is_empty()) else {
            return false;
        };
        match self.digest(secret, secret.chars().count()) {
            Ok(digest) => digest == self.database_password,
            Err(err) => {
                warn!("Failed to hash candidate password for comparison: {err}");
                false
            }
        }
    }

    /// Case-sensitive comparison of a candidate with the stored clear-text
    /// password. Meant for use while secure passwords are off.
    pub fn password_matches<'a>(
        &self,
        candidate: impl Into<Option<&'a str>>,
    ) -> Result<bool, ConfigError> {
        let candidate: Option<&str> = candidate.into();
        let secret = candidate.ok_or(ConfigError::MissingPassword)?;
        Ok(secret == self.database_password)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::Cell;

    /// Reversible stand-in for Argon2 which counts how often it is called.
    #[derive(Default)]
    pub(crate) struct CountingHasher {
        pub(crate) calls: Cell<usize>,
    }

    impl PasswordHasher for CountingHasher {
        fn generate_salt(&self, length: usize) -> Result<String, HashingError> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("salt{length}"))
        }

        fn hash_password(&self, candidate: &str, salt: &str) -> Result<String, HashingError> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("{salt}${}", candidate.chars().rev().collect::<String>()))
        }
    }

    struct FailingHasher;

    impl PasswordHasher for FailingHasher {
        fn generate_salt(&self, _length: usize) -> Result<String, HashingError> {
            Err(argon2::password_hash::Error::Password.into())
        }

        fn hash_password(&self, _candidate: &str, _salt: &str) -> Result<String, HashingError> {
            Err(argon2::password_hash::Error::Password.into())
        }
    }

    fn secure_config() -> DbConfig<CountingHasher> {
        let mut config = DbConfig::new(CountingHasher::default());
        config.turn_on_secure_passwords();
        config
    }

    #[test]
    fn defaults() {
        let config = DbConfig::default();
        assert_eq!(config.database_name(), "sample.db");
        assert_eq!(config.database_user(), "app");
        assert_eq!(config.database_password(), "app");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.database_path(), home.as_path());
        }
        assert!(config.should_create());
        assert!(!config.secure_passwords_enabled());
        assert_eq!(config.security_mode(), SecurityMode::Insecure);
        assert_eq!(
            (
                config.min_password_length(),
                config.min_symbol_count(),
                config.min_digit_count(),
                config.min_uppercase_count()
            ),
            (10, 1, 1, 1)
        );
    }

    #[test]
    fn plain_settings_pass_through() {
        let mut config = DbConfig::default();
        config.set_database_name("orders.db");
        config.set_database_path("/var/lib/app");
        config.set_database_user("svc");
        config.set_create(false);
        assert_eq!(config.database_name(), "orders.db");
        assert_eq!(config.database_path(), Path::new("/var/lib/app"));
        assert_eq!(config.database_user(), "svc");
        assert!(!config.should_create());
    }

    #[test]
    fn insecure_password_is_stored_verbatim_and_case_sensitive() {
        let mut config = DbConfig::new(CountingHasher::default());
        config.set_password("anything").unwrap();
        assert_eq!(config.database_password(), "anything");
        assert!(config.password_matches("anything").unwrap());
        assert!(!config.password_matches("Anything").unwrap());
        assert_eq!(config.hasher.calls.get(), 0);
    }

    #[test]
    fn insecure_mode_accepts_empty_but_not_missing_password() {
        let mut config = DbConfig::new(CountingHasher::default());
        config.set_password("").unwrap();
        assert_eq!(config.database_password(), "");
        assert!(matches!(
            config.set_password(None::<&str>),
            Err(ConfigError::MissingPassword)
        ));
        assert!(matches!(
            config.password_matches(None::<&str>),
            Err(ConfigError::MissingPassword)
        ));
        assert!(config.password_matches("").unwrap());
    }

    #[test]
    fn secure_password_rules_with_defaults() {
        let mut config = secure_config();
        assert!(matches!(
            config.set_password("Short1!"),
            Err(ConfigError::InvalidPassword(PasswordRule::Length))
        ));
        assert!(matches!(
            config.set_password("longenough1!"),
            Err(ConfigError::InvalidPassword(PasswordRule::Uppercase))
        ));
        assert!(matches!(
            config.set_password(None::<&str>),
            Err(ConfigError::InvalidPassword(PasswordRule::Length))
        ));
        assert_eq!(config.database_password(), "app");
        assert_eq!(config.hasher.calls.get(), 0);

        config.set_password("LongEnough1!").unwrap();
        assert_eq!(config.database_password(), "salt12$!1hguonEgnoL");
    }

    #[test]
    fn secure_password_matches_recomputes_digest() {
        let mut config = secure_config();
        config.set_password("LongEnough1!").unwrap();
        assert!(config.secure_password_matches("LongEnough1!"));
        assert!(!config.secure_password_matches("LongEnough1!x"));
        assert!(!config.secure_password_matches("longEnough1!"));
    }

    #[test]
    fn blank_candidates_never_match_or_hash() {
        let config = secure_config();
        for candidate in [None, Some(""), Some("   \t\n")] {
            assert!(!config.secure_password_matches(candidate));
        }
        assert_eq!(config.hasher.calls.get(), 0);
    }

    #[test]
    fn rejected_password_keeps_previous_digest() {
        let mut config = secure_config();
        config.set_password("LongEnough1!").unwrap();
        let stored = config.database_password().to_owned();
        assert!(config.set_password("LONGENOUGH1!").is_err());
        assert_eq!(config.database_password(), stored);
        assert!(config.secure_password_matches("LongEnough1!"));
    }

    #[test]
    fn toggling_mode_leaves_stored_password_alone() {
        let mut config = DbConfig::new(CountingHasher::default());
        config.set_password("plain").unwrap();
        config.turn_on_secure_passwords();
        config.turn_on_secure_passwords();
        assert!(config.secure_passwords_enabled());
        assert_eq!(config.database_password(), "plain");

        config.set_password("LongEnough1!").unwrap();
        let digest = config.database_password().to_owned();
        config.turn_off_secure_passwords();
        assert!(!config.secure_passwords_enabled());
        assert_eq!(config.database_password(), digest);
        assert!(!config.password_matches("LongEnough1!").unwrap());
    }

    #[test]
    fn default_password_does_not_need_reset_on_toggle() {
        let mut config = DbConfig::new(CountingHasher::default());
        assert!(!config.stored_password_needs_reset());
        config.turn_on_secure_passwords();
        assert!(!config.stored_password_needs_reset());
        assert_eq!(config.database_password(), "app");

        config.set_password("LongEnough1!").unwrap();
        assert!(config.stored_password_needs_reset());
        config.turn_off_secure_passwords();
        assert!(config.stored_password_needs_reset());

        config.set_password("").unwrap();
        assert!(!config.stored_password_needs_reset());
    }

    #[test]
    fn rejected_password_does_not_mark_password_set() {
        let mut config = secure_config();
        assert!(config.set_password("Short1!").is_err());
        assert!(!config.stored_password_needs_reset());
    }

    #[test]
    fn threshold_setters_go_through_policy() {
        let mut config = DbConfig::new(CountingHasher::default());
        assert!(matches!(
            config.set_min_password_length(7),
            Err(ConfigError::InvalidArgument { floor: 8, value: 7, .. })
        ));
        for result in [
            config.set_min_symbol_count(0),
            config.set_min_digit_count(0),
            config.set_min_uppercase_count(0),
        ] {
            assert!(matches!(
                result,
                Err(ConfigError::InvalidArgument { floor: 1, value: 0, .. })
            ));
        }
        config.set_min_password_length(12).unwrap();
        config.set_min_digit_count(2).unwrap();
        assert_eq!(config.min_password_length(), 12);
        assert_eq!(config.min_digit_count(), 2);
        assert_eq!(config.policy().min_digits(), 2);

        config.turn_on_secure_passwords();
        assert!(matches!(
            config.set_password("LongEnough1!"),
            Err(ConfigError::InvalidPassword(PasswordRule::Digit))
        ));
        config.set_password("LongEnough12!").unwrap();
    }

    #[test]
    fn hashing_failures() {
        let mut config = DbConfig::new(FailingHasher);
        config.turn_on_secure_passwords();
        assert!(matches!(
            config.set_password("LongEnough1!"),
            Err(ConfigError::Hashing(_))
        ));
        assert_eq!(config.database_password(), "app");
        assert!(!config.secure_password_matches("LongEnough1!"));
    }

    #[test]
    fn argon2_round_trip() {
        let mut config = DbConfig::default();
        config.turn_on_secure_passwords();
        config.set_password("LongEnough1!").unwrap();
        assert!(config.database_password().starts_with("$argon2id$"));
        assert!(config.secure_password_matches("LongEnough1!"));
        assert!(!config.secure_password_matches("LongEnough1!x"));
    }

    #[test]
    fn debug_output_redacts_password() {
        let mut config = DbConfig::new(CountingHasher::default());
        config.set_password("hunter2").unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }
}

//! The secure password policy: configurable complexity thresholds and the
//! rules a candidate password is checked against before it is hashed.
pub mod hashing;

use core::fmt;

use log::debug;

use crate::{
    constants::passwords::{
        PASSWORD_DEFAULT_MIN_DIGITS, PASSWORD_DEFAULT_MIN_LENGTH, PASSWORD_DEFAULT_MIN_SYMBOLS,
        PASSWORD_DEFAULT_MIN_UPPERCASE, PASSWORD_MIN_COUNT_FLOOR, PASSWORD_MIN_LENGTH_FLOOR,
        PASSWORD_REQUIRED_LOWERCASE,
    },
    errors::ConfigError,
};

/// A single complexity rule. Rules are evaluated in declaration order and the
/// first one broken is the one reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    /// The password is missing or shorter than the minimum length.
    Length,
    /// Too few characters which are neither letters nor digits.
    Symbol,
    /// Too few digits.
    Digit,
    /// No lowercase letter.
    Lowercase,
    /// Too few uppercase letters.
    Uppercase,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let requirement = match self {
            Self::Length => "must be present and meet the minimum length",
            Self::Symbol => "must contain enough symbols",
            Self::Digit => "must contain enough numbers",
            Self::Lowercase => "must contain at least one lowercase letter",
            Self::Uppercase => "must contain enough uppercase letters",
        };
        write!(f, "secure passwords {requirement}")
    }
}

/// The class a single character is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
    /// A letter without case (e.g. most CJK ideographs). Counted nowhere.
    Uncased,
}

impl CharClass {
    /// Classify `c`, checking uppercase, then lowercase, then digit. Only the
    /// ASCII digits `0`-`9` are digits; anything which is neither a letter
    /// nor a digit (fractions, superscripts, other scripts' digits) is a
    /// symbol.
    pub fn of(c: char) -> Self {
        if c.is_uppercase() {
            Self::Uppercase
        } else if c.is_lowercase() {
            Self::Lowercase
        } else if c.is_ascii_digit() {
            Self::Digit
        } else if c.is_alphabetic() {
            Self::Uncased
        } else {
            Self::Symbol
        }
    }
}

/// Per-class character counts of a candidate password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterCounts {
    /// Total number of characters (not bytes).
    pub length: usize,
    pub uppercase: usize,
    pub lowercase: usize,
    pub digits: usize,
    pub symbols: usize,
}

impl CharacterCounts {
    pub fn count(candidate: &str) -> Self {
        candidate.chars().fold(Self::default(), |mut acc, c| {
            acc.length += 1;
            match CharClass::of(c) {
                CharClass::Uppercase => acc.uppercase += 1,
                CharClass::Lowercase => acc.lowercase += 1,
                CharClass::Digit => acc.digits += 1,
                CharClass::Symbol => acc.symbols += 1,
                CharClass::Uncased => {}
            }
            acc
        })
    }
}

/// Complexity thresholds enforced on passwords while secure passwords are on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
    min_symbols: usize,
    min_digits: usize,
    min_uppercase: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: PASSWORD_DEFAULT_MIN_LENGTH,
            min_symbols: PASSWORD_DEFAULT_MIN_SYMBOLS,
            min_digits: PASSWORD_DEFAULT_MIN_DIGITS,
            min_uppercase: PASSWORD_DEFAULT_MIN_UPPERCASE,
        }
    }
}

/// Reject `value` if it is below `floor`.
fn check_floor(setting: &'static str, value: usize, floor: usize) -> Result<(), ConfigError> {
    if value < floor {
        Err(ConfigError::InvalidArgument {
            setting,
            floor,
            value,
        })
    } else {
        Ok(())
    }
}

impl PasswordPolicy {
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    pub const fn min_symbols(&self) -> usize {
        self.min_symbols
    }

    pub const fn min_digits(&self) -> usize {
        self.min_digits
    }

    pub const fn min_uppercase(&self) -> usize {
        self.min_uppercase
    }

    /// Set the minimum password length. Values below 8 are refused.
    pub fn set_min_length(&mut self, minimum: usize) -> Result<(), ConfigError> {
        check_floor("minimum password length", minimum, PASSWORD_MIN_LENGTH_FLOOR)?;
        debug!("Secure password minimum length set to {minimum}");
        self.min_length = minimum;
        Ok(())
    }

    pub fn set_min_symbols(&mut self, minimum: usize) -> Result<(), ConfigError> {
        check_floor("minimum symbol count", minimum, PASSWORD_MIN_COUNT_FLOOR)?;
        debug!("Secure password minimum symbol count set to {minimum}");
        self.min_symbols = minimum;
        Ok(())
    }

    pub fn set_min_digits(&mut self, minimum: usize) -> Result<(), ConfigError> {
        check_floor("minimum digit count", minimum, PASSWORD_MIN_COUNT_FLOOR)?;
        debug!("Secure password minimum digit count set to {minimum}");
        self.min_digits = minimum;
        Ok(())
    }

    pub fn set_min_uppercase(&mut self, minimum: usize) -> Result<(), ConfigError> {
        check_floor("minimum uppercase count", minimum, PASSWORD_MIN_COUNT_FLOOR)?;
        debug!("Secure password minimum uppercase count set to {minimum}");
        self.min_uppercase = minimum;
        Ok(())
    }

    /// Check `candidate` against every rule in order, failing on the first
    /// rule it breaks.
    pub fn validate(&self, candidate: &str) -> Result<CharacterCounts, ConfigError> {
        let counts = CharacterCounts::count(candidate);
        let broken = if counts.length < self.min_length {
            Some(PasswordRule::Length)
        } else if counts.symbols < self.min_symbols {
            Some(PasswordRule::Symbol)
        } else if counts.digits < self.min_digits {
            Some(PasswordRule::Digit)
        } else if counts.lowercase < PASSWORD_REQUIRED_LOWERCASE {
            Some(PasswordRule::Lowercase)
        } else if counts.uppercase < self.min_uppercase {
            Some(PasswordRule::Uppercase)
        } else {
            None
        };
        broken.map_or(Ok(counts), |rule| Err(ConfigError::InvalidPassword(rule)))
    }
}

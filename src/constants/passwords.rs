//! Constants for configuring the secure password policy

/// The default minimum password length in secure mode.
pub const PASSWORD_DEFAULT_MIN_LENGTH: usize = 10;
/// The shortest minimum length the policy can be configured with.
pub const PASSWORD_MIN_LENGTH_FLOOR: usize = 8;
/// The default minimum number of symbols in a secure password.
pub const PASSWORD_DEFAULT_MIN_SYMBOLS: usize = 1;
/// The default minimum number of digits in a secure password.
pub const PASSWORD_DEFAULT_MIN_DIGITS: usize = 1;
/// The default minimum number of uppercase letters in a secure password.
pub const PASSWORD_DEFAULT_MIN_UPPERCASE: usize = 1;
/// Every configurable character count must require at least this many.
pub const PASSWORD_MIN_COUNT_FLOOR: usize = 1;
/// Lowercase letters have no setting; a secure password always needs this many.
pub const PASSWORD_REQUIRED_LOWERCASE: usize = 1;

/// Argon2id memory cost in KiB.
pub const ARGON2_MEMORY_COST: u32 = 12288;
/// Argon2id iteration count.
pub const ARGON2_TIME_COST: u32 = 3;
/// Argon2id lanes.
pub const ARGON2_PARALLELISM: u32 = 1;

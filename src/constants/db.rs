//! Defaults for the database settings and the environment variables which
//! override them.

/// Default database name, translated to a folder under the database path.
pub const DEFAULT_DB_NAME: &str = "sample.db";
/// Default database user.
pub const DEFAULT_DB_USER: &str = "app";
/// Default (clear text) database password.
pub const DEFAULT_DB_PASSWORD: &str = "app";
/// Whether the database is created when it does not exist yet.
pub const DEFAULT_DB_CREATE: bool = true;

pub const DB_NAME_VAR: &str = "DB_NAME";
pub const DB_PATH_VAR: &str = "DB_PATH";
pub const DB_USER_VAR: &str = "DB_USER";
pub const DB_CREATE_VAR: &str = "DB_CREATE";
pub const DB_PASSWORD_VAR: &str = "DB_PASSWORD";
/// Name of a file under the docker secrets directory holding the password.
pub const DB_PASSWORD_DOCKER_SECRET_VAR: &str = "DB_PASSWORD_DOCKER_SECRET";
pub const DB_SECURE_PASSWORDS_VAR: &str = "DB_SECURE_PASSWORDS";
pub const DB_PASSWORD_MIN_LENGTH_VAR: &str = "DB_PASSWORD_MIN_LENGTH";
pub const DB_PASSWORD_MIN_SYMBOLS_VAR: &str = "DB_PASSWORD_MIN_SYMBOLS";
pub const DB_PASSWORD_MIN_DIGITS_VAR: &str = "DB_PASSWORD_MIN_DIGITS";
pub const DB_PASSWORD_MIN_UPPERCASE_VAR: &str = "DB_PASSWORD_MIN_UPPERCASE";

//! Constants (defaults and environment variables) used across the crate.
pub mod db;
pub mod passwords;
pub(crate) mod secrets;

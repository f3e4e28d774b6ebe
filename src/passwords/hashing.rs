//! The one-way hashing used to store secure passwords.
use argon2::{
    password_hash::{PasswordHasher as _, SaltString},
    Algorithm, Argon2, Params, Version,
};
use sha2::{Digest as _, Sha256};

use crate::{
    constants::passwords::{ARGON2_MEMORY_COST, ARGON2_PARALLELISM, ARGON2_TIME_COST},
    errors::HashingError,
};

/// Salt generation and one-way hashing for secure passwords.
///
/// Stored digests are compared by recomputing them, so both operations must
/// be deterministic: the same inputs always give the same output.
pub trait PasswordHasher {
    /// Derive a salt for a password of `length` characters.
    fn generate_salt(&self, length: usize) -> Result<String, HashingError>;
    /// Hash `candidate` with `salt` into a digest string.
    fn hash_password(&self, candidate: &str, salt: &str) -> Result<String, HashingError>;
}

/// Domain tag mixed into every derived salt.
const SALT_DOMAIN: &[u8] = b"dbconfig.secure-password.salt.v1";
/// Bytes of the SHA-256 output used as salt.
const SALT_BYTES: usize = 16;

/// Argon2id hashing, producing PHC formatted digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

/// Instantiate an Argon2 context with the standard parameters.
fn create_argon2() -> Result<Argon2<'static>, HashingError> {
    let params = Params::new(
        ARGON2_MEMORY_COST,
        ARGON2_TIME_COST,
        ARGON2_PARALLELISM,
        None,
    )?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

impl PasswordHasher for Argon2Hasher {
    fn generate_salt(&self, length: usize) -> Result<String, HashingError> {
        let digest = Sha256::new()
            .chain_update(SALT_DOMAIN)
            .chain_update(u64::try_from(length).unwrap_or(u64::MAX).to_be_bytes())
            .finalize();
        let salt = SaltString::encode_b64(&digest[..SALT_BYTES])?;
        Ok(salt.as_str().to_owned())
    }

    fn hash_password(&self, candidate: &str, salt: &str) -> Result<String, HashingError> {
        let salt = SaltString::from_b64(salt)?;
        let hash = create_argon2()?.hash_password(candidate.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }
}

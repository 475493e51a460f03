//! Code generation and one-way hashing for codes and passwords.

use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::RngExt;

use crate::domain::types::RESET_CODE_LEN;
use crate::error::AuthServiceError;

/// Uniform over `0..10^RESET_CODE_LEN`, zero-padded so leading zeros survive.
pub fn generate_code() -> String {
    let upper = 10u32.pow(RESET_CODE_LEN as u32);
    let n = rand::rng().random_range(0..upper);
    format!("{n:0width$}", width = RESET_CODE_LEN)
}

/// Argon2id hash in PHC string format, with a fresh random salt.
pub fn hash_secret(plain: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow!("argon2 hash: {e}"))?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` on mismatch; `Err` only if `hash` is not a PHC string.
pub fn verify_secret(plain: &str, hash: &str) -> Result<bool, AuthServiceError> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("parse stored hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

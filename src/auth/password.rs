use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt work factor for stored credentials.
pub const BCRYPT_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(hash(password, BCRYPT_COST)?)
}

/// Checks `password` against a stored bcrypt hash.
///
/// A malformed stored hash is treated as a mismatch, so callers only ever see `false`.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match verify(password, hashed_password) {
        Ok(matches) => matches,
        Err(e) => {
            log::warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;
use zeroize::Zeroize;

/// The number of random salt bytes fed to Argon2.
const SALT_LEN: usize = 16;

/// Errors returned by the password hasher.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The password did not match, or the stored hash was unreadable.
    #[error("invalid username or password")]
    Mismatch,

    /// Hashing failed.
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Hashes a password using Argon2id with the library's default cost.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt_bytes)
        .map_err(|e| PasswordError::Hash(format!("failed to generate salt: {}", e)))?;

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| PasswordError::Hash(format!("salt encoding error: {}", e)))?;

    let result = Argon2::default()
        .hash_password(&password_bytes, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()));

    password_bytes.zeroize();
    salt_bytes.zeroize();
    result
}

/// Verifies a password against a stored hash.
///
/// A wrong password and a corrupt hash both yield [`PasswordError::Mismatch`].
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let mut password_bytes = password.as_bytes().to_vec();

    let result = PasswordHash::new(hash)
        .map_err(|_| PasswordError::Mismatch)
        .and_then(|parsed| {
            Argon2::default()
                .verify_password(&password_bytes, &parsed)
                .map_err(|_| PasswordError::Mismatch)
        });

    password_bytes.zeroize();
    result
}

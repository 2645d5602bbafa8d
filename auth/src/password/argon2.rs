use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Credential hashing bound to the account's email address.
///
/// The secret is hashed together with the email (`secret || email`) using
/// Argon2id and a random per-record salt. The result is a PHC string that
/// carries algorithm, parameters and salt, so it can be verified later without
/// a separate salt column. A credential stored for one email never verifies
/// for another.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher with Argon2id default parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a plaintext secret for storage.
    ///
    /// # Arguments
    /// * `secret` - Plaintext password
    /// * `email` - Email address of the account the credential belongs to
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Underlying primitive rejected the input
    pub fn hash(&self, secret: &str, email: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let material = Self::material(secret, email);

        self.argon2
            .hash_password(&material, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext secret against a stored hash.
    ///
    /// # Arguments
    /// * `secret` - Plaintext password to verify
    /// * `email` - Email address the credential was stored under
    /// * `hash` - Stored hash in PHC string format
    ///
    /// # Returns
    /// True if the (secret, email) pair matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, secret: &str, email: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;
        let material = Self::material(secret, email);

        Ok(self
            .argon2
            .verify_password(&material, &parsed_hash)
            .is_ok())
    }

    fn material(secret: &str, email: &str) -> Vec<u8> {
        let mut material = Vec::with_capacity(secret.len() + email.len());
        material.extend_from_slice(secret.as_bytes());
        material.extend_from_slice(email.as_bytes());
        material
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

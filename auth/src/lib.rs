//! Authentication core
//!
//! Provides the credential and token machinery used by the user service:
//! - Credential hashing bound to the account email (Argon2id, random salt)
//! - Signed, time-bounded tokens (HS256 JWT) and their verification
//! - Authentication coordination (verify credentials, then issue a token)
//!
//! The signing secret and token lifetime are injected at construction; no
//! global state is involved.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Abcdef12", "a@b.com").unwrap();
//! assert!(hasher.verify("Abcdef12", "a@b.com", &hash).unwrap());
//! assert!(!hasher.verify("Abcdef12", "c@d.com", &hash).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("Abcdef12", "a@b.com").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("Abcdef12", "a@b.com", &hash, "user123").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;

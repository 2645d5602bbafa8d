use thiserror::Error;

/// Failure of the credential hashing primitive.
///
/// Both variants are internal errors: callers map them to a generic
/// server-side failure and never expose the message to clients.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Credential hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored credential could not be verified: {0}")]
    VerificationFailed(String),
}

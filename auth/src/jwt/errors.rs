use thiserror::Error;

/// Error type for token issuance and verification.
///
/// Verification failures all collapse into `InvalidToken`; the carried reason
/// is meant for server-side logs only.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

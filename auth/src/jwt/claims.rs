use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims embedded in an authentication token.
///
/// `exp` is always `iat + ttl`; the signature covers every field, so claims
/// cannot change after issuance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Email address of the identity at issuance
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an identity issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique identity identifier
    /// * `email` - Email address of the identity
    /// * `ttl` - Lifetime of the token
    pub fn for_user(user_id: impl ToString, email: impl Into<String>, ttl: Duration) -> Self {
        Self::issued_at(user_id, email, ttl, Utc::now())
    }

    /// Create claims for an identity with an explicit issuance instant.
    pub fn issued_at(
        user_id: impl ToString,
        email: impl Into<String>,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

const DECOY_SECRET: &str = "decoy-credential";
const DECOY_EMAIL: &str = "decoy@invalid";

/// Authentication coordinator combining credential verification and token issuance.
///
/// Holds the signing secret and token lifetime for the whole process; both are
/// fixed at construction and shared read-only between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
    decoy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// Claims embedded in `access_token`
    pub claims: Claims,
}

impl AuthenticationResult {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing, must not be empty
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `JwtError::EmptySecret` - No signing secret configured
    /// * `PasswordError` - Decoy credential could not be prepared
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Result<Self, AuthenticationError> {
        let jwt_handler = JwtHandler::new(jwt_secret)?;
        let password_hasher = PasswordHasher::new();
        let decoy_hash = password_hasher.hash(DECOY_SECRET, DECOY_EMAIL)?;

        Ok(Self {
            password_hasher,
            jwt_handler,
            token_ttl,
            decoy_hash,
        })
    }

    /// Hash a password for storage under the given email.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str, email: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password, email)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `email` - Email the credential was stored under
    /// * `stored_hash` - Stored credential
    /// * `user_id` - Identity the token is issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored credential is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        email: &str,
        stored_hash: &str,
        user_id: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, email, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(user_id, email)?)
    }

    /// Spend the same work as a real verification and reject.
    ///
    /// Used when no identity matches the submitted email so that response
    /// timing does not reveal whether the email is registered.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        if let Err(e) = self
            .password_hasher
            .verify(password, DECOY_EMAIL, &self.decoy_hash)
        {
            tracing::error!("Decoy credential verification failed: {}", e);
        }

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        user_id: impl ToString,
        email: &str,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_user(user_id, email, self.token_ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }

    /// Verify a token and recover its claims.
    ///
    /// # Errors
    /// * `JwtError::InvalidToken` - Signature, encoding or expiry check failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginSession;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Orchestrates registration and login on top of the repository port and the
/// shared `Authenticator`; also carries the CRUD operations of the API.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Credential hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn ensure_email_available(
        &self,
        email: &EmailAddress,
        owner: Option<&UserId>,
    ) -> Result<(), UserError> {
        match self.repository.find_by_email(email.as_str()).await? {
            Some(existing) if Some(&existing.id) != owner => {
                Err(UserError::EmailAlreadyExists(email.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        // Fast path only; the unique constraint in storage is authoritative
        self.ensure_email_available(&command.email, None).await?;

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str(), command.email.as_str())?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginSession, UserError> {
        // Input that could never have been registered cannot match a stored credential
        if EmailAddress::new(command.email.clone()).is_err()
            || Password::new(command.password.clone()).is_err()
        {
            tracing::debug!("Login rejected: malformed credentials");
            return Err(UserError::InvalidCredentials);
        }

        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login rejected: unknown identity");
                return Err(self.authenticator.reject_unknown(&command.password).into());
            }
        };

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                user.email.as_str(),
                &user.password_hash,
                user.id,
            )
            .map_err(|e| {
                if let auth::AuthenticationError::InvalidCredentials = e {
                    tracing::debug!(user_id = %user.id, "Login rejected: credential mismatch");
                } else {
                    tracing::error!(user_id = %user.id, "Login failed: {}", e);
                }
                UserError::from(e)
            })?;

        let expires_at = result
            .expires_at()
            .ok_or_else(|| UserError::TokenIssuance("Token expiry out of range".to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginSession {
            user,
            token: result.access_token,
            expires_at,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        if command.is_empty() {
            return Err(UserError::EmptyUpdate);
        }

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                // The stored credential is bound to the email
                if command.password.is_none() {
                    return Err(UserError::PasswordRequiredForEmailChange);
                }
                self.ensure_email_available(&new_email, Some(id)).await?;
                user.email = new_email;
            }
        }

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self
                .authenticator
                .hash_password(new_password.as_str(), user.email.as_str())?;
        }

        user.updated_at = Utc::now();

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}

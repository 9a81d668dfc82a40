use std::sync::Arc;

use crate::domain::{Author, NewUser, PASSWORD_MIN_LENGTH, User, is_valid_username};
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};

/// A freshly issued access token and whom it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: Author,
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Account signup and login.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create an account and log it in.
    pub async fn signup(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        let mut errors = Vec::new();
        if !is_valid_username(username) {
            errors.push(
                "Enter a valid username of up to 150 letters, digits and @/./+/-/_ characters."
                    .to_string(),
            );
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.push(format!(
                "Password must be at least {PASSWORD_MIN_LENGTH} characters."
            ));
        }
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors.join(" ")));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Duplicate(
                "A user with that username already exists.".to_string(),
            ));
        }

        let password_hash = self.passwords.hash(password)?;
        let user = self
            .users
            .create(NewUser::new(username.to_string(), password_hash))
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User signed up");
        self.session(&user)
    }

    /// Exchange a username and password for a session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(username = %user.username, "Rejected login");
            return Err(DomainError::Unauthorized);
        }

        self.session(&user)
    }

    fn session(&self, user: &User) -> Result<Session, DomainError> {
        Ok(Session {
            user: Author::from(user),
            access_token: self.tokens.generate_token(user.id, &user.username)?,
            expires_in: self.tokens.expiration_seconds().max(0) as u64,
        })
    }
}

//! Account service: sign-up, login and password changes

use std::sync::Arc;

use tracing::{info, warn, Instrument, Span};

use crate::domain::validation::Registration;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Principal, RepositoryProvider, User,
};
use crate::infrastructure::crypto::PasswordHasher;

const MIN_PASSWORD_LEN: usize = 8;

pub struct AccountService {
    repos: Arc<dyn RepositoryProvider>,
    hasher: PasswordHasher,
    span: Span,
}

impl AccountService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, hasher: PasswordHasher) -> Self {
        Self {
            repos,
            hasher,
            span: Span::none(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    // ── Validation ──────────────────────────────────────────────

    /// `DuplicateEmail` if any account already uses `email`.
    pub async fn validate_unique_email(&self, email: &str) -> DomainResult<String> {
        let email = email.trim();
        let existing = self
            .repos
            .users()
            .get_user_by_email(email)
            .instrument(self.span.clone())
            .await?;
        if existing.is_some() {
            return Err(DomainError::DuplicateEmail);
        }
        Ok(email.to_string())
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn register_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<User> {
        async {
            let form = Registration::new(username, email, password).validated()?;
            let email = self.validate_unique_email(&form.email).await?;
            if self
                .repos
                .users()
                .get_user_by_username(&form.username)
                .await?
                .is_some()
            {
                return Err(DomainError::Duplicate(
                    "A user with that username already exists.".into(),
                ));
            }

            let password_hash = self.hash(&form.password)?;
            let user = self
                .repos
                .users()
                .create_user(CreateUserDto {
                    username: form.username,
                    email,
                    password_hash,
                })
                .await?;

            info!(user_id = %user.id, username = %user.username, "New user registered");
            Ok(user)
        }
        .instrument(self.span.clone())
        .await
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check a username/password pair and return the caller's identity.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<Principal> {
        async {
            let user = self.repos.users().get_user_by_username(username.trim()).await?;
            let Some(user) = user else {
                return Err(DomainError::Unauthorized("Invalid credentials".into()));
            };

            let valid = self.hasher.verify(password, &user.password_hash).unwrap_or_else(|e| {
                warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                false
            });
            if !valid {
                return Err(DomainError::Unauthorized("Invalid credentials".into()));
            }
            Ok(Principal::from(user))
        }
        .instrument(self.span.clone())
        .await
    }

    /// Change a password after verifying the current one.
    pub async fn change_password(
        &self,
        principal: &Principal,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        async {
            if new_password.chars().count() < MIN_PASSWORD_LEN {
                return Err(DomainError::Invalid(
                    "Password must be at least 8 characters".into(),
                ));
            }

            let user = self
                .repos
                .users()
                .get_user_by_id(&principal.user_id)
                .await?
                .ok_or_else(|| DomainError::not_found("User", "id", &principal.user_id))?;

            if !self
                .hasher
                .verify(current_password, &user.password_hash)
                .unwrap_or(false)
            {
                return Err(DomainError::Unauthorized("Invalid current password".into()));
            }

            let new_hash = self.hash(new_password)?;
            self.repos
                .users()
                .update_user_password(&user.id, &new_hash)
                .await?;

            info!(user_id = %user.id, "Password changed");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        self.hasher
            .hash(password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))
    }
}

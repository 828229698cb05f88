//! Account service — signup, sessions, password recovery and profile edits.

use hubdesk_domain::error::{AuthError, HubdeskError, NotFoundError, ValidationError};
use hubdesk_domain::id::UserId;
use hubdesk_domain::user::{PasswordReset, Profile, Session, User, normalize_email};

use crate::ports::{AccountNotifier, UserRepository};

/// Application service for user accounts and bearer sessions.
pub struct AccountService<R, N> {
    repo: R,
    notifier: N,
}

impl<R: UserRepository, N: AccountNotifier> AccountService<R, N> {
    /// Create a new service backed by the given repository and notifier.
    pub fn new(repo: R, notifier: N) -> Self {
        Self { repo, notifier }
    }

    /// Create an account and open its first session.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::Validation`] for a malformed email, a short
    /// password or an email already in use, or a storage error.
    #[tracing::instrument(skip(self, password))]
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<(User, Session), HubdeskError> {
        let user = User::new(email, password, profile)?;
        if self.repo.find_by_email(&user.email).await?.is_some() {
            return Err(ValidationError::AlreadyTaken { field: "email" }.into());
        }
        let user = self.repo.create(user).await?;
        let session = self.repo.create_session(Session::open(user.id)).await?;
        tracing::info!(user_id = %user.id, "account created");
        Ok((user, session))
    }

    /// Open a session for valid credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email or a
    /// wrong password, or a storage error.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, HubdeskError> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .filter(|user| user.password.verify(password))
            .ok_or(AuthError::InvalidCredentials)?;
        self.repo.create_session(Session::open(user.id)).await
    }

    /// Close the session holding `token`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> Result<(), HubdeskError> {
        self.repo.delete_session(token).await
    }

    /// Resolve a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the token is unknown or its
    /// user no longer exists, or a storage error.
    pub async fn authenticate(&self, token: &str) -> Result<User, HubdeskError> {
        let session = self
            .repo
            .find_session(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        self.repo
            .get_by_id(session.user)
            .await?
            .ok_or_else(|| AuthError::InvalidToken.into())
    }

    /// Issue a reset token and hand it to the notifier.
    ///
    /// Unknown or malformed emails succeed silently, so callers cannot discover
    /// which addresses hold an account.
    ///
    /// # Errors
    ///
    /// Returns a storage or notifier error.
    #[tracing::instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<(), HubdeskError> {
        let Ok(email) = normalize_email(email) else {
            return Ok(());
        };
        let Some(mut user) = self.repo.find_by_email(&email).await? else {
            tracing::debug!("password reset requested for unknown email");
            return Ok(());
        };
        let reset = PasswordReset::issue();
        user.reset = Some(reset.clone());
        let user = self.repo.update(user).await?;
        self.notifier.password_reset_requested(&user, &reset).await
    }

    /// Set a new password using a reset token, revoking every open session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for unknown or expired tokens,
    /// [`HubdeskError::Validation`] for a short password, or a storage error.
    #[tracing::instrument(skip_all)]
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), HubdeskError> {
        let mut user = self
            .repo
            .find_by_reset_token(token)
            .await?
            .filter(|user| user.reset.as_ref().is_some_and(PasswordReset::is_valid))
            .ok_or(AuthError::InvalidToken)?;
        user.set_password(password)?;
        let user = self.repo.update(user).await?;
        self.repo.delete_sessions_for(user.id).await?;
        tracing::info!(user_id = %user.id, "password reset");
        Ok(())
    }

    /// Load an account.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] when the user does not exist.
    pub async fn account(&self, id: UserId) -> Result<User, HubdeskError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Replace the editable profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] when the user does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn update_profile(&self, id: UserId, profile: Profile) -> Result<User, HubdeskError> {
        let mut user = self.account(id).await?;
        user.profile = profile;
        self.repo.update(user).await
    }

    /// Change the password of a signed-in user.
    ///
    /// Sessions stay open; only a reset revokes them.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] when the user does not exist,
    /// [`HubdeskError::Validation`] for a short password, or a storage error.
    #[tracing::instrument(skip(self, password))]
    pub async fn update_password(&self, id: UserId, password: &str) -> Result<(), HubdeskError> {
        let mut user = self.account(id).await?;
        user.set_password(password)?;
        self.repo.update(user).await?;
        Ok(())
    }

    /// Delete an account together with its sessions.
    ///
    /// Hubs it owned keep pointing at the removed id.
    ///
    /// # Errors
    ///
    /// Returns [`HubdeskError::NotFound`] when the user does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_account(&self, id: UserId) -> Result<(), HubdeskError> {
        self.account(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "account deleted");
        Ok(())
    }
}

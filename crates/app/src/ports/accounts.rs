//! Account ports — user persistence, login sessions and reset delivery.

use std::future::Future;

use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::id::UserId;
use hubdesk_domain::user::{PasswordReset, Session, User};

/// Repository for [`User`]s and their [`Session`]s.
pub trait UserRepository {
    /// Create a new user.
    fn create(&self, user: User) -> impl Future<Output = Result<User, HubdeskError>> + Send;

    /// Get a user by id.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, HubdeskError>> + Send;

    /// Get a user by (normalized) email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, HubdeskError>> + Send;

    /// Get the user holding the given password-reset token.
    fn find_by_reset_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<User>, HubdeskError>> + Send;

    /// Replace an existing user.
    fn update(&self, user: User) -> impl Future<Output = Result<User, HubdeskError>> + Send;

    /// Delete a user and every session it holds.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), HubdeskError>> + Send;

    /// Persist a new login session.
    fn create_session(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<Session, HubdeskError>> + Send;

    /// Look up a session by token.
    fn find_session(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<Session>, HubdeskError>> + Send;

    /// Delete one session. Unknown tokens are ignored.
    fn delete_session(&self, token: &str)
    -> impl Future<Output = Result<(), HubdeskError>> + Send;

    /// Delete every session of `user`.
    fn delete_sessions_for(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<(), HubdeskError>> + Send;
}

/// Delivers password-reset tokens to their owner (email, SMS, log, …).
pub trait AccountNotifier {
    /// Hand `reset` to `user` out of band.
    fn password_reset_requested(
        &self,
        user: &User,
        reset: &PasswordReset,
    ) -> impl Future<Output = Result<(), HubdeskError>> + Send;
}

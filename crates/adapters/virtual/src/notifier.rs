//! Logging account notifier — stands in for an email sender.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hubdesk_app::ports::AccountNotifier;
use hubdesk_domain::error::HubdeskError;
use hubdesk_domain::time::Timestamp;
use hubdesk_domain::user::{PasswordReset, User};

/// A password-reset message that would have been emailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetNotice {
    pub email: String,
    pub token: String,
    pub expires_at: Timestamp,
}

/// Notifier that logs issued resets and, when built with
/// [`LogNotifier::with_outbox`], keeps each notice for inspection.
///
/// Tokens never reach the log.
#[derive(Clone, Default)]
pub struct LogNotifier {
    outbox: Option<Arc<Mutex<Vec<ResetNotice>>>>,
}

impl LogNotifier {
    /// Create a notifier that only logs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that also keeps every notice in an outbox.
    #[must_use]
    pub fn with_outbox() -> Self {
        Self {
            outbox: Some(Arc::default()),
        }
    }

    /// Every notice sent so far, oldest first. Empty without an outbox.
    #[must_use]
    pub fn outbox(&self) -> Vec<ResetNotice> {
        self.outbox
            .as_ref()
            .map(|outbox| lock(outbox).clone())
            .unwrap_or_default()
    }

    /// The newest reset token sent to `email`.
    #[must_use]
    pub fn latest_token_for(&self, email: &str) -> Option<String> {
        let outbox = self.outbox.as_ref()?;
        lock(outbox)
            .iter()
            .rev()
            .find(|notice| notice.email == email)
            .map(|notice| notice.token.clone())
    }
}

fn lock(outbox: &Mutex<Vec<ResetNotice>>) -> MutexGuard<'_, Vec<ResetNotice>> {
    outbox.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AccountNotifier for LogNotifier {
    async fn password_reset_requested(
        &self,
        user: &User,
        reset: &PasswordReset,
    ) -> Result<(), HubdeskError> {
        tracing::info!(user_id = %user.id, expires_at = %reset.expires_at, "password reset issued");
        if let Some(outbox) = &self.outbox {
            lock(outbox).push(ResetNotice {
                email: user.email.clone(),
                token: reset.token.clone(),
                expires_at: reset.expires_at,
            });
        }
        Ok(())
    }
}

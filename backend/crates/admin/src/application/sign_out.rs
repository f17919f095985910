//! Sign Out Use Case

use std::sync::Arc;

use crate::application::config::AdminConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::repository::AdminSessionRepository;
use crate::error::AdminResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AdminSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AdminConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AdminSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AdminConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Delete the session behind `session_token`. Unverifiable tokens are ignored.
    pub async fn execute(&self, session_token: &str) -> AdminResult<()> {
        let Some(session_id) = verify_session_token(session_token, &self.config.session_secret)
        else {
            return Ok(());
        };

        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "Admin signed out");
        Ok(())
    }
}

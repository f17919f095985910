//! Check Session Use Case
//!
//! Verifies a session token and loads the session it references.

use std::sync::Arc;

use crate::application::config::AdminConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::entities::AdminSession;
use crate::domain::repository::AdminSessionRepository;
use crate::error::{AdminError, AdminResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: AdminSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AdminConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AdminSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AdminConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Return the live session for `session_token`.
    ///
    /// Read-only for live sessions; expired ones are deleted on sight.
    pub async fn get_session(&self, session_token: &str) -> AdminResult<AdminSession> {
        let session_id = verify_session_token(session_token, &self.config.session_secret)
            .ok_or(AdminError::SessionInvalid)?;

        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AdminError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            tracing::debug!(session_id = %session_id, "Expired admin session removed");
            return Err(AdminError::SessionInvalid);
        }

        Ok(session)
    }

    /// Whether `session_token` is valid; storage errors propagate
    pub async fn is_valid(&self, session_token: &str) -> AdminResult<bool> {
        match self.get_session(session_token).await {
            Ok(_) => Ok(true),
            Err(AdminError::SessionInvalid) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

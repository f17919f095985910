//! Sign In Use Case
//!
//! Verifies the shared admin password and opens a server-side session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AdminConfig;
use crate::application::session_token::create_session_token;
use crate::domain::entities::AdminSession;
use crate::domain::repository::AdminSessionRepository;
use crate::error::{AdminError, AdminResult};

/// Sign in output
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    pub expires_at_ms: i64,
}

/// Sign in use case
pub struct SignInUseCase<S>
where
    S: AdminSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AdminConfig>,
}

impl<S> SignInUseCase<S>
where
    S: AdminSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AdminConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, password: String) -> AdminResult<SignInOutput> {
        // Input that cannot be a password is reported like a wrong one
        let password =
            ClearTextPassword::new(password).map_err(|_| AdminError::InvalidCredentials)?;

        if !self
            .config
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(AdminError::InvalidCredentials);
        }

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AdminError::Internal(format!("Invalid session TTL: {e}")))?;
        let session = AdminSession::new(ttl);

        self.session_repo.create(&session).await?;

        let session_token = create_session_token(&session.session_id, &self.config.session_secret);

        tracing::info!(session_id = %session.session_id, "Admin signed in");

        Ok(SignInOutput {
            session_token,
            expires_at_ms: session.expires_at_ms,
        })
    }
}

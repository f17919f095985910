//! Admin Middleware
//!
//! Gate for every admin-only route.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use contest::domain::repository::FileStore;

use crate::application::CheckSessionUseCase;
use crate::domain::repository::{AdminSessionRepository, RegistryQueryRepository};
use crate::presentation::handlers::AdminAppState;
use crate::presentation::router::LOGIN_PATH;

/// Middleware that requires a valid admin session.
///
/// Requests without one are redirected (303) to the login page and reach
/// no handler.
pub async fn require_admin_session<R, F>(
    State(state): State<AdminAppState<R, F>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let session_valid = match token {
        Some(token) => {
            let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
            match use_case.is_valid(&token).await {
                Ok(valid) => valid,
                Err(e) => return e.into_response(),
            }
        }
        None => {
            tracing::debug!("No admin session cookie");
            false
        }
    };

    if !session_valid {
        return Redirect::to(LOGIN_PATH).into_response();
    }

    next.run(req).await
}

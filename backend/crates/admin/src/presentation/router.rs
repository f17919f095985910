//! Admin Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use contest::DiskFileStore;
use contest::domain::repository::FileStore;

use crate::application::config::AdminConfig;
use crate::domain::repository::{AdminSessionRepository, RegistryQueryRepository};
use crate::infra::sqlite::SqliteAdminRepository;
use crate::presentation::handlers::{self, AdminAppState};
use crate::presentation::middleware::require_admin_session;

/// Mount point of the admin routes
pub const ADMIN_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = "/admin/login";
pub const PANEL_PATH: &str = "/admin/panel";

/// Create the admin router with the SQLite repository and on-disk uploads.
///
/// Routes are already prefixed with `/admin`; merge, don't nest.
pub fn admin_router(
    repo: SqliteAdminRepository,
    files: DiskFileStore,
    config: AdminConfig,
) -> Router {
    admin_router_generic(repo, files, config)
}

/// Create a generic admin router for any repository and file store
pub fn admin_router_generic<R, F>(repo: R, files: F, config: AdminConfig) -> Router
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let state = AdminAppState {
        repo: Arc::new(repo),
        files: Arc::new(files),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/panel", get(handlers::panel::<R, F>))
        .route("/registry", get(handlers::registry::<R, F>))
        .route("/registry.csv", get(handlers::registry_csv::<R, F>))
        .route("/files/{codigo}", get(handlers::files::<R, F>))
        .route(
            "/download/{codigo}/{filename}",
            get(handlers::download::<R, F>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_session::<R, F>,
        ));

    let routes = Router::new()
        .route(
            "/login",
            get(handlers::login_status::<R, F>).post(handlers::login::<R, F>),
        )
        .route("/logout", post(handlers::logout::<R, F>))
        .merge(protected)
        .with_state(state);

    Router::new().nest(ADMIN_PREFIX, routes)
}

//! Contest Router

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;

use crate::application::config::ContestConfig;
use crate::domain::repository::{FileStore, RegistrantRepository, SubmissionRepository};
use crate::infra::file_store::DiskFileStore;
use crate::infra::sqlite::SqliteContestRepository;
use crate::presentation::handlers::{self, ContestAppState};

/// Create the contest router with the SQLite repository and on-disk uploads
pub fn contest_router(repo: SqliteContestRepository, config: ContestConfig) -> Router {
    let files = DiskFileStore::new(config.upload_dir.clone());
    contest_router_generic(repo, files, config)
}

/// Create a contest router for any repository and file store
pub fn contest_router_generic<R, F>(repo: R, files: F, config: ContestConfig) -> Router
where
    R: RegistrantRepository + SubmissionRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let body_limit = DefaultBodyLimit::max(config.max_upload_bytes);
    let state = ContestAppState {
        repo: Arc::new(repo),
        files: Arc::new(files),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/inscripcion",
            get(handlers::registration_form).post(handlers::register::<R, F>),
        )
        .route(
            "/presentacion",
            get(handlers::submission_form::<R, F>)
                .post(handlers::submit::<R, F>)
                .layer(body_limit),
        )
        .with_state(state)
}

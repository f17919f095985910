//! Router assembly

use admin::{AdminConfig, SqliteAdminRepository, admin_router};
use axum::{Json, Router, routing::get};
use contest::{ContestConfig, DiskFileStore, SqliteContestRepository, contest_router};
use kernel::error::app_error::AppError;
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Serialize)]
struct IndexResponse {
    nombre: &'static str,
    rutas: [&'static str; 4],
}

/// GET /
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        nombre: env!("CARGO_PKG_NAME"),
        rutas: ["/inscripcion", "/presentacion", "/admin/login", "/admin/panel"],
    })
}

async fn not_found() -> AppError {
    AppError::not_found("Ruta no encontrada.")
}

/// All application routes, without the outer tower layers
pub fn build_router(pool: SqlitePool, contest: ContestConfig, admin: AdminConfig) -> Router {
    let files = DiskFileStore::new(contest.upload_dir.clone());

    Router::new()
        .route("/", get(index))
        .merge(contest_router(SqliteContestRepository::new(pool.clone()), contest))
        .merge(admin_router(SqliteAdminRepository::new(pool), files, admin))
        .fallback(not_found)
}

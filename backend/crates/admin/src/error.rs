//! Admin Error Types
//!
//! This module provides admin-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use contest::ContestError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Admin-specific result type alias
pub type AdminResult<T> = Result<T, AdminError>;

#[derive(Debug, Error)]
pub enum AdminError {
    /// Wrong admin password
    #[error("Contraseña incorrecta.")]
    InvalidCredentials,

    /// Session token missing, forged, unknown, or expired
    #[error("Sesión inválida o expirada.")]
    SessionInvalid,

    /// Malformed code or a filename that is not in stored form
    #[error("Ruta de archivo inválida.")]
    InvalidPath,

    #[error("Archivo no encontrado.")]
    FileNotFound,

    #[error("Formulario inválido: {0}")]
    MalformedForm(String),

    /// CSV export failed
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    /// Error from the shared contest store
    #[error(transparent)]
    Contest(#[from] ContestError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::InvalidCredentials | AdminError::SessionInvalid => {
                ErrorKind::Unauthorized
            }
            AdminError::InvalidPath | AdminError::MalformedForm(_) => ErrorKind::BadRequest,
            AdminError::FileNotFound => ErrorKind::NotFound,
            AdminError::Contest(e) => e.kind(),
            AdminError::Export(_) | AdminError::Database(_) | AdminError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn log(&self) {
        match self {
            AdminError::Database(e) => {
                tracing::error!(error = %e, "Admin database error");
            }
            AdminError::Export(e) => {
                tracing::error!(error = %e, "Registry export failed");
            }
            AdminError::Internal(msg) => {
                tracing::error!(message = %msg, "Admin internal error");
            }
            AdminError::InvalidCredentials => {
                tracing::warn!("Invalid admin login attempt");
            }
            AdminError::InvalidPath => {
                tracing::warn!("Rejected download path");
            }
            _ => {
                tracing::debug!(error = %self, "Admin error");
            }
        }
    }
}

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::Database(e) => AppError::from(e),
            AdminError::Contest(e) => AppError::from(e),
            AdminError::Export(e) => AppError::internal("Registry export failed").with_source(e),
            AdminError::InvalidCredentials => AppError::unauthorized(err.to_string())
                .with_action("Verificá la contraseña de administración."),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        match self {
            // Logged by the contest error itself
            AdminError::Contest(e) => e.into_response(),
            other => {
                other.log();
                AppError::from(other).into_response()
            }
        }
    }
}

//! Contest Error Types
//!
//! Messages are shown to participants as-is, so they are written in the
//! contest's language. Storage failures never expose their cause.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::FileCategory;

pub type ContestResult<T> = Result<T, ContestError>;

#[derive(Debug, Error)]
pub enum ContestError {
    /// A registration field is blank after trimming
    #[error("Complete todos los campos obligatorios ({0}).")]
    MissingField(&'static str),

    #[error("Debes ingresar tu código.")]
    MissingCode,

    /// Unknown or malformed access code
    #[error("Código no encontrado.")]
    CodeNotFound,

    /// File absent, unnamed, or with a disallowed extension
    #[error("{}", .0.missing_file_message())]
    InvalidFile(FileCategory),

    #[error("El envío supera el tamaño máximo permitido.")]
    PayloadTooLarge,

    #[error("Formulario inválido: {0}")]
    MalformedForm(String),

    /// Filename or code that would not stay inside the upload directory
    #[error("Nombre de archivo inválido.")]
    InvalidFilename,

    #[error("No se pudo generar un código único tras {attempts} intentos.")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ContestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContestError::MissingField(_)
            | ContestError::MissingCode
            | ContestError::InvalidFile(_)
            | ContestError::MalformedForm(_)
            | ContestError::InvalidFilename => ErrorKind::BadRequest,
            ContestError::CodeNotFound => ErrorKind::NotFound,
            ContestError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            ContestError::CodeSpaceExhausted { .. } => ErrorKind::ServiceUnavailable,
            ContestError::Storage(_) | ContestError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn log(&self) {
        match self {
            ContestError::Database(e) => {
                tracing::error!(error = %e, "Contest database error");
            }
            ContestError::Storage(e) => {
                tracing::error!(error = %e, "Contest file storage error");
            }
            ContestError::CodeSpaceExhausted { attempts } => {
                tracing::error!(attempts, "Access code space exhausted");
            }
            ContestError::PayloadTooLarge => {
                tracing::warn!("Upload exceeded body limit");
            }
            ContestError::InvalidFilename => {
                tracing::warn!("Rejected unsafe upload path");
            }
            _ => {
                tracing::debug!(error = %self, "Contest request rejected");
            }
        }
    }
}

impl From<ContestError> for AppError {
    fn from(err: ContestError) -> Self {
        match err {
            ContestError::Database(e) => AppError::from(e),
            ContestError::Storage(e) => AppError::internal("File storage error").with_source(e),
            ContestError::CodeNotFound => AppError::not_found(err.to_string())
                .with_action("Verificá el código que recibiste al inscribirte."),
            ContestError::CodeSpaceExhausted { .. } => {
                AppError::new(err.kind(), err.to_string()).with_action("Intentá nuevamente.")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for ContestError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::config::ContestConfig;
use crate::application::{RegisterInput, RegisterUseCase, SubmitInput, SubmitUseCase};
use crate::domain::repository::{FileStore, RegistrantRepository, SubmissionRepository};
use crate::domain::value_objects::{FileCategory, UploadedFile};
use crate::error::{ContestError, ContestResult};
use crate::presentation::dto::{
    FieldDescriptor, FormDescriptor, RegistrationForm, RegistrationResponse, SubmissionResponse,
};

/// Shared state for contest handlers
#[derive(Clone)]
pub struct ContestAppState<R, F>
where
    R: RegistrantRepository + SubmissionRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub files: Arc<F>,
    pub config: Arc<ContestConfig>,
}

/// GET /inscripcion
pub async fn registration_form() -> Json<FormDescriptor> {
    Json(FormDescriptor {
        campos: vec![
            FieldDescriptor::text("nombre", "Nombre y apellido"),
            FieldDescriptor::text("matricula", "Matrícula"),
            FieldDescriptor::text("seudonimo", "Seudónimo"),
        ],
        extensiones_permitidas: None,
        tamano_maximo_bytes: None,
    })
}

/// POST /inscripcion
pub async fn register<R, F>(
    State(state): State<ContestAppState<R, F>>,
    form: Result<Form<RegistrationForm>, FormRejection>,
) -> ContestResult<impl IntoResponse>
where
    R: RegistrantRepository + SubmissionRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let Form(form) = form.map_err(|rejection| ContestError::MalformedForm(rejection.body_text()))?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let registrant = use_case
        .execute(RegisterInput {
            full_name: form.nombre,
            student_id: form.matricula,
            pseudonym: form.seudonimo,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(registrant))))
}

/// GET /presentacion
pub async fn submission_form<R, F>(
    State(state): State<ContestAppState<R, F>>,
) -> Json<FormDescriptor>
where
    R: RegistrantRepository + SubmissionRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    Json(FormDescriptor {
        campos: vec![
            FieldDescriptor::text("codigo", "Código de inscripción"),
            FieldDescriptor::file(FileCategory::Project.as_str(), "Proyecto (PDF)"),
            FieldDescriptor::file(FileCategory::Declaration.as_str(), "Declaración jurada (PDF)"),
        ],
        extensiones_permitidas: Some(state.config.allowed_extensions.clone()),
        tamano_maximo_bytes: Some(state.config.max_upload_bytes),
    })
}

/// POST /presentacion
pub async fn submit<R, F>(
    State(state): State<ContestAppState<R, F>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ContestResult<impl IntoResponse>
where
    R: RegistrantRepository + SubmissionRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let mut multipart =
        multipart.map_err(|rejection| ContestError::MalformedForm(rejection.body_text()))?;

    // Every part is buffered before the use case runs, so an oversized
    // body is rejected before anything reaches the disk.
    let mut input = SubmitInput::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "codigo" {
            input.code = field.text().await.map_err(multipart_error)?;
            continue;
        }

        let Some(category) = FileCategory::parse(&name) else {
            tracing::debug!(field = %name, "Ignoring unknown form field");
            continue;
        };
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        let file = Some(UploadedFile { file_name, bytes });

        match category {
            FileCategory::Project => input.project = file,
            FileCategory::Declaration => input.declaration = file,
        }
    }

    let use_case = SubmitUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.files.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(input).await?;

    let submitted_at = output
        .submissions
        .first()
        .map(|s| s.submitted_at)
        .unwrap_or_else(chrono::Utc::now);
    let files = output
        .submissions
        .into_iter()
        .map(|s| s.stored_filename)
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::success(
            output.registrant.access_code,
            files,
            submitted_at,
        )),
    ))
}

fn multipart_error(err: MultipartError) -> ContestError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ContestError::PayloadTooLarge
    } else {
        ContestError::MalformedForm(err.body_text())
    }
}

//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect};
use contest::domain::repository::FileStore;
use tokio_util::io::ReaderStream;

use crate::application::config::AdminConfig;
use crate::application::{
    CheckSessionUseCase, DownloadFileUseCase, ExportRegistryUseCase, QueryRegistryUseCase,
    SignInUseCase, SignOutUseCase,
};
use crate::domain::repository::{AdminSessionRepository, RegistryQueryRepository};
use crate::error::{AdminError, AdminResult};
use crate::presentation::dto::{
    FileItem, FilesResponse, LoginForm, LoginStatusResponse, PanelItem, PanelResponse,
    RegistryItem, RegistryResponse,
};
use crate::presentation::router::{LOGIN_PATH, PANEL_PATH};

/// Shared state for admin handlers
#[derive(Clone)]
pub struct AdminAppState<R, F>
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub files: Arc<F>,
    pub config: Arc<AdminConfig>,
}

/// GET /admin/login
pub async fn login_status<R, F>(
    State(state): State<AdminAppState<R, F>>,
    headers: HeaderMap,
) -> AdminResult<Json<LoginStatusResponse>>
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let authenticated = match token {
        Some(token) => {
            CheckSessionUseCase::new(state.repo.clone(), state.config.clone())
                .is_valid(&token)
                .await?
        }
        None => false,
    };

    Ok(Json(LoginStatusResponse { authenticated }))
}

/// POST /admin/login
pub async fn login<R, F>(
    State(state): State<AdminAppState<R, F>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AdminResult<impl IntoResponse>
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let Form(form) = form.map_err(|rejection| AdminError::MalformedForm(rejection.body_text()))?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(form.password).await?;

    let cookie = state.config.session_cookie().build_set_cookie(&output.session_token);

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(PANEL_PATH)))
}

/// POST /admin/logout
pub async fn logout<R, F>(
    State(state): State<AdminAppState<R, F>>,
    headers: HeaderMap,
) -> AdminResult<impl IntoResponse>
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        SignOutUseCase::new(state.repo.clone(), state.config.clone())
            .execute(&token)
            .await?;
    }

    let cookie = state.config.session_cookie().build_delete_cookie();

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(LOGIN_PATH)))
}

/// GET /admin/panel
pub async fn panel<R, F>(
    State(state): State<AdminAppState<R, F>>,
) -> AdminResult<Json<PanelResponse>>
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let overview = QueryRegistryUseCase::new(state.repo.clone(), state.config.clone())
        .overview()
        .await?;

    Ok(Json(PanelResponse {
        total: overview.len(),
        inscriptos: overview.into_iter().map(PanelItem::from).collect(),
    }))
}

/// GET /admin/registry
pub async fn registry<R, F>(
    State(state): State<AdminAppState<R, F>>,
) -> AdminResult<Json<RegistryResponse>>
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let entries = QueryRegistryUseCase::new(state.repo.clone(), state.config.clone())
        .registry()
        .await?;

    Ok(Json(RegistryResponse {
        total: entries.len(),
        registros: entries.into_iter().map(RegistryItem::from).collect(),
    }))
}

/// GET /admin/registry.csv
pub async fn registry_csv<R, F>(
    State(state): State<AdminAppState<R, F>>,
) -> AdminResult<impl IntoResponse>
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let csv = ExportRegistryUseCase::new(state.repo.clone()).execute().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"inscripciones.csv\"",
            ),
        ],
        csv,
    ))
}

/// GET /admin/files/{codigo}
pub async fn files<R, F>(
    State(state): State<AdminAppState<R, F>>,
    Path(codigo): Path<String>,
) -> AdminResult<Json<FilesResponse>>
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let files = QueryRegistryUseCase::new(state.repo.clone(), state.config.clone())
        .files(&codigo)
        .await?;

    let codigo = codigo.trim().to_string();
    Ok(Json(FilesResponse {
        archivos: files
            .into_iter()
            .map(|file| FileItem::new(&codigo, file))
            .collect(),
        codigo,
    }))
}

/// GET /admin/download/{codigo}/{filename}
pub async fn download<R, F>(
    State(state): State<AdminAppState<R, F>>,
    Path((codigo, filename)): Path<(String, String)>,
) -> AdminResult<impl IntoResponse>
where
    R: AdminSessionRepository + RegistryQueryRepository + Clone + Send + Sync + 'static,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let file = DownloadFileUseCase::new(state.files.clone(), state.config.clone())
        .execute(&codigo, &filename)
        .await?;

    // The filename is already restricted to [A-Za-z0-9_.-]
    let disposition = format!("attachment; filename=\"{}\"", file.filename);

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_LENGTH, file.stored.len.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(ReaderStream::new(file.stored.file)),
    ))
}

//! Admin integration tests
//!
//! Registrants and submissions are created through the contest use cases
//! against the same in-memory database the admin router reads.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use contest::application::{RegisterInput, RegisterUseCase, SubmitInput, SubmitUseCase};
use contest::domain::value_objects::UploadedFile;
use contest::{AccessCode, ContestConfig, DiskFileStore, MIGRATOR, SqliteContestRepository};
use platform::password::ClearTextPassword;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use crate::application::CheckSessionUseCase;
use crate::application::session_token::create_session_token;
use crate::domain::entities::AdminSession;
use crate::domain::repository::AdminSessionRepository;
use crate::{AdminConfig, AdminError, AdminResult, SqliteAdminRepository, admin_router};

const PASSWORD: &str = "correct horse battery";

async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}

struct Harness {
    pool: SqlitePool,
    upload_dir: PathBuf,
    config: AdminConfig,
}

impl Harness {
    async fn new() -> Self {
        let hash = ClearTextPassword::new_secret(PASSWORD.to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        Self {
            pool: memory_pool().await,
            upload_dir: std::env::temp_dir().join(format!("admin-test-{}", uuid::Uuid::new_v4())),
            config: AdminConfig::development(hash),
        }
    }

    fn router(&self) -> Router {
        admin_router(
            SqliteAdminRepository::new(self.pool.clone()),
            DiskFileStore::new(self.upload_dir.clone()),
            self.config.clone(),
        )
    }

    fn contest_config(&self) -> Arc<ContestConfig> {
        Arc::new(ContestConfig::with_upload_dir(self.upload_dir.clone()))
    }

    async fn register(&self, pseudonym: &str) -> AccessCode {
        let repo = Arc::new(SqliteContestRepository::new(self.pool.clone()));
        RegisterUseCase::new(repo, self.contest_config())
            .execute(RegisterInput {
                full_name: "Ana Ruiz".into(),
                student_id: "12345".into(),
                pseudonym: pseudonym.into(),
            })
            .await
            .unwrap()
            .access_code
    }

    async fn submit(&self, code: &AccessCode) {
        let repo = Arc::new(SqliteContestRepository::new(self.pool.clone()));
        let files = Arc::new(DiskFileStore::new(self.upload_dir.clone()));
        let pdf = |name: &str| {
            Some(UploadedFile {
                file_name: name.into(),
                bytes: Bytes::from_static(b"%PDF-1.7 contest"),
            })
        };
        SubmitUseCase::new(repo.clone(), repo, files, self.contest_config())
            .execute(SubmitInput {
                code: code.to_string(),
                project: pdf("proyecto.pdf"),
                declaration: pdf("declaracion.pdf"),
            })
            .await
            .unwrap();
    }

    /// Log in and return the `name=value` cookie pair
    async fn login(&self) -> String {
        let response = self.router().oneshot(login_request(PASSWORD)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("login sets a session cookie")
    }

    async fn session_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM admin_sessions")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

fn login_request(password: &str) -> Request<Body> {
    let password: String = url_encode(password);
    Request::builder()
        .method("POST")
        .uri("/admin/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("password={password}")))
        .unwrap()
}

fn url_encode(value: &str) -> String {
    value.replace(' ', "+")
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn session_cookie(response: &Response) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?.to_string();
    (!pair.ends_with('=')).then_some(pair)
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_body(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ============================================================================
// Session gate
// ============================================================================

#[tokio::test]
async fn test_protected_routes_redirect_without_session() {
    let h = Harness::new().await;
    let code = h.register("Nébula").await;
    h.submit(&code).await;

    for uri in [
        "/admin/panel".to_string(),
        "/admin/registry".to_string(),
        "/admin/registry.csv".to_string(),
        format!("/admin/files/{code}"),
        format!("/admin/download/{code}/proyecto_proyecto.pdf"),
    ] {
        let response = h.router().oneshot(get(&uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/admin/login");
        assert!(body_bytes(response).await.is_empty(), "{uri} leaked a body");
    }
}

#[tokio::test]
async fn test_forged_cookie_redirects() {
    let h = Harness::new().await;
    let forged = create_session_token(&uuid::Uuid::new_v4(), &[0u8; 32]);

    let response = h
        .router()
        .oneshot(get("/admin/panel", Some(&format!("admin_session={forged}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login");
}

#[tokio::test]
async fn test_wrong_password_is_401_without_session() {
    let h = Harness::new().await;

    let response = h.router().oneshot(login_request("wrong password")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    assert_eq!(json_body(response).await["status"], 401);
    assert_eq!(h.session_count().await, 0);
}

#[tokio::test]
async fn test_login_then_logout() {
    let h = Harness::new().await;

    let cookie = h.login().await;
    assert_eq!(h.session_count().await, 1);

    let status = json_body(
        h.router()
            .oneshot(get("/admin/login", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status["authenticated"], true);

    let response = h
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login");
    assert!(session_cookie(&response).is_none());
    assert_eq!(h.session_count().await, 0);

    let response = h
        .router()
        .oneshot(get("/admin/panel", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_expired_session_is_deleted() {
    let h = Harness::new().await;
    let repo = Arc::new(SqliteAdminRepository::new(h.pool.clone()));
    let config = Arc::new(h.config.clone());

    let session = AdminSession::new(chrono::Duration::seconds(-5));
    repo.create(&session).await.unwrap();
    let token = create_session_token(&session.session_id, &config.session_secret);

    let err = CheckSessionUseCase::new(repo.clone(), config)
        .get_session(&token)
        .await
        .unwrap_err();

    assert!(matches!(err, AdminError::SessionInvalid));
    assert_eq!(h.session_count().await, 0);
}

/// Session store that counts the writes it is asked to make
struct CountingSessions {
    inner: SqliteAdminRepository,
    writes: AtomicUsize,
}

impl AdminSessionRepository for CountingSessions {
    async fn create(&self, session: &AdminSession) -> AdminResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.create(session).await
    }

    async fn find_by_id(&self, session_id: uuid::Uuid) -> AdminResult<Option<AdminSession>> {
        self.inner.find_by_id(session_id).await
    }

    async fn delete(&self, session_id: uuid::Uuid) -> AdminResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(session_id).await
    }

    async fn delete_expired(&self) -> AdminResult<u64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_expired().await
    }
}

#[tokio::test]
async fn test_live_session_check_does_not_write() {
    let h = Harness::new().await;
    let repo = SqliteAdminRepository::new(h.pool.clone());
    let config = Arc::new(h.config.clone());

    let session = AdminSession::new(chrono::Duration::hours(1));
    repo.create(&session).await.unwrap();
    let token = create_session_token(&session.session_id, &config.session_secret);

    let counting = Arc::new(CountingSessions {
        inner: repo,
        writes: AtomicUsize::new(0),
    });
    let check = CheckSessionUseCase::new(counting.clone(), config);
    for _ in 0..3 {
        let found = check.get_session(&token).await.unwrap();
        assert_eq!(found.session_id, session.session_id);
        assert_eq!(found.expires_at_ms, session.expires_at_ms);
    }

    assert_eq!(counting.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_cleanup_removes_only_expired_sessions() {
    let h = Harness::new().await;
    let repo = SqliteAdminRepository::new(h.pool.clone());

    repo.create(&AdminSession::new(chrono::Duration::seconds(-5)))
        .await
        .unwrap();
    repo.create(&AdminSession::new(chrono::Duration::hours(1)))
        .await
        .unwrap();

    assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
    assert_eq!(h.session_count().await, 1);
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_panel_counts_two_files_per_submission() {
    let h = Harness::new().await;
    let first = h.register("Nébula").await;
    let second = h.register("Cometa").await;
    h.submit(&first).await;
    h.submit(&first).await;
    let cookie = h.login().await;

    let response = h
        .router()
        .oneshot(get("/admin/panel", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let panel = json_body(response).await;

    assert_eq!(panel["total"], 2);
    let rows = panel["inscriptos"].as_array().unwrap();
    // Newest first
    assert_eq!(rows[0]["codigo"], second.as_str());
    assert_eq!(rows[0]["archivos"], 0);
    assert_eq!(rows[1]["codigo"], first.as_str());
    assert_eq!(rows[1]["seudonimo"], "Nébula");
    assert_eq!(rows[1]["archivos"], 4);
}

#[tokio::test]
async fn test_registry_csv_export() {
    let h = Harness::new().await;
    let first = h.register("Nébula").await;
    let second = h.register("Cometa, la segunda").await;
    let cookie = h.login().await;

    let response = h
        .router()
        .oneshot(get("/admin/registry.csv", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );

    let csv = String::from_utf8(body_bytes(response).await).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "id,nombre,matricula,seudonimo,codigo,fecha_registro");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with(&format!("2,Ana Ruiz,12345,\"Cometa, la segunda\",{second},")));
    assert!(lines[2].starts_with(&format!("1,Ana Ruiz,12345,Nébula,{first},")));
}

#[tokio::test]
async fn test_files_lists_download_links() {
    let h = Harness::new().await;
    let code = h.register("Nébula").await;
    h.submit(&code).await;
    let cookie = h.login().await;

    let files = json_body(
        h.router()
            .oneshot(get(&format!("/admin/files/{code}"), Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;

    let archivos = files["archivos"].as_array().unwrap();
    assert_eq!(archivos.len(), 2);
    assert_eq!(archivos[0]["categoria"], "proyecto");
    assert_eq!(
        archivos[0]["descarga"],
        format!("/admin/download/{code}/proyecto_proyecto.pdf")
    );
}

// ============================================================================
// Download
// ============================================================================

#[tokio::test]
async fn test_download_returns_attachment() {
    let h = Harness::new().await;
    let code = h.register("Nébula").await;
    h.submit(&code).await;
    let cookie = h.login().await;

    let response = h
        .router()
        .oneshot(get(
            &format!("/admin/download/{code}/declaracion_declaracion.pdf"),
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "16");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"declaracion_declaracion.pdf\""
    );
    assert_eq!(body_bytes(response).await, b"%PDF-1.7 contest");
}

#[tokio::test]
async fn test_download_streams_large_file() {
    let h = Harness::new().await;
    let code = h.register("Nébula").await;
    let cookie = h.login().await;

    let content: Vec<u8> = (0..3 * 1024 * 1024 + 17).map(|i| (i % 251) as u8).collect();
    let dir = h.upload_dir.join(code.as_str());
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("proyecto_grande.pdf"), &content).unwrap();

    let response = h
        .router()
        .oneshot(get(
            &format!("/admin/download/{code}/proyecto_grande.pdf"),
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_LENGTH],
        content.len().to_string().as_str()
    );
    assert_eq!(body_bytes(response).await, content);
}

#[tokio::test]
async fn test_download_rejects_traversal_and_bad_codes() {
    let h = Harness::new().await;
    let code = h.register("Nébula").await;
    h.submit(&code).await;
    let cookie = h.login().await;

    for uri in [
        format!("/admin/download/{code}/.."),
        format!("/admin/download/{code}/..%2F..%2Fconcurso.db"),
        format!("/admin/download/{code}/a%5Cb.pdf"),
        "/admin/download/..%2Fuploads/proyecto_proyecto.pdf".to_string(),
        "/admin/download/not-a-code/proyecto_proyecto.pdf".to_string(),
    ] {
        let response = h.router().oneshot(get(&uri, Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_download_missing_file_is_404() {
    let h = Harness::new().await;
    let code = h.register("Nébula").await;
    let cookie = h.login().await;

    let response = h
        .router()
        .oneshot(get(
            &format!("/admin/download/{code}/proyecto_otro.pdf"),
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

//! SQLite Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{RegistrantId, SubmissionId};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::entities::{AdminSession, RegistrantOverview, RegistryEntry, SubmittedFile};
use crate::domain::repository::{AdminSessionRepository, RegistryQueryRepository};
use crate::error::AdminResult;

/// SQLite-backed repository
#[derive(Clone)]
pub struct SqliteAdminRepository {
    pool: SqlitePool,
}

impl SqliteAdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> AdminResult<u64> {
        let deleted = self.delete_expired().await?;
        tracing::info!(sessions = deleted, "Cleaned up expired admin sessions");
        Ok(deleted)
    }
}

impl AdminSessionRepository for SqliteAdminRepository {
    async fn create(&self, session: &AdminSession) -> AdminResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admin_sessions (
                admin_session_id,
                expires_at_ms,
                created_at
            ) VALUES (?, ?, ?)
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AdminResult<Option<AdminSession>> {
        let row = sqlx::query_as::<_, AdminSessionRow>(
            r#"
            SELECT admin_session_id, expires_at_ms, created_at
            FROM admin_sessions
            WHERE admin_session_id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, session_id: Uuid) -> AdminResult<()> {
        sqlx::query("DELETE FROM admin_sessions WHERE admin_session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_expired(&self) -> AdminResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM admin_sessions WHERE expires_at_ms < ?")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

impl RegistryQueryRepository for SqliteAdminRepository {
    async fn list_overview(&self) -> AdminResult<Vec<RegistrantOverview>> {
        let rows = sqlx::query_as::<_, OverviewRow>(
            r#"
            SELECT
                r.registrant_id,
                r.registered_at,
                r.pseudonym,
                r.access_code,
                r.student_id,
                COUNT(s.submission_id) AS file_count
            FROM registrants r
            LEFT JOIN submissions s ON s.registrant_id = r.registrant_id
            GROUP BY r.registrant_id
            ORDER BY r.registrant_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_registry(&self) -> AdminResult<Vec<RegistryEntry>> {
        let rows = sqlx::query_as::<_, RegistryRow>(
            r#"
            SELECT
                registrant_id,
                registered_at,
                full_name,
                student_id,
                pseudonym,
                access_code
            FROM registrants
            ORDER BY registrant_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_files(&self, access_code: &str) -> AdminResult<Vec<SubmittedFile>> {
        let rows = sqlx::query_as::<_, SubmittedFileRow>(
            r#"
            SELECT submission_id, stored_filename, file_category, submitted_at
            FROM submissions
            WHERE access_code = ?
            ORDER BY submission_id
            "#,
        )
        .bind(access_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct AdminSessionRow {
    admin_session_id: Uuid,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl From<AdminSessionRow> for AdminSession {
    fn from(row: AdminSessionRow) -> Self {
        Self {
            session_id: row.admin_session_id,
            expires_at_ms: row.expires_at_ms,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OverviewRow {
    registrant_id: i64,
    registered_at: DateTime<Utc>,
    pseudonym: String,
    access_code: String,
    student_id: String,
    file_count: i64,
}

impl From<OverviewRow> for RegistrantOverview {
    fn from(row: OverviewRow) -> Self {
        Self {
            id: RegistrantId::from_i64(row.registrant_id),
            registered_at: row.registered_at,
            pseudonym: row.pseudonym,
            access_code: row.access_code,
            student_id: row.student_id,
            file_count: row.file_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RegistryRow {
    registrant_id: i64,
    registered_at: DateTime<Utc>,
    full_name: String,
    student_id: String,
    pseudonym: String,
    access_code: String,
}

impl From<RegistryRow> for RegistryEntry {
    fn from(row: RegistryRow) -> Self {
        Self {
            id: RegistrantId::from_i64(row.registrant_id),
            registered_at: row.registered_at,
            full_name: row.full_name,
            student_id: row.student_id,
            pseudonym: row.pseudonym,
            access_code: row.access_code,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SubmittedFileRow {
    submission_id: i64,
    stored_filename: String,
    file_category: String,
    submitted_at: DateTime<Utc>,
}

impl From<SubmittedFileRow> for SubmittedFile {
    fn from(row: SubmittedFileRow) -> Self {
        Self {
            id: SubmissionId::from_i64(row.submission_id),
            stored_filename: row.stored_filename,
            category: row.file_category,
            submitted_at: row.submitted_at,
        }
    }
}

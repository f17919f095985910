//! SQLite Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{RegistrantId, SubmissionId};
use sqlx::SqlitePool;

use crate::domain::entities::{NewRegistrant, NewSubmission, Registrant, Submission};
use crate::domain::repository::{RegistrantRepository, SubmissionRepository};
use crate::domain::value_objects::AccessCode;
use crate::error::ContestResult;

/// SQLite-backed repository
#[derive(Clone)]
pub struct SqliteContestRepository {
    pool: SqlitePool,
}

impl SqliteContestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RegistrantRepository for SqliteContestRepository {
    async fn try_insert(
        &self,
        registrant: &NewRegistrant,
        code: &AccessCode,
        registered_at: DateTime<Utc>,
    ) -> ContestResult<Option<RegistrantId>> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO registrants (
                full_name,
                student_id,
                pseudonym,
                access_code,
                registered_at
            ) VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (access_code) DO NOTHING
            RETURNING registrant_id
            "#,
        )
        .bind(&registrant.full_name)
        .bind(&registrant.student_id)
        .bind(&registrant.pseudonym)
        .bind(code.as_str())
        .bind(registered_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id.map(RegistrantId::from_i64))
    }

    async fn find_by_code(&self, code: &AccessCode) -> ContestResult<Option<Registrant>> {
        let row = sqlx::query_as::<_, RegistrantRow>(
            r#"
            SELECT
                registrant_id,
                full_name,
                student_id,
                pseudonym,
                access_code,
                registered_at
            FROM registrants
            WHERE access_code = ?
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RegistrantRow::into_registrant))
    }
}

impl SubmissionRepository for SqliteContestRepository {
    async fn record(&self, entries: &[NewSubmission]) -> ContestResult<Vec<Submission>> {
        let mut tx = self.pool.begin().await?;
        let mut recorded = Vec::with_capacity(entries.len());

        for entry in entries {
            let id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO submissions (
                    registrant_id,
                    access_code,
                    stored_filename,
                    file_category,
                    submitted_at
                ) VALUES (?, ?, ?, ?, ?)
                RETURNING submission_id
                "#,
            )
            .bind(entry.registrant_id.as_i64())
            .bind(entry.access_code.as_str())
            .bind(&entry.stored_filename)
            .bind(entry.category.as_str())
            .bind(entry.submitted_at)
            .fetch_one(&mut *tx)
            .await?;

            recorded.push(Submission::recorded(
                SubmissionId::from_i64(id),
                entry.clone(),
            ));
        }

        tx.commit().await?;

        tracing::debug!(count = recorded.len(), "Submission rows inserted");
        Ok(recorded)
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct RegistrantRow {
    registrant_id: i64,
    full_name: String,
    student_id: String,
    pseudonym: String,
    access_code: String,
    registered_at: DateTime<Utc>,
}

impl RegistrantRow {
    fn into_registrant(self) -> Registrant {
        Registrant {
            id: RegistrantId::from_i64(self.registrant_id),
            full_name: self.full_name,
            student_id: self.student_id,
            pseudonym: self.pseudonym,
            access_code: AccessCode::from_stored(self.access_code),
            registered_at: self.registered_at,
        }
    }
}

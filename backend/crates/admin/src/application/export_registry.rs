//! Export Registry Use Case
//!
//! Renders the registrant registry as CSV straight from the store.

use std::sync::Arc;

use crate::domain::repository::RegistryQueryRepository;
use crate::error::AdminResult;

pub const CSV_HEADER: [&str; 6] = [
    "id",
    "nombre",
    "matricula",
    "seudonimo",
    "codigo",
    "fecha_registro",
];

/// Timestamp layout of the `fecha_registro` column
const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct ExportRegistryUseCase<Q>
where
    Q: RegistryQueryRepository,
{
    query_repo: Arc<Q>,
}

impl<Q> ExportRegistryUseCase<Q>
where
    Q: RegistryQueryRepository,
{
    pub fn new(query_repo: Arc<Q>) -> Self {
        Self { query_repo }
    }

    /// CSV bytes: header row, then one row per registrant, newest first
    pub async fn execute(&self) -> AdminResult<Vec<u8>> {
        let entries = self.query_repo.list_registry().await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;
        for entry in &entries {
            writer.write_record([
                entry.id.to_string(),
                entry.full_name.clone(),
                entry.student_id.clone(),
                entry.pseudonym.clone(),
                entry.access_code.clone(),
                entry.registered_at.format(CSV_TIMESTAMP_FORMAT).to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;

        tracing::info!(rows = entries.len(), "Registry exported");
        Ok(bytes)
    }
}

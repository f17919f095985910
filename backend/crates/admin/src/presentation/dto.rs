//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{RegistrantOverview, RegistryEntry, SubmittedFile};

/// Request for POST /admin/login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// Response for GET /admin/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginStatusResponse {
    pub authenticated: bool,
}

/// Response for GET /admin/panel
#[derive(Debug, Clone, Serialize)]
pub struct PanelResponse {
    pub total: usize,
    pub inscriptos: Vec<PanelItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelItem {
    pub id: i64,
    pub fecha_registro: DateTime<Utc>,
    pub seudonimo: String,
    pub codigo: String,
    pub matricula: String,
    pub archivos: i64,
}

impl From<RegistrantOverview> for PanelItem {
    fn from(overview: RegistrantOverview) -> Self {
        Self {
            id: overview.id.as_i64(),
            fecha_registro: overview.registered_at,
            seudonimo: overview.pseudonym,
            codigo: overview.access_code,
            matricula: overview.student_id,
            archivos: overview.file_count,
        }
    }
}

/// Response for GET /admin/registry
#[derive(Debug, Clone, Serialize)]
pub struct RegistryResponse {
    pub total: usize,
    pub registros: Vec<RegistryItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryItem {
    pub id: i64,
    pub fecha_registro: DateTime<Utc>,
    pub nombre: String,
    pub matricula: String,
    pub seudonimo: String,
    pub codigo: String,
}

impl From<RegistryEntry> for RegistryItem {
    fn from(entry: RegistryEntry) -> Self {
        Self {
            id: entry.id.as_i64(),
            fecha_registro: entry.registered_at,
            nombre: entry.full_name,
            matricula: entry.student_id,
            seudonimo: entry.pseudonym,
            codigo: entry.access_code,
        }
    }
}

/// Response for GET /admin/files/{codigo}
#[derive(Debug, Clone, Serialize)]
pub struct FilesResponse {
    pub codigo: String,
    pub archivos: Vec<FileItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileItem {
    pub id: i64,
    pub archivo: String,
    pub categoria: String,
    pub fecha: DateTime<Utc>,
    /// Relative download link
    pub descarga: String,
}

impl FileItem {
    pub fn new(codigo: &str, file: SubmittedFile) -> Self {
        Self {
            id: file.id.as_i64(),
            descarga: format!("/admin/download/{codigo}/{}", file.stored_filename),
            archivo: file.stored_filename,
            categoria: file.category,
            fecha: file.submitted_at,
        }
    }
}

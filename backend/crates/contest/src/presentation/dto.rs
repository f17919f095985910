//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Registrant;
use crate::domain::value_objects::AccessCode;

/// Request for POST /inscripcion
///
/// Missing fields deserialize as empty and are reported by the use case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub matricula: String,
    #[serde(default)]
    pub seudonimo: String,
}

/// Response for POST /inscripcion
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub id: i64,
    pub nombre: String,
    pub seudonimo: String,
    pub codigo: AccessCode,
    pub fecha_registro: DateTime<Utc>,
}

impl From<Registrant> for RegistrationResponse {
    fn from(registrant: Registrant) -> Self {
        Self {
            id: registrant.id.as_i64(),
            nombre: registrant.full_name,
            seudonimo: registrant.pseudonym,
            codigo: registrant.access_code,
            fecha_registro: registrant.registered_at,
        }
    }
}

/// Response for POST /presentacion
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub mensaje: String,
    pub codigo: AccessCode,
    pub archivos: Vec<String>,
    pub fecha: DateTime<Utc>,
}

impl SubmissionResponse {
    pub fn success(codigo: AccessCode, archivos: Vec<String>, fecha: DateTime<Utc>) -> Self {
        Self {
            mensaje: format!(
                "Archivos subidos correctamente. Tu envío queda identificado por el código: {codigo}"
            ),
            codigo,
            archivos,
            fecha,
        }
    }
}

/// Response for GET /inscripcion and GET /presentacion
#[derive(Debug, Clone, Serialize)]
pub struct FormDescriptor {
    pub campos: Vec<FieldDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensiones_permitidas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tamano_maximo_bytes: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub nombre: &'static str,
    pub etiqueta: &'static str,
    pub tipo: &'static str,
    pub requerido: bool,
}

impl FieldDescriptor {
    pub const fn text(nombre: &'static str, etiqueta: &'static str) -> Self {
        Self {
            nombre,
            etiqueta,
            tipo: "text",
            requerido: true,
        }
    }

    pub const fn file(nombre: &'static str, etiqueta: &'static str) -> Self {
        Self {
            nombre,
            etiqueta,
            tipo: "file",
            requerido: true,
        }
    }
}

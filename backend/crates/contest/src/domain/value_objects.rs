//! Domain Value Objects

use std::fmt;

use bytes::Bytes;
use platform::filename::sanitize_filename;
use serde::Serialize;
use uuid::Uuid;

/// Characters an access code is drawn from. `0`/`O` and `1`/`I` are left
/// out so codes survive being read aloud or copied by hand.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const DEFAULT_CODE_PREFIX: &str = "CARN2-";
pub const DEFAULT_CODE_LENGTH: usize = 8;
pub const MAX_CODE_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeFormatError {
    /// Codes double as directory names, so the prefix must survive sanitising
    #[error("code prefix {0:?} is not a safe directory name")]
    UnsafePrefix(String),

    #[error("code length must be between 1 and {MAX_CODE_LENGTH}, got {0}")]
    InvalidLength(usize),
}

/// Shape of an access code: fixed prefix plus `length` alphabet characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFormat {
    prefix: String,
    length: usize,
}

impl CodeFormat {
    pub fn new(prefix: impl Into<String>, length: usize) -> Result<Self, CodeFormatError> {
        let prefix = prefix.into();
        if !(1..=MAX_CODE_LENGTH).contains(&length) {
            return Err(CodeFormatError::InvalidLength(length));
        }

        // Every generated code must come out of sanitize_filename unchanged
        let sample = format!("{prefix}{}", "A".repeat(length));
        if sanitize_filename(&sample) != sample {
            return Err(CodeFormatError::UnsafePrefix(prefix));
        }

        Ok(Self { prefix, length })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct codes this format can produce
    pub fn capacity(&self) -> f64 {
        (CODE_ALPHABET.len() as f64).powi(self.length as i32)
    }

    /// Parse user input into a code of this format.
    ///
    /// Surrounding whitespace is ignored; everything else must match exactly.
    pub fn parse(&self, raw: &str) -> Option<AccessCode> {
        let raw = raw.trim();
        let body = raw.strip_prefix(self.prefix.as_str())?;
        let well_formed =
            body.len() == self.length && body.bytes().all(|b| CODE_ALPHABET.contains(&b));
        well_formed.then(|| AccessCode(raw.to_string()))
    }
}

impl Default for CodeFormat {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CODE_PREFIX.to_string(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

/// Unique code handed to a registrant, used in place of credentials
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccessCode(String);

impl AccessCode {
    /// Wrap a code read back from the store
    pub(crate) fn from_stored(code: String) -> Self {
        Self(code)
    }

    pub(crate) fn from_generated(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two documents every submission consists of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileCategory {
    #[serde(rename = "proyecto")]
    Project,
    #[serde(rename = "declaracion")]
    Declaration,
}

impl FileCategory {
    pub const ALL: [FileCategory; 2] = [FileCategory::Project, FileCategory::Declaration];

    /// Value stored in `submissions.file_category`; also the form field name
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Project => "proyecto",
            FileCategory::Declaration => "declaracion",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn filename_prefix(&self) -> &'static str {
        match self {
            FileCategory::Project => "proyecto_",
            FileCategory::Declaration => "declaracion_",
        }
    }

    pub fn missing_file_message(&self) -> &'static str {
        match self {
            FileCategory::Project => "Subí el archivo PDF del proyecto.",
            FileCategory::Declaration => "Subí la declaración jurada en PDF.",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File received from the submission form, fully buffered
#[derive(Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Upload written under a temporary name, not yet visible as `filename`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub code: AccessCode,
    pub filename: String,
    /// Distinguishes concurrent stagings of the same filename
    pub token: Uuid,
}

/// Stored upload opened for reading
#[derive(Debug)]
pub struct StoredFile {
    pub file: tokio::fs::File,
    pub len: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_well_formed_codes() {
        let format = CodeFormat::default();
        let code = format.parse("  CARN2-7XQJ2M4F \n").unwrap();
        assert_eq!(code.as_str(), "CARN2-7XQJ2M4F");
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        let format = CodeFormat::default();
        for raw in [
            "",
            "CARN2-",
            "CARN2-7XQJ2M4",
            "CARN2-7XQJ2M4FF",
            "CARN2-7XQJ2M4O",
            "carn2-7XQJ2M4F",
            "CARN2-7xqj2m4f",
            "CARN2-../../..",
            "XXXX2-7XQJ2M4F",
        ] {
            assert!(format.parse(raw).is_none(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_alphabet_excludes_ambiguous_characters() {
        for ch in [b'0', b'O', b'1', b'I'] {
            assert!(!CODE_ALPHABET.contains(&ch));
        }
        assert_eq!(CODE_ALPHABET.len(), 32);
    }

    #[test]
    fn test_capacity() {
        assert_eq!(CodeFormat::new("X-", 2).unwrap().capacity(), 1024.0);
    }

    #[test]
    fn test_new_accepts_directory_safe_formats() {
        let format = CodeFormat::new("CARN2-", 8).unwrap();
        assert_eq!(format, CodeFormat::default());
        assert!(CodeFormat::new("", 6).is_ok());
        assert!(CodeFormat::new("CONCURSO_2026.", 4).is_ok());
    }

    #[test]
    fn test_new_rejects_prefixes_that_change_when_sanitized() {
        for prefix in ["CARN 2-", "a/b-", ".CARN-", "_X-", "Año-", "X\\"] {
            assert_eq!(
                CodeFormat::new(prefix, 8),
                Err(CodeFormatError::UnsafePrefix(prefix.to_string())),
                "{prefix:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_rejects_out_of_range_lengths() {
        assert_eq!(
            CodeFormat::new("CARN2-", 0),
            Err(CodeFormatError::InvalidLength(0))
        );
        assert_eq!(
            CodeFormat::new("CARN2-", MAX_CODE_LENGTH + 1),
            Err(CodeFormatError::InvalidLength(MAX_CODE_LENGTH + 1))
        );
    }

    #[test]
    fn test_file_category_strings() {
        for category in FileCategory::ALL {
            assert_eq!(FileCategory::parse(category.as_str()), Some(category));
            assert!(category.filename_prefix().starts_with(category.as_str()));
        }
        assert_eq!(FileCategory::parse("otro"), None);
        assert_eq!(
            serde_json::to_string(&FileCategory::Declaration).unwrap(),
            r#""declaracion""#
        );
    }
}

//! Application Configuration

use std::path::PathBuf;

use platform::filename::has_allowed_extension;

use crate::domain::value_objects::CodeFormat;

/// 500 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

/// Contest application configuration
#[derive(Debug, Clone)]
pub struct ContestConfig {
    /// Root directory; each registrant gets `<upload_dir>/<code>/`
    pub upload_dir: PathBuf,
    /// Hard cap on a submission request body
    pub max_upload_bytes: usize,
    /// Accepted extensions, lower case, without the dot
    pub allowed_extensions: Vec<String>,
    pub code_format: CodeFormat,
    /// Insert attempts before giving up on finding a free code
    pub code_max_attempts: u32,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: vec!["pdf".to_string()],
            code_format: CodeFormat::default(),
            code_max_attempts: 8,
        }
    }
}

impl ContestConfig {
    pub fn with_upload_dir(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            ..Default::default()
        }
    }

    /// Whether a client-supplied filename carries an accepted extension
    pub fn allows(&self, file_name: &str) -> bool {
        has_allowed_extension(file_name, &self.allowed_extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ContestConfig::default();
        assert_eq!(config.max_upload_bytes, 524_288_000);
        assert_eq!(config.allowed_extensions, vec!["pdf"]);
        assert_eq!(config.code_format.prefix(), "CARN2-");
        assert_eq!(config.code_format.length(), 8);
        assert_eq!(config.code_max_attempts, 8);
    }

    #[test]
    fn test_allows_only_configured_extensions() {
        let mut config = ContestConfig::with_upload_dir("/tmp/x");
        assert!(config.allows("a.PDF"));
        assert!(!config.allows("a.odt"));

        config.allowed_extensions.push("odt".to_string());
        assert!(config.allows("a.odt"));
    }
}

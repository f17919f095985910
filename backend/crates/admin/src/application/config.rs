//! Application Configuration
//!
//! Configuration for the admin application layer.

use std::time::Duration;

use contest::CodeFormat;
use platform::cookie::CookieConfig;
use platform::password::HashedPassword;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 3600);

/// Admin application configuration
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Argon2id hash of the shared admin password
    pub password_hash: HashedPassword,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Format used to validate codes in download paths
    pub code_format: CodeFormat,
}

impl AdminConfig {
    /// Production defaults with a random session secret
    pub fn new(password_hash: HashedPassword) -> Self {
        Self {
            password_hash,
            password_pepper: None,
            session_cookie_name: "admin_session".to_string(),
            session_secret: platform::crypto::random_key(),
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            code_format: CodeFormat::default(),
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development(password_hash: HashedPassword) -> Self {
        Self {
            cookie_secure: false,
            ..Self::new(password_hash)
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig::session(
            self.session_cookie_name.clone(),
            self.cookie_secure,
            self.cookie_same_site,
            self.session_ttl,
        )
    }
}

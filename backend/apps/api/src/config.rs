//! Runtime configuration
//!
//! Everything is read from the environment (after `.env` is loaded).
//! Library crates only ever see their typed config structs.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use admin::AdminConfig;
use anyhow::{Context, Result, bail};
use axum::http::HeaderValue;
use contest::{CodeFormat, ContestConfig};
use platform::password::HashedPassword;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://concurso.db?mode=rwc".to_string()),
            max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
        })
    }
}

/// Configuration for `api serve`
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    pub database: DatabaseConfig,
    pub contest: ContestConfig,
    pub admin: AdminConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host: IpAddr = parse_or("HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port: u16 = parse_or("PORT", 5000)?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5000,http://127.0.0.1:5000".to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let contest = contest_config_from_env()?;
        let admin = admin_config_from_env(contest.code_format.clone())?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            frontend_origins,
            database: DatabaseConfig::from_env()?,
            contest,
            admin,
        })
    }
}

fn contest_config_from_env() -> Result<ContestConfig> {
    let defaults = ContestConfig::default();

    let allowed_extensions: Vec<String> = match env::var("ALLOWED_EXTENSIONS") {
        Ok(list) => list
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect(),
        Err(_) => defaults.allowed_extensions.clone(),
    };
    if allowed_extensions.is_empty() {
        bail!("ALLOWED_EXTENSIONS must name at least one extension");
    }

    let code_format = code_format_from(
        env::var("CODE_PREFIX").unwrap_or_else(|_| defaults.code_format.prefix().to_string()),
        parse_or("CODE_LENGTH", defaults.code_format.length())?,
    )?;

    Ok(ContestConfig {
        upload_dir: env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir),
        max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        allowed_extensions,
        code_format,
        code_max_attempts: parse_or("CODE_MAX_ATTEMPTS", defaults.code_max_attempts)?,
    })
}

fn code_format_from(prefix: String, length: usize) -> Result<CodeFormat> {
    CodeFormat::new(prefix, length).context("invalid CODE_PREFIX / CODE_LENGTH")
}

fn admin_config_from_env(code_format: CodeFormat) -> Result<AdminConfig> {
    let hash = env::var("ADMIN_PASSWORD_HASH").context(
        "ADMIN_PASSWORD_HASH must be set (generate one with `api hash-password`)",
    )?;
    let password_hash = HashedPassword::from_phc_string(hash)
        .context("ADMIN_PASSWORD_HASH is not an Argon2id PHC string")?;

    let mut config = if cfg!(debug_assertions) {
        AdminConfig::development(password_hash)
    } else {
        AdminConfig::new(password_hash)
    };

    match env::var("ADMIN_SESSION_SECRET") {
        Ok(secret_b64) => {
            let secret_bytes = platform::crypto::from_base64(secret_b64.trim())
                .context("ADMIN_SESSION_SECRET is not valid base64")?;
            config.session_secret = secret_bytes
                .try_into()
                .map_err(|_| anyhow::anyhow!("ADMIN_SESSION_SECRET must decode to 32 bytes"))?;
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("ADMIN_SESSION_SECRET not set, using a random secret");
        }
        Err(_) => bail!("ADMIN_SESSION_SECRET must be set in production"),
    }

    config.password_pepper = password_pepper_from_env();
    config.session_ttl = Duration::from_secs(parse_or(
        "ADMIN_SESSION_TTL_SECS",
        config.session_ttl.as_secs(),
    )?);
    config.cookie_secure = parse_or("COOKIE_SECURE", config.cookie_secure)?;
    config.code_format = code_format;

    Ok(config)
}

pub fn password_pepper_from_env() -> Option<Vec<u8>> {
    env::var("ADMIN_PASSWORD_PEPPER")
        .ok()
        .filter(|pepper| !pepper.is_empty())
        .map(String::into_bytes)
}

/// Parse `key` from the environment, falling back to `default` when unset
fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}

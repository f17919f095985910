//! API Server Entry Point
//!
//! Application entry point, server initialization and maintenance commands.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use std::io::BufRead;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use admin::{ExportRegistryUseCase, SqliteAdminRepository};
use anyhow::Context;
use axum::http::{Method, header};
use clap::{Parser, Subcommand};
use platform::password::ClearTextPassword;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, DatabaseConfig};

#[derive(Parser)]
#[command(name = "api")]
#[command(about = "Contest registration and submission service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Read a password from stdin and print its Argon2id hash for ADMIN_PASSWORD_HASH
    HashPassword,

    /// Write the registrant registry as CSV
    ExportRegistry {
        /// Destination file
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,contest=info,admin=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::HashPassword => hash_password(),
        Command::ExportRegistry { output } => export_registry(output).await,
    }
}

async fn connect(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .with_context(|| format!("failed to open database {}", config.url))?;

    tracing::info!("Connected to database");

    contest::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations completed");

    Ok(pool)
}

async fn serve() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let pool = connect(&config.database).await?;

    // Startup cleanup: remove expired admin sessions
    // Errors here should not prevent server startup
    let admin_store_for_cleanup = SqliteAdminRepository::new(pool.clone());
    if let Err(e) = admin_store_for_cleanup.cleanup_expired().await {
        tracing::warn!(
            error = %e,
            "Admin session cleanup failed, continuing anyway"
        );
    }

    tokio::fs::create_dir_all(&config.contest.upload_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create upload directory {}",
                config.contest.upload_dir.display()
            )
        })?;

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router
    let app = app::build_router(pool, config.contest, config.admin)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn hash_password() -> anyhow::Result<()> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let raw = line.trim_end_matches(['\r', '\n']).to_string();

    let password = ClearTextPassword::new_secret(raw)?;
    let pepper = config::password_pepper_from_env();
    let hash = password.hash(pepper.as_deref())?;

    println!("{}", hash.as_phc_string());
    Ok(())
}

async fn export_registry(output: PathBuf) -> anyhow::Result<()> {
    let pool = connect(&DatabaseConfig::from_env()?).await?;

    let repo = Arc::new(SqliteAdminRepository::new(pool));
    let csv = ExportRegistryUseCase::new(repo).execute().await?;

    tokio::fs::write(&output, &csv)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(path = %output.display(), bytes = csv.len(), "Registry written");
    Ok(())
}

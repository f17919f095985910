//! Application Layer - Use Cases

pub mod check_session;
pub mod config;
pub mod download;
pub mod export_registry;
pub mod query_registry;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;

pub use check_session::CheckSessionUseCase;
pub use download::{DownloadFileUseCase, DownloadedFile};
pub use export_registry::ExportRegistryUseCase;
pub use query_registry::QueryRegistryUseCase;
pub use sign_in::{SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;

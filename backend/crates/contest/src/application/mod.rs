//! Application Layer - Use Cases

pub mod config;
pub mod register;
pub mod submit;

pub use register::{RegisterInput, RegisterUseCase};
pub use submit::{SubmitInput, SubmitOutput, SubmitUseCase};

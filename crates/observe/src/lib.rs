//! Initialization logic for logging that is shared between the binaries of
//! the workspace, plus a panic hook that routes panics through `tracing`.
pub mod config;
pub mod panic_hook;
pub mod tracing;

pub use config::Config;

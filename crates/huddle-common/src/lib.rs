//! # huddle-common
//!
//! Shared utilities including configuration, error handling, credential hashing, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{generate_user_code, hash_password, verify_password, PasswordService};
pub use config::{AppConfig, AppSettings, ConfigError, Environment, StoreConfig, UiConfig};
pub use error::AppError;
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};

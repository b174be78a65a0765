//! Huddle walkthrough entry point
//!
//! Run with:
//! ```bash
//! cargo run -p huddle-demo
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use huddle_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::from_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        users = %config.store.user_collection,
        messages = %config.store.message_collection,
        "Configuration loaded"
    );

    if let Err(e) = huddle_demo::run(config).await {
        error!(error = %e, "Walkthrough failed");
        std::process::exit(1);
    }
}

//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub store: StoreConfig,
    pub ui: UiConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    /// Emit JSON logs
    #[serde(default)]
    pub log_json: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_env(),
            log_json: false,
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Document store collection names
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_user_collection")]
    pub user_collection: String,
    #[serde(default = "default_message_collection")]
    pub message_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            user_collection: default_user_collection(),
            message_collection: default_message_collection(),
        }
    }
}

/// Presentation timing
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Pause between a successful login and the redirect to the home view
    #[serde(default = "default_login_redirect_delay_ms")]
    pub login_redirect_delay_ms: u64,
}

impl UiConfig {
    #[must_use]
    pub fn login_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.login_redirect_delay_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            login_redirect_delay_ms: default_login_redirect_delay_ms(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "huddle".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_user_collection() -> String {
    "user".to_string()
}

fn default_message_collection() -> String {
    "messages".to_string()
}

fn default_login_redirect_delay_ms() -> u64 {
    1500
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparseable value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparseable value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            None => Environment::default(),
            Some(s) => match s.to_lowercase().as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
        };

        let login_redirect_delay_ms = match lookup("HUDDLE_LOGIN_REDIRECT_DELAY_MS") {
            None => default_login_redirect_delay_ms(),
            Some(s) => s
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HUDDLE_LOGIN_REDIRECT_DELAY_MS", s))?,
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
                log_json: lookup("LOG_FORMAT").is_some_and(|s| s.eq_ignore_ascii_case("json")),
            },
            store: StoreConfig {
                user_collection: lookup("HUDDLE_USER_COLLECTION")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(default_user_collection),
                message_collection: lookup("HUDDLE_MESSAGE_COLLECTION")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(default_message_collection),
            },
            ui: UiConfig {
                login_redirect_delay_ms,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

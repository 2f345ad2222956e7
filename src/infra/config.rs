//! Centralized configuration (command line flags with environment fallbacks).
//!
//! `.env` is loaded by the binary before parsing, so every flag can also be
//! supplied through the environment variable named next to it.

use clap::{ArgAction, Parser, ValueEnum};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Products / reviews / comments REST API server.
#[derive(Debug, Clone, Parser)]
#[command(name = "api_server", version)]
pub struct Config {
    /// HTTP listen port.
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Deployment environment.
    #[arg(long = "env", env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// PostgreSQL DSN. Required; there is no default.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub db_dsn: String,

    /// Upper bound of pooled connections.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub db_max_connections: u32,

    /// Per-statement timeout, in seconds.
    #[arg(long, env = "DB_QUERY_TIMEOUT_SECS", default_value_t = 3)]
    pub db_query_timeout_secs: u64,

    /// Allow cross-origin requests from any origin.
    #[arg(long, env = "CORS_ANY_ORIGIN", default_value_t = true, action = ArgAction::Set)]
    pub cors_any_origin: bool,
}

impl Config {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.db_query_timeout_secs.max(1))
    }
}

//! Environment-driven configuration
//!
//! Every required value comes from the process environment (optionally seeded
//! from a `.env` file in the working directory). Startup aborts with a clap
//! error naming the missing variable when a required value is absent.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use sqlx::postgres::PgConnectOptions;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Runtime configuration for songlib-api
#[derive(Parser, Clone)]
#[command(name = "songlib-api")]
#[command(about = "Song library REST service with lyrics enrichment")]
#[command(version)]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: u16,

    /// PostgreSQL host
    #[arg(long, env = "DB_HOST")]
    pub db_host: String,

    /// PostgreSQL port
    #[arg(long, env = "DB_PORT")]
    pub db_port: u16,

    /// PostgreSQL user
    #[arg(long, env = "DB_USER")]
    pub db_user: String,

    /// PostgreSQL password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: String,

    /// PostgreSQL database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: String,

    /// Base URL of the external song details API
    #[arg(long, env = "EXTERNAL_API_URL")]
    pub external_api_url: Url,

    /// Log verbosity (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: String,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,

    /// Timeout for calls to the external song details API, in seconds
    #[arg(long, env = "EXTERNAL_API_TIMEOUT_SECS", default_value_t = 30)]
    pub external_api_timeout_secs: u64,

    /// JSON log file written next to console output; empty disables it
    #[arg(long, env = "LOG_FILE", default_value = "log/app.log")]
    pub log_file: String,

    /// `.env` file the values were seeded from, if any
    #[arg(skip)]
    pub env_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `.env` (if present) and the environment.
    ///
    /// Exits the process with a usage error if a required value is missing.
    pub fn load() -> Self {
        let env_file = load_dotenv();
        let mut config = Self::parse();
        config.env_file = env_file;
        config
    }

    /// Fallible variant of [`Config::load`] that parses the given argument list
    /// on top of the environment. Used by tests and tooling.
    pub fn try_load_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| Error::Config(e.to_string()))
    }

    /// Connection options for the song database
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }

    /// Outbound request timeout for the lookup API
    pub fn external_api_timeout(&self) -> Duration {
        Duration::from_secs(self.external_api_timeout_secs)
    }

    /// Address the HTTP server binds to
    pub fn listen_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Level parsed from `LOG_LEVEL`
    pub fn level(&self) -> Level {
        parse_log_level(&self.log_level)
    }

    /// Directory and file name of the JSON log file, `None` when disabled
    pub fn log_file_location(&self) -> Option<(&Path, &OsStr)> {
        let path = Path::new(&self.log_file);
        let file_name = path.file_name()?;
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Some((dir, file_name))
    }

    /// Tracing filter: `RUST_LOG` wins when set, otherwise `LOG_LEVEL` drives
    /// both the service and request logging.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_directives(self.level())))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("external_api_url", &self.external_api_url.as_str())
            .field("log_level", &self.log_level)
            .field("db_max_connections", &self.db_max_connections)
            .field("external_api_timeout_secs", &self.external_api_timeout_secs)
            .field("log_file", &self.log_file)
            .field("env_file", &self.env_file)
            .finish()
    }
}

/// Load `.env` from the working directory and return its path. A missing file
/// is not an error; variables already set in the environment are never
/// overridden.
///
/// Runs before logging is set up, so the caller logs the returned path.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            eprintln!("Ignoring unreadable .env file: {}", e);
            None
        }
    }
}

/// Map a `LOG_LEVEL` value to a tracing level; unknown values fall back to INFO
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter directives for the given level
pub fn log_directives(level: Level) -> String {
    let level = level.to_string().to_ascii_lowercase();
    format!("{level},tower_http={level},sqlx=warn")
}

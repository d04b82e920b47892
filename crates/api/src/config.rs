use std::path::PathBuf;
use std::time::Duration;

use mastergym_core::backup::{BackupSettings, DEFAULT_BACKUP_TIMEOUT};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal
    /// (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Backup trigger configuration.
    pub backup: BackupConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`BackupConfig::from_env`] for the
    /// remaining variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            backup: BackupConfig::from_env(),
        }
    }
}

/// Settings for `POST /api/backup`.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// Shared secret expected in `X-BACKUP-TOKEN`. Unset or blank disables
    /// the endpoint.
    pub token: Option<String>,
    pub script_path: PathBuf,
    /// Program the script is run with.
    pub interpreter: String,
    pub timeout_secs: u64,
}

impl BackupConfig {
    /// Load backup configuration from environment variables.
    ///
    /// | Env Var               | Default             |
    /// |-----------------------|---------------------|
    /// | `BACKUP_TOKEN`        | unset (disabled)    |
    /// | `BACKUP_SCRIPT_PATH`  | `scripts/backup.sh` |
    /// | `BACKUP_INTERPRETER`  | `bash`              |
    /// | `BACKUP_TIMEOUT_SECS` | `600`               |
    pub fn from_env() -> Self {
        let token = std::env::var("BACKUP_TOKEN").ok();

        let script_path = std::env::var("BACKUP_SCRIPT_PATH")
            .unwrap_or_else(|_| "scripts/backup.sh".into())
            .into();

        let interpreter = std::env::var("BACKUP_INTERPRETER").unwrap_or_else(|_| "bash".into());

        let timeout_secs: u64 = std::env::var("BACKUP_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_BACKUP_TIMEOUT.as_secs().to_string())
            .parse()
            .expect("BACKUP_TIMEOUT_SECS must be a valid u64");

        Self {
            token,
            script_path,
            interpreter,
            timeout_secs,
        }
    }

    pub fn settings(&self) -> BackupSettings {
        BackupSettings {
            token: self.token.clone(),
            script_path: self.script_path.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

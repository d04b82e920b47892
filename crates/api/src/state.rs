use std::sync::Arc;

use mastergym_core::backup::{BackupGate, ShellRunner};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; nothing in it is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mastergym_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Token-gated backup trigger.
    pub backup: Arc<BackupGate>,
}

impl AppState {
    /// Build state with the production shell runner for backups.
    pub fn new(pool: mastergym_db::DbPool, config: ServerConfig) -> Self {
        let runner = Arc::new(ShellRunner::new(config.backup.interpreter.clone()));
        let backup = Arc::new(BackupGate::new(config.backup.settings(), runner));
        Self {
            pool,
            config: Arc::new(config),
            backup,
        }
    }
}

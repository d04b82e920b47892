//! Token-gated trigger for the database backup script.
//!
//! The gate never returns an error: every refusal or failure is reported in
//! the [`BackupOutcome`] body, and every decision is emitted as an audit
//! event on the `audit` tracing target.

pub mod runner;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sha2::{Digest, Sha256};

pub use runner::{CommandOutput, CommandRunner, RunnerError, ShellRunner};

/// Number of trailing characters of script output kept in the response.
pub const OUTPUT_TAIL_CHARS: usize = 2000;

/// Default upper bound on a backup run.
pub const DEFAULT_BACKUP_TIMEOUT: Duration = Duration::from_secs(600);

pub const MSG_TOKEN_NOT_CONFIGURED: &str = "Backup token not configured.";
pub const MSG_INVALID_TOKEN: &str = "Invalid backup token.";
pub const MSG_SCRIPT_NOT_FOUND: &str = "Backup script not found.";
pub const MSG_FAILED: &str = "Backup failed.";
pub const MSG_RUN_ERROR: &str = "Backup could not be completed.";

/// Static backup configuration.
#[derive(Debug, Clone)]
pub struct BackupSettings {
    /// Shared secret callers must present. Blank disables backups entirely.
    pub token: Option<String>,
    /// Script to run; relative paths resolve against the working directory.
    pub script_path: PathBuf,
    pub timeout: Duration,
}

/// Result of a backup request, returned to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupOutcome {
    pub success: bool,
    pub exit_code: i32,
    pub output: String,
}

impl BackupOutcome {
    fn refused(message: &str) -> Self {
        Self {
            success: false,
            exit_code: -1,
            output: message.to_string(),
        }
    }
}

/// Validates the caller's token and runs the backup script.
#[derive(Clone)]
pub struct BackupGate {
    settings: BackupSettings,
    runner: Arc<dyn CommandRunner>,
}

impl BackupGate {
    pub fn new(settings: BackupSettings, runner: Arc<dyn CommandRunner>) -> Self {
        Self { settings, runner }
    }

    pub fn settings(&self) -> &BackupSettings {
        &self.settings
    }

    /// Run the backup, resolving a relative script path against the
    /// process working directory.
    pub async fn trigger(&self, provided_token: Option<&str>) -> BackupOutcome {
        let base_dir = std::env::current_dir().unwrap_or_default();
        self.trigger_from(provided_token, &base_dir).await
    }

    /// Run the backup, resolving a relative script path against `base_dir`.
    pub async fn trigger_from(
        &self,
        provided_token: Option<&str>,
        base_dir: &Path,
    ) -> BackupOutcome {
        let configured = self
            .settings
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let Some(configured) = configured else {
            tracing::warn!(
                target: "audit",
                action = "backup",
                success = false,
                reason = "token_not_configured",
                "Backup refused"
            );
            return BackupOutcome::refused(MSG_TOKEN_NOT_CONFIGURED);
        };

        if !provided_token.is_some_and(|t| tokens_match(t, configured)) {
            tracing::warn!(
                target: "audit",
                action = "backup",
                success = false,
                reason = "invalid_token",
                "Backup refused"
            );
            return BackupOutcome::refused(MSG_INVALID_TOKEN);
        }

        let script = base_dir.join(&self.settings.script_path);
        if !script.is_file() {
            tracing::warn!(
                target: "audit",
                action = "backup",
                success = false,
                reason = "script_not_found",
                script = %script.display(),
                "Backup refused"
            );
            return BackupOutcome::refused(MSG_SCRIPT_NOT_FOUND);
        }

        match self.runner.run(&script, self.settings.timeout).await {
            Ok(finished) => {
                let output = tail_chars(&finished.output, OUTPUT_TAIL_CHARS)
                    .trim()
                    .to_string();
                let success = finished.exit_code == 0;
                tracing::info!(
                    target: "audit",
                    action = "backup",
                    success,
                    exit_code = finished.exit_code,
                    "Backup finished"
                );
                let output = if !success && output.is_empty() {
                    MSG_FAILED.to_string()
                } else {
                    output
                };
                BackupOutcome {
                    success,
                    exit_code: finished.exit_code,
                    output,
                }
            }
            Err(e) => {
                tracing::error!(
                    target: "audit",
                    action = "backup",
                    success = false,
                    reason = "run_error",
                    error = %e,
                    "Backup could not run"
                );
                BackupOutcome::refused(MSG_RUN_ERROR)
            }
        }
    }
}

/// Compare tokens by digest so the comparison time does not depend on how
/// many leading bytes agree.
fn tokens_match(provided: &str, configured: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(configured.as_bytes())
}

/// The last `n` characters of `s`.
fn tail_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    match s.char_indices().nth(count - n) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

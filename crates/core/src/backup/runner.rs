//! Subprocess execution for the backup script.
//!
//! [`CommandRunner`] is the seam between the backup gate and the operating
//! system. [`ShellRunner`] is the production implementation; tests substitute
//! their own.

use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Upper bound on merged output kept in memory (64 KiB).
///
/// Only the tail is retained once the limit is reached; callers only ever
/// report the end of the output.
const MAX_CAPTURE_BYTES: usize = 64 * 1024;

/// Exit status and merged stdout/stderr of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Process exit code (`-1` if killed by a signal).
    pub exit_code: i32,
    /// stdout and stderr lines in arrival order.
    pub output: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while running script: {0}")]
    Io(#[from] io::Error),

    #[error("script timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Runs a script and reports how it finished.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, script: &Path, timeout: Duration) -> Result<CommandOutput, RunnerError>;
}

/// Runs scripts through an interpreter, `bash` unless configured otherwise.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    interpreter: String,
}

impl ShellRunner {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, script: &Path, timeout: Duration) -> Result<CommandOutput, RunnerError> {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn {
            program: self.interpreter.clone(),
            source,
        })?;

        // Both pipes feed one channel so lines keep their arrival order.
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let stdout_task = child.stdout.take().map(|out| spawn_reader(out, tx.clone()));
        let stderr_task = child.stderr.take().map(|err| spawn_reader(err, tx.clone()));
        drop(tx);

        let finished = tokio::time::timeout(timeout, async {
            let mut output = String::new();
            while let Some(line) = rx.recv().await {
                push_capped(&mut output, &line);
            }
            // Pipes are closed; now collect the exit status.
            let status = child.wait().await?;
            Ok::<_, io::Error>(CommandOutput {
                exit_code: status.code().unwrap_or(-1),
                output,
            })
        })
        .await;

        match finished {
            Ok(result) => Ok(result?),
            Err(_elapsed) => {
                for task in [stdout_task, stderr_task].into_iter().flatten() {
                    task.abort();
                }
                let _ = child.start_kill();
                Err(RunnerError::Timeout(timeout))
            }
        }
    }
}

fn spawn_reader<R>(stream: R, tx: mpsc::UnboundedSender<String>) -> tokio::task::JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let mut line = String::from_utf8_lossy(&buf).into_owned();
                    if !line.ends_with('\n') {
                        line.push('\n');
                    }
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Append `chunk`, dropping the oldest bytes beyond [`MAX_CAPTURE_BYTES`].
fn push_capped(buf: &mut String, chunk: &str) {
    buf.push_str(chunk);
    if buf.len() > MAX_CAPTURE_BYTES {
        let mut cut = buf.len() - MAX_CAPTURE_BYTES;
        while !buf.is_char_boundary(cut) {
            cut += 1;
        }
        buf.drain(..cut);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Subprocess execution with captured output and an optional wall-clock limit.

use crate::types::CommandOutput;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("empty command")]
    EmptyCommand,
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program}' timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    #[error("failed while waiting for '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Runs `argv` to completion, optionally in `cwd`, capturing both streams.
///
/// With a `timeout`, a child still running when it elapses is killed and
/// reaped before `ProcessError::TimedOut` is returned. Children are also
/// killed if the returned future is dropped early.
pub async fn run_command(
    argv: &[String],
    cwd: Option<&Path>,
    timeout: Option<Duration>,
) -> Result<CommandOutput, ProcessError> {
    let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!("Executing: {:?} (cwd: {:?})", argv, cwd);

    let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
        program: program.clone(),
        source,
    })?;
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Pipes are drained while waiting so a chatty child never blocks on a full pipe
    let collect = async {
        let (status, stdout, stderr) = tokio::try_join!(child.wait(), drain(stdout), drain(stderr))?;
        Ok::<_, io::Error>(CommandOutput {
            code: status.code().unwrap_or(-1),
            stdout,
            stderr,
        })
    };

    let to_io_error = |source| ProcessError::Io {
        program: program.clone(),
        source,
    };

    let Some(limit) = timeout else {
        return collect.await.map_err(to_io_error);
    };

    let waited = tokio::time::timeout(limit, collect).await;
    match waited {
        Ok(result) => result.map_err(to_io_error),
        Err(_) => {
            tracing::debug!("{} exceeded {:?}, killing it", program, limit);
            if let Err(e) = child.kill().await {
                tracing::warn!("Failed to kill {}: {}", program, e);
            }
            Err(ProcessError::TimedOut {
                program: program.clone(),
                timeout: limit,
            })
        }
    }
}

//! Shell runner backed by `tokio::process`

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

use super::{CommandOutput, CommandRunner, RunError};

/// Runs commands through `<shell> -c`
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    max_output_bytes: usize,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>, max_output_bytes: usize) -> Self {
        Self {
            shell: shell.into(),
            max_output_bytes,
        }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, RunError> {
        debug!(shell = %self.shell, command = %command, "Spawning command");

        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: self.shell.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let limit = self.max_output_bytes;

        let collected = tokio::try_join!(read_capped(stdout, limit), read_capped(stderr, limit));
        let (stdout, stderr) = match collected {
            Ok(streams) => streams,
            Err(err) => {
                warn!(command = %command, error = %err, "Killing command");
                let _ = child.kill().await;
                return Err(err);
            }
        };

        let status = child.wait().await?;
        let output = CommandOutput {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        };

        if !status.success() {
            return Err(RunError::Exit {
                code: status.code(),
                stderr: output.stderr,
            });
        }

        debug!(command = %command, stdout_bytes = stdout.len(), "Command finished");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "shell"
    }
}

/// Read a child stream to the end, failing once it passes `limit` bytes
async fn read_capped<R>(stream: Option<R>, limit: usize) -> Result<Vec<u8>, RunError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let Some(stream) = stream else {
        return Ok(buf);
    };

    stream
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .await?;

    if buf.len() > limit {
        return Err(RunError::OutputLimitExceeded(limit));
    }

    Ok(buf)
}

//! Runner trait abstraction for executing translated commands

use async_trait::async_trait;

use super::RunError;

/// Output captured from a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Executes a shell command string and waits for it to finish
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command`, returning its output on a zero exit status
    async fn run(&self, command: &str) -> Result<CommandOutput, RunError>;

    /// Human-readable name for this runner
    fn name(&self) -> &'static str;
}

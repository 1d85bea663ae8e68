//! Command executor - validates, translates and runs tool calls

use std::sync::Arc;
use std::time::Instant;

use maps_shared::{translate, Operation, ToolCallParams, ToolCallResult};
use tracing::{debug, info, warn};

use crate::runner::CommandRunner;

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command completed (or needed no execution)
    Completed { message: String },
    /// Command was translated but running it failed
    Failed { message: String },
    /// Call rejected before anything ran (unknown tool, bad arguments)
    Rejected { message: String },
}

impl From<CommandResult> for ToolCallResult {
    fn from(result: CommandResult) -> Self {
        match result {
            CommandResult::Completed { message } => ToolCallResult::text(message),
            CommandResult::Failed { message } | CommandResult::Rejected { message } => {
                ToolCallResult::error(message)
            }
        }
    }
}

/// Executes tool calls received from the client
pub struct CommandExecutor {
    runner: Arc<dyn CommandRunner>,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Execute a tool call and return the response payload
    pub async fn execute(&self, params: ToolCallParams) -> ToolCallResult {
        let start = Instant::now();
        let tool = params.name.clone();

        info!(tool = %tool, "Executing tool call");

        let result = match Operation::from_call(&params.name, params.arguments) {
            Ok(op) => self.run_operation(&op).await,
            Err(err) => CommandResult::Rejected {
                message: err.to_string(),
            },
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            CommandResult::Completed { message } => {
                info!(tool = %tool, elapsed_ms, "Tool call completed: {}", message);
            }
            CommandResult::Failed { message } => {
                warn!(tool = %tool, elapsed_ms, "Tool call failed: {}", message);
            }
            CommandResult::Rejected { message } => {
                warn!(tool = %tool, "Tool call rejected: {}", message);
            }
        }

        result.into()
    }

    /// Translate an operation and run its command, if any
    pub async fn run_operation(&self, op: &Operation) -> CommandResult {
        let translation = translate(op);

        let Some(command) = translation.command else {
            return CommandResult::Completed {
                message: translation.message,
            };
        };

        match self.runner.run(&command).await {
            Ok(output) => {
                if !output.stdout.trim().is_empty() {
                    debug!(stdout = %output.stdout.trim(), "Command output");
                }
                CommandResult::Completed {
                    message: translation.message,
                }
            }
            Err(err) => CommandResult::Failed {
                message: format!("Error: {}", err.diagnostic()),
            },
        }
    }
}

//! External command execution
//!
//! This module handles:
//! - Spawning translated commands through the host shell
//! - Capping captured output
//! - Turning failures into a diagnostic string for the client

mod shell;
mod traits;

#[cfg(test)]
pub(crate) mod recording;

pub use shell::ShellRunner;
pub use traits::{CommandOutput, CommandRunner};

use thiserror::Error;

/// Errors from running an external command
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command exited with status {}", exit_code_label(.code))]
    Exit { code: Option<i32>, stderr: String },

    #[error("command output exceeded {0} bytes")]
    OutputLimitExceeded(usize),

    #[error("failed to collect command output: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Most specific description available: captured stderr first, then the error itself
    pub fn diagnostic(&self) -> String {
        match self {
            RunError::Exit { stderr, .. } if !stderr.trim().is_empty() => stderr.trim().to_string(),
            other => other.to_string(),
        }
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown (terminated by signal)".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_without_code() {
        let err = RunError::Exit {
            code: None,
            stderr: "  \n".into(),
        };
        assert_eq!(
            err.diagnostic(),
            "command exited with status unknown (terminated by signal)"
        );
    }

    #[test]
    fn test_stderr_is_trimmed() {
        let err = RunError::Exit {
            code: Some(1),
            stderr: "execution error: Can't get application \"Maps\"\n".into(),
        };
        assert_eq!(
            err.diagnostic(),
            "execution error: Can't get application \"Maps\""
        );
    }
}

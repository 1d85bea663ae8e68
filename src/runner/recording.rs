//! Test runner that records commands instead of spawning them

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CommandOutput, CommandRunner, RunError};

/// Records every command and replays a canned outcome
#[derive(Default)]
pub(crate) struct RecordingRunner {
    commands: Mutex<Vec<String>>,
    fail_with_stderr: Option<String>,
}

impl RecordingRunner {
    /// Runner whose commands all exit 1 with `stderr`
    pub fn failing(stderr: &str) -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            fail_with_stderr: Some(stderr.into()),
        }
    }

    pub fn recorded(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, RunError> {
        self.commands.lock().unwrap().push(command.to_string());
        match &self.fail_with_stderr {
            Some(stderr) => Err(RunError::Exit {
                code: Some(1),
                stderr: stderr.clone(),
            }),
            None => Ok(CommandOutput::default()),
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

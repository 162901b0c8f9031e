//! Process execution
//!
//! Level 3 - Step-level implementation

use std::process::Stdio;

use crate::command::GameCommand;
use crate::error::InvokeError;

/// Captured result of a finished process
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
    /// Everything written to stdout
    pub stdout: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human-readable exit status
    pub fn status(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Something that can run a `GameCommand` to completion
pub trait ProcessRunner {
    fn run(&self, command: &GameCommand) -> Result<RunOutput, InvokeError>;
}

/// Runs commands as real child processes
///
/// stdin is closed, stdout is captured and stderr is inherited so engine
/// diagnostics reach the caller's error stream directly. `output()` drains
/// stdout and waits for exit before returning.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &GameCommand) -> Result<RunOutput, InvokeError> {
        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| InvokeError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        Ok(RunOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Run a command and return its stdout, failing on a non-zero exit
pub fn invoke<R: ProcessRunner + ?Sized>(
    command: &GameCommand,
    runner: &R,
) -> Result<String, InvokeError> {
    tracing::info!("Launching engine: {}", command.render());

    let output = runner.run(command)?;
    tracing::debug!("Engine finished with {}", output.status());

    if !output.success() {
        return Err(InvokeError::Failed {
            command: command.render(),
            status: output.status(),
        });
    }

    Ok(output.stdout)
}

//! Trial orchestration
//!
//! Level 1 - Orchestration
//!
//! One trial = materialize the player config, build the engine command,
//! run it, hand back whatever the engine printed.

use crate::args::TrialArgs;
use crate::baseline::materialize;
use crate::command::GameCommand;
use crate::error::TrialError;
use crate::outcome::Outcome;
use crate::runner::{invoke, ProcessRunner};
use crate::settings::Settings;

/// A trial whose engine run exited successfully
#[derive(Clone, Debug)]
pub struct CompletedTrial {
    pub command: GameCommand,
    /// Engine stdout, unmodified
    pub output: String,
}

impl CompletedTrial {
    /// Outcome code, if the engine printed exactly one
    pub fn outcome(&self) -> Option<Outcome> {
        Outcome::from_output(&self.output)
    }
}

/// Build the engine command for a validated trial
pub fn prepare_command(args: &TrialArgs, settings: &Settings) -> Result<GameCommand, TrialError> {
    let player_config = materialize(settings, &args.overrides)?;
    Ok(GameCommand::build(settings, &player_config))
}

/// Run a validated trial to completion
///
/// This function reads like a table of contents:
/// 1. Materialize the player config
/// 2. Build the engine command
/// 3. Run the engine and collect its output
pub fn run_trial<R: ProcessRunner + ?Sized>(
    args: &TrialArgs,
    settings: &Settings,
    runner: &R,
) -> Result<CompletedTrial, TrialError> {
    let command = prepare_command(args, settings)?;
    let output = invoke(&command, runner)?;

    let trial = CompletedTrial { command, output };
    match trial.outcome() {
        Some(outcome) => tracing::info!("Trial finished: {}", outcome),
        None => tracing::warn!(
            "Engine output is not a single W/L/D code: {:?}",
            trial.output
        ),
    }

    Ok(trial)
}

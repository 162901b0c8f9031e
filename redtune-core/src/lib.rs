//! redtune Core - Trial adapter between CLOP and the ShallowRed engine
//!
//! This crate turns one optimizer trial into one engine game:
//! - Argument validation (processor id, seed, name/value pairs)
//! - Baseline config loading and slash-path overrides
//! - Scalar coercion of override values (int, float, string)
//! - Structured command construction for the engine CLI
//! - Process execution behind a runner trait
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_trial (orchestration)
//! - Level 2: parse_trial_args, materialize, invoke (phases)
//! - Level 3: apply override, build command, run process (steps)
//! - Level 4: coercion, quoting, settings

pub mod args;
pub mod baseline;
pub mod command;
pub mod error;
pub mod outcome;
pub mod runner;
pub mod settings;
pub mod trial;
pub mod value;

// Re-exports for convenient access
pub use args::{parse_trial_args, ArgsOutcome, TrialArgs, HELP_FLAG};
pub use baseline::{materialize, shell_token, BaselineConfig, ParamOverride};
pub use command::GameCommand;
pub use error::{ArgError, ConfigError, InvokeError, TrialError};
pub use outcome::Outcome;
pub use runner::{invoke, ProcessRunner, RunOutput, SystemRunner};
pub use settings::{Agent, PlayMode, Settings};
pub use trial::{prepare_command, run_trial, CompletedTrial};
pub use value::coerce_value;

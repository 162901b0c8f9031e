//! Trial argument validation
//!
//! Level 2 - Phase implementation
//!
//! CLOP calls the adapter as
//! `<processor-id> <seed> <name-1> <value-1> [<name-2> <value-2> ...]`.

use crate::baseline::ParamOverride;
use crate::error::ArgError;

/// First token that requests the usage text
pub const HELP_FLAG: &str = "--help";

/// Validated arguments of one trial
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialArgs {
    /// Symbolic machine name; accepted but unused
    pub processor_id: String,
    /// Seed chosen by the optimizer; accepted but not forwarded
    pub seed: i64,
    /// Overrides in command-line order, never empty
    pub overrides: Vec<ParamOverride>,
}

/// What the command line asks for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgsOutcome {
    /// Print usage and stop
    Help,
    /// Run one trial
    Trial(TrialArgs),
}

/// Validate raw arguments (without the program name)
///
/// Checks run in this order: help request, arity (a seed plus at least one
/// name/value pair after the processor id), then the seed itself.
pub fn parse_trial_args(argv: &[String]) -> Result<ArgsOutcome, ArgError> {
    let Some((processor_id, rest)) = argv.split_first() else {
        return Ok(ArgsOutcome::Help);
    };

    if processor_id == HELP_FLAG {
        return Ok(ArgsOutcome::Help);
    }

    if rest.len() < 3 || rest.len() % 2 == 0 {
        return Err(ArgError::TooFewArguments { count: rest.len() });
    }

    let (seed, pairs) = rest.split_first().ok_or(ArgError::TooFewArguments { count: 0 })?;
    let seed = parse_seed(seed)?;

    let overrides = pairs
        .chunks_exact(2)
        .map(|pair| ParamOverride::new(pair[0].as_str(), pair[1].as_str()))
        .collect();

    tracing::debug!("Trial on processor {} with seed {}", processor_id, seed);

    Ok(ArgsOutcome::Trial(TrialArgs {
        processor_id: processor_id.clone(),
        seed,
        overrides,
    }))
}

fn parse_seed(text: &str) -> Result<i64, ArgError> {
    text.trim()
        .parse()
        .map_err(|_| ArgError::InvalidSeed(text.to_string()))
}

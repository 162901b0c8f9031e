//! Trial command - run one optimizer trial against the engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: resolve_settings(), run_trial() / prepare_command() (core), print_output()
//! - Level 3: (delegated to redtune-core)
//! - Level 4: settings overlay

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use redtune_core::{
    parse_trial_args, prepare_command, run_trial, Agent, ArgsOutcome, Settings, SystemRunner,
};

/// Printed for `--help` or an empty command line
pub const USAGE: &str = "\
redtune - CLOP trial script for the ShallowRed engine

Plays one game with the given parameter values and prints the outcome, for
use as the game script of a parallel CLOP optimization.

Arguments are:
 #1: processor id (symbolic name, typically a machine name to ssh to)
 #2: seed (integer)
 #3: parameter id of first parameter (path into the config, e.g. search/depth)
 #4: value of first parameter (float, integer or text)
 #5: parameter id of second parameter (optional)
 #6: value of second parameter (optional)
 ...

The game outcome is written to standard output:
 W = win
 L = loss
 D = draw

For instance:
 $ redtune node-01 4 param 0.2
 W

Options (must come before the processor id; each also reads the named
environment variable):
 --settings <FILE>         JSON settings file        REDTUNE_SETTINGS
 --java <PROGRAM>          interpreter               REDTUNE_JAVA
 --memory <OPTION>         JVM memory option         REDTUNE_MEMORY
 --jar <FILE>              engine jar                REDTUNE_JAR
 --baseline <FILE>         baseline config           REDTUNE_BASELINE
 --enemy-config <FILE>     opponent config           REDTUNE_ENEMY_CONFIG
 --computing-time <SECS>   thinking time per move    REDTUNE_COMPUTING_TIME
 --log-dir <DIR>           engine log directory      REDTUNE_LOG_DIR
 --opponent <AGENT>        shallowred|mcts|alphabeta REDTUNE_OPPONENT
 --dry-run                 print the engine command instead of running it
";

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Debug)]
pub struct TrialCmdArgs {
    /// JSON settings file; options below override it
    #[arg(long, env = "REDTUNE_SETTINGS", value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Interpreter used to run the engine
    #[arg(long, env = "REDTUNE_JAVA", value_name = "PROGRAM")]
    pub java: Option<String>,

    /// JVM memory option
    #[arg(long, env = "REDTUNE_MEMORY", value_name = "OPTION", allow_hyphen_values = true)]
    pub memory: Option<String>,

    /// Engine jar
    #[arg(long, env = "REDTUNE_JAR", value_name = "FILE")]
    pub jar: Option<PathBuf>,

    /// Baseline config the parameters are written into
    #[arg(long, env = "REDTUNE_BASELINE", value_name = "FILE")]
    pub baseline: Option<PathBuf>,

    /// Opponent config file
    #[arg(long, env = "REDTUNE_ENEMY_CONFIG", value_name = "FILE")]
    pub enemy_config: Option<PathBuf>,

    /// Seconds each agent may think per move
    #[arg(long, env = "REDTUNE_COMPUTING_TIME", value_name = "SECS")]
    pub computing_time: Option<u32>,

    /// Directory the engine writes game logs into
    #[arg(long, env = "REDTUNE_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Opponent agent
    #[arg(long, env = "REDTUNE_OPPONENT", value_name = "AGENT")]
    pub opponent: Option<Agent>,

    /// Print the engine command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// <processor-id> <seed> <name> <value> [<name> <value> ...]
    #[arg(
        value_name = "ARGS",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub argv: Vec<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run trial command
///
/// This function reads like a table of contents:
/// 1. Validate trial arguments (help stops here, before any file I/O)
/// 2. Resolve settings
/// 3. Run the trial (or only build its command for a dry run)
/// 4. Relay the engine output
pub fn run(args: TrialCmdArgs) -> Result<()> {
    let trial_args = match parse_trial_args(&args.argv)? {
        ArgsOutcome::Help => return print_output(USAGE),
        ArgsOutcome::Trial(trial_args) => trial_args,
    };

    let settings = resolve_settings(&args)?;

    if args.dry_run {
        let command = prepare_command(&trial_args, &settings)?;
        return print_output(&format!("{}\n", command.render()));
    }

    let trial = run_trial(&trial_args, &settings, &SystemRunner)?;
    print_output(&trial.output)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Defaults, then the settings file, then individual options
fn resolve_settings(args: &TrialCmdArgs) -> Result<Settings> {
    let base = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => Settings::default(),
    };

    Ok(overlay_settings(base, args))
}

/// Write text to stdout exactly as given
fn print_output(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn overlay_settings(mut settings: Settings, args: &TrialCmdArgs) -> Settings {
    if let Some(java) = &args.java {
        settings = settings.with_java(java.as_str());
    }
    if let Some(memory) = &args.memory {
        settings = settings.with_memory(memory.as_str());
    }
    if let Some(jar) = &args.jar {
        settings = settings.with_jar(jar);
    }
    if let Some(baseline) = &args.baseline {
        settings = settings.with_baseline_config(baseline);
    }
    if let Some(enemy_config) = &args.enemy_config {
        settings = settings.with_enemy_config(enemy_config);
    }
    if let Some(seconds) = args.computing_time {
        settings = settings.with_computing_time(seconds);
    }
    if let Some(log_dir) = &args.log_dir {
        settings = settings.with_log_dir(log_dir);
    }
    if let Some(opponent) = args.opponent {
        settings = settings.with_opponent(opponent);
    }
    settings
}

// ============================================================================
// TESTS
// ============================================================================

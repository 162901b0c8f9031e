//! redtune CLI - CLOP parameter-tuning adapter for the ShallowRed engine
//!
//! One invocation is one optimizer trial:
//! - validate `<processor-id> <seed> <name> <value> ...`
//! - write the values into the baseline engine config
//! - play one game through the engine CLI
//! - print the engine's W/L/D verdict on stdout
//!
//! stdout carries nothing but the verdict (or the usage text), so logging
//! goes to stderr.

mod trial_cmd;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trial_cmd::TrialCmdArgs;

/// Exit code for every validation or execution failure
const FAILURE_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(name = "redtune")]
#[command(about = "CLOP adapter: play one ShallowRed game with the given parameters")]
#[command(version)]
#[command(disable_help_flag = true)]
struct Cli {
    #[command(flatten)]
    trial: TrialCmdArgs,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    match trial_cmd::run(cli.trial) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("redtune: {:#}", err);
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

/// Log to stderr, `warn` unless RUST_LOG says otherwise
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

//! Integration tests for the redtune binary
//!
//! Drives the real executable: argument validation, exit codes, and (on
//! unix) full trials against a stub engine script.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Variables the binary reads; cleared so the caller's shell cannot leak in
const ENV_VARS: &[&str] = &[
    "RUST_LOG",
    "REDTUNE_SETTINGS",
    "REDTUNE_JAVA",
    "REDTUNE_MEMORY",
    "REDTUNE_JAR",
    "REDTUNE_BASELINE",
    "REDTUNE_ENEMY_CONFIG",
    "REDTUNE_COMPUTING_TIME",
    "REDTUNE_LOG_DIR",
    "REDTUNE_OPPONENT",
];

fn redtune() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_redtune"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn run(args: &[&str]) -> Output {
    redtune().args(args).output().expect("run redtune")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Workspace with a baseline config and a stub engine
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// `engine_body` is the shell script standing in for the engine. It
    /// runs as `sh <script> -jar <jar> play ...`, so `$@` holds the engine
    /// arguments.
    fn new(engine_body: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("config.json"),
            r#"{ "search": { "depth": 3, "exploration": 1.41 }, "name": "baseline" }"#,
        )
        .expect("write baseline");
        std::fs::write(dir.path().join("engine.sh"), engine_body).expect("write engine");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Trial command wired to the stub engine
    fn command(&self) -> Command {
        let mut cmd = redtune();
        // The stub is run through sh so it never needs the executable bit.
        cmd.arg("--java")
            .arg("sh")
            .arg("--memory")
            .arg(self.path("engine.sh"))
            .arg("--baseline")
            .arg(self.path("config.json"))
            .arg("--log-dir")
            .arg(self.path("logs"));
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("run redtune")
    }
}

fn read_args(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("read recorded args")
        .lines()
        .map(String::from)
        .collect()
}

// ============================================================================
// USAGE TESTS
// ============================================================================

#[test]
fn test_no_arguments_prints_usage() {
    let output = run(&[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("W = win"));
    assert!(stdout(&output).contains("processor id"));
}

#[test]
fn test_help_prints_usage() {
    let output = run(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("redtune node-01 4 param 0.2"));
}

#[test]
fn test_help_does_no_file_io() {
    let output = run(&["--settings", "/nonexistent/settings.json", "--help"]);
    assert_eq!(output.status.code(), Some(0));
}

// ============================================================================
// VALIDATION TESTS
// ============================================================================

#[test]
fn test_too_few_arguments() {
    for args in [
        vec!["node-01"],
        vec!["node-01", "4"],
        vec!["node-01", "4", "search/depth"],
        vec!["node-01", "4", "search/depth", "6", "name"],
    ] {
        let output = run(&args);
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        assert!(stderr(&output).contains("Too few arguments"), "{args:?}");
        assert!(stdout(&output).is_empty(), "{args:?}");
    }
}

#[test]
fn test_invalid_seed() {
    let output = run(&["node-01", "abc", "search/depth", "6"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid seed value: abc"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let output = redtune()
        .arg("--baseline")
        .arg(&missing)
        .args(["node-01", "4", "search/depth", "6"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to read baseline config"));
}

// ============================================================================
// TRIAL TESTS (stub engine)
// ============================================================================

#[cfg(unix)]
#[test]
fn test_win_is_relayed() {
    let fixture = Fixture::new("printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args.txt\"\necho W\n");

    let output = fixture.run(&["node-01", "4", "search/depth", "6"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "W\n");

    let args = read_args(&fixture.path("args.txt"));
    assert_eq!(&args[..2], &["-jar", "ShallowRedCLI.jar"]);
    assert_eq!(args[2], "play");

    let p = args.iter().position(|a| a == "-p").expect("-p present");
    let config: serde_json::Value = serde_json::from_str(&args[p + 1]).unwrap();
    assert_eq!(config["search"]["depth"], serde_json::json!(6));
    assert!(config["search"]["depth"].is_i64());
    assert_eq!(config["search"]["exploration"], serde_json::json!(1.41));

    assert_eq!(&args[args.len() - 2..], &["SHALLOWRED", "SHALLOWRED"]);
}

#[cfg(unix)]
#[test]
fn test_engine_failure_exits_2() {
    let fixture = Fixture::new("echo W\nexit 1\n");

    let output = fixture.run(&["node-01", "4", "search/depth", "6"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("failed to execute command"));
    assert!(err.contains(" play "));
    assert!(err.contains(r#""depth":6"#));
}

#[cfg(unix)]
#[test]
fn test_missing_key_launches_nothing() {
    let fixture = Fixture::new("touch \"$(dirname \"$0\")/launched\"\necho W\n");

    let output = fixture.run(&["node-01", "4", "eval/depth", "6"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("key `eval` not found"));
    assert!(!fixture.path("launched").exists());
}

#[cfg(unix)]
#[test]
fn test_negative_values_and_options() {
    let fixture = Fixture::new("printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args.txt\"\necho D\n");

    let output = fixture
        .command()
        .args(["--computing-time", "2", "--opponent", "alphabeta"])
        .args(["node-01", "-7", "search/exploration", "-0.5"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "D\n");

    let args = read_args(&fixture.path("args.txt"));
    let t = args.iter().position(|a| a == "-t").unwrap();
    assert_eq!(args[t + 1], "2");
    assert_eq!(args.last().map(String::as_str), Some("ALPHABETA"));
    assert!(args.iter().any(|a| a.contains(r#""exploration":-0.5"#)));
}

#[cfg(unix)]
#[test]
fn test_settings_file_under_env_and_options() {
    let fixture = Fixture::new("printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args.txt\"\necho L\n");
    std::fs::write(
        fixture.path("settings.json"),
        r#"{ "jar": "fromfile.jar", "computing_time": 7, "opponent": "mcts",
             "enemy_config": "fromfile-enemy.json" }"#,
    )
    .unwrap();

    let output = fixture
        .command()
        .env("REDTUNE_COMPUTING_TIME", "3")
        .env("REDTUNE_ENEMY_CONFIG", "fromenv-enemy.json")
        .arg("--settings")
        .arg(fixture.path("settings.json"))
        .args(["--enemy-config", "fromoption-enemy.json"])
        .args(["node-01", "4", "search/depth", "6"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "L\n");

    let args = read_args(&fixture.path("args.txt"));
    // file value kept where nothing overrides it
    assert_eq!(&args[..2], &["-jar", "fromfile.jar"]);
    assert_eq!(args.last().map(String::as_str), Some("MCTS"));
    // environment beats the file
    let t = args.iter().position(|a| a == "-t").unwrap();
    assert_eq!(args[t + 1], "3");
    // an explicit option beats the environment
    assert!(args.iter().any(|a| a == "fromoption-enemy.json"));
    assert!(!args.iter().any(|a| a.contains("fromenv") || a.contains("fromfile-enemy")));
}

#[test]
fn test_dry_run_prints_command() {
    let dir = tempfile::tempdir().unwrap();
    let baseline = dir.path().join("config.json");
    std::fs::write(&baseline, r#"{ "search": { "depth": 3 } }"#).unwrap();

    let output = redtune()
        .arg("--baseline")
        .arg(&baseline)
        .args(["--jar", "cli.jar", "--dry-run", "node-01", "4", "search/depth", "6"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("java -Xmx2g -jar cli.jar play"));
    assert!(out.contains(r#"-p '{"search":{"depth":6}}'"#));
    // nothing ran, so there is no outcome to complain about
    assert!(!stderr(&output).contains("W/L/D"));
}

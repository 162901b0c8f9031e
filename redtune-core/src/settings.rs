//! Settings for engine invocation
//!
//! Level 4 - Configuration
//!
//! Everything that stays fixed across trials: where the engine lives, which
//! baseline config to start from, and how the game is played.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Agent kinds understood by the engine's `play` command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    /// The tuned agent, configured with a JSON document
    #[default]
    #[serde(alias = "SHALLOWRED")]
    ShallowRed,
    /// Reference Monte Carlo tree search agent
    #[serde(alias = "MCTS")]
    Mcts,
    /// Reference alpha-beta agent
    #[serde(alias = "ALPHABETA", alias = "alpha-beta")]
    AlphaBeta,
}

impl Agent {
    /// Token passed to the engine as a positional argument
    pub fn as_arg(self) -> &'static str {
        match self {
            Agent::ShallowRed => "SHALLOWRED",
            Agent::Mcts => "MCTS",
            Agent::AlphaBeta => "ALPHABETA",
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Unknown agent name
#[derive(Debug, thiserror::Error)]
#[error("unknown agent `{0}` (expected shallowred, mcts or alphabeta)")]
pub struct ParseAgentError(String);

impl FromStr for Agent {
    type Err = ParseAgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "shallowred" => Ok(Agent::ShallowRed),
            "mcts" => Ok(Agent::Mcts),
            "alphabeta" => Ok(Agent::AlphaBeta),
            _ => Err(ParseAgentError(s.to_string())),
        }
    }
}

/// Game-mode switches forwarded to `play`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayMode {
    /// Play both sides of the same board; one win each counts as a draw
    pub switch_sides: bool,
    /// Start from a random stone distribution
    pub random_board: bool,
    /// Replay when the same side wins both games (needs `switch_sides`)
    pub repeat_on_same_side_win: bool,
    /// Replay drawn games
    pub repeat_on_draw: bool,
    /// Replay games aborted by an agent error
    pub repeat_on_error: bool,
}

impl Default for PlayMode {
    fn default() -> Self {
        Self {
            switch_sides: true,
            random_board: true,
            repeat_on_same_side_win: true,
            repeat_on_draw: false,
            repeat_on_error: false,
        }
    }
}

impl PlayMode {
    /// Engine flags for the enabled switches
    pub fn flags(&self) -> Vec<&'static str> {
        [
            (self.switch_sides, "--switchSides"),
            (self.random_board, "--randomBoard"),
            (self.repeat_on_same_side_win, "--repeatOnSameSideWin"),
            (self.repeat_on_draw, "--repeatOnDraw"),
            (self.repeat_on_error, "--repeatOnError"),
        ]
        .into_iter()
        .filter_map(|(enabled, flag)| enabled.then_some(flag))
        .collect()
    }
}

/// Invocation settings shared by every trial
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interpreter used to run the engine
    pub java: String,
    /// JVM memory option, e.g. `-Xmx2g`
    pub memory: String,
    /// Engine jar
    pub jar: PathBuf,
    /// Baseline config that overrides are applied to
    pub baseline_config: PathBuf,
    /// Config file for the opponent
    pub enemy_config: PathBuf,
    /// Seconds each agent may think per move
    pub computing_time: u32,
    /// Directory the engine writes move logs into
    pub log_dir: PathBuf,
    pub play_mode: PlayMode,
    pub player: Agent,
    pub opponent: Agent,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            memory: "-Xmx2g".to_string(),
            jar: PathBuf::from("ShallowRedCLI.jar"),
            baseline_config: PathBuf::from("config.json"),
            enemy_config: PathBuf::from("enemy.json"),
            computing_time: 10,
            log_dir: std::env::temp_dir().join("shallowred-logs"),
            play_mode: PlayMode::default(),
            player: Agent::ShallowRed,
            opponent: Agent::ShallowRed,
        }
    }
}

impl Settings {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn with_java(mut self, java: impl Into<String>) -> Self {
        self.java = java.into();
        self
    }

    pub fn with_memory(mut self, memory: impl Into<String>) -> Self {
        self.memory = memory.into();
        self
    }

    pub fn with_jar(mut self, jar: impl Into<PathBuf>) -> Self {
        self.jar = jar.into();
        self
    }

    pub fn with_baseline_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.baseline_config = path.into();
        self
    }

    pub fn with_enemy_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.enemy_config = path.into();
        self
    }

    pub fn with_computing_time(mut self, seconds: u32) -> Self {
        self.computing_time = seconds;
        self
    }

    pub fn with_log_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_dir = path.into();
        self
    }

    pub fn with_play_mode(mut self, play_mode: PlayMode) -> Self {
        self.play_mode = play_mode;
        self
    }

    pub fn with_opponent(mut self, opponent: Agent) -> Self {
        self.opponent = opponent;
        self
    }
}

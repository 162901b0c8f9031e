//! Engine command construction
//!
//! Level 3 - Step-level implementation
//!
//! The command is kept as a discrete argument vector and handed straight to
//! the OS, so the player config travels as raw JSON with no shell quoting.
//! `render` produces a shell-quoted copy for logs and diagnostics only.

use std::borrow::Cow;
use std::path::Path;
use std::process::Command;

use crate::settings::Settings;

/// Engine subcommand that plays a single game
pub const PLAY_SUBCOMMAND: &str = "play";

/// A fully assembled engine invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl GameCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build the `play` invocation for one trial
    ///
    /// Layout:
    /// `<java> <memory> -jar <jar> play <mode flags> -t <secs> -p <json>
    ///  --enemyConfigFile <file> -l <dir> <player> <opponent>`
    pub fn build(settings: &Settings, player_config: &str) -> Self {
        let mut args = vec![
            settings.memory.clone(),
            "-jar".to_string(),
            path_arg(&settings.jar),
            PLAY_SUBCOMMAND.to_string(),
        ];

        args.extend(settings.play_mode.flags().into_iter().map(String::from));

        args.extend([
            "-t".to_string(),
            settings.computing_time.to_string(),
            "-p".to_string(),
            player_config.to_string(),
            "--enemyConfigFile".to_string(),
            path_arg(&settings.enemy_config),
            "-l".to_string(),
            path_arg(&settings.log_dir),
            settings.player.as_arg().to_string(),
            settings.opponent.as_arg().to_string(),
        ]);

        Self::new(settings.java.clone(), args)
    }

    /// Convert into a `std::process::Command` ready to spawn
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }

    /// Shell-quoted single-line form
    pub fn render(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// POSIX single-quoting for anything outside a conservative safe set
fn shell_quote(arg: &str) -> Cow<'_, str> {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));

    if safe {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

//! Chat commands the plugin registers with the host.
//!
//! Both commands take no arguments and open a form session. Only players can
//! run them; anything else (console, command blocks) gets an error and the
//! host reports the command as failed.

use crate::flow::{Context, Entry, Session, Step};
use crate::lang::{Locale, Text};
use crate::model::Player;

/// A command as registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub alias: &'static str,
    pub description: Text,
    pub entry: Entry,
}

/// `warpmanage`/`warpm` opens the management menu, `warplist`/`warp` the list.
pub static COMMANDS: [CommandSpec; 2] = [
    CommandSpec {
        name: "warpmanage",
        alias: "warpm",
        description: Text::ManageCommandDescription,
        entry: Entry::Manage,
    },
    CommandSpec {
        name: "warplist",
        alias: "warp",
        description: Text::ListCommandDescription,
        entry: Entry::List,
    },
];

/// Who ran a command. `player` is `None` for non-player sources.
#[derive(Debug, Clone, Default)]
pub struct CommandOrigin {
    pub player: Option<Player>,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("this command can only be run by a player")]
    NotAPlayer,
}

impl CommandError {
    /// The line shown to whoever ran the command.
    pub fn message(&self, locale: Locale) -> String {
        match self {
            Self::Unknown(_) => self.to_string(),
            Self::NotAPlayer => locale.error(Text::NotAPlayer),
        }
    }
}

impl CommandSpec {
    pub fn matches(&self, input: &str) -> bool {
        let input = input.trim().trim_start_matches('/');
        input.eq_ignore_ascii_case(self.name) || input.eq_ignore_ascii_case(self.alias)
    }
}

/// Looks a command up by name or alias. A leading `/` is ignored.
pub fn find(input: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.matches(input))
}

/// Runs a command, opening a session for the player who ran it.
pub fn execute(
    spec: &CommandSpec,
    origin: CommandOrigin,
    cx: &mut Context<'_>,
) -> Result<(Session, Step), CommandError> {
    let player = origin.player.ok_or(CommandError::NotAPlayer)?;
    tracing::debug!(command = spec.name, player = %player.name, "command invoked");
    Ok(Session::start(player, spec.entry, cx))
}

//! CLI interface for EveryoneWarp.
//!
//! Two kinds of commands:
//!
//! - `list|show|add|delete|migrate` work on the warp store directly:
//!   arguments in, plain text out.
//! - `run <command>` plays host: it runs one of the in-game commands
//!   (`warpmanage`, `warpm`, `warplist`, `warp`) and walks its forms on the
//!   terminal.
//!
//! Who is acting comes from `--as`/`--xuid`/`--perm-level`, falling back to
//! the `[player]` section of the config file.

mod console;
mod format;

use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::CommandOrigin;
use crate::config::Config;
use crate::format::{format_position, strip_codes, warp_details};
use crate::model::{Player, Position, Warp};
use crate::plugin::EveryoneWarp;
use crate::storage::{MigrationOutcome, WarpStore};

use console::Console;
use format::format_warp_row;

/// EveryoneWarp: shared warp points for your server.
#[derive(Debug, Parser)]
#[command(name = "everyone-warp", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Config file. Defaults to ./everyone-warp.toml, then ~/.everyone-warp/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    identity: IdentityArgs,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Examples:
  everyone-warp add "Spawn" --at 0,64,0 --desc "Where it all began"
  everyone-warp list
  everyone-warp show 1
  everyone-warp --as Steve --xuid 2535400000000001 delete 1
  everyone-warp --as Steve run warpm --at 12.5,70,-3,1

Positions are x,y,z with an optional dimension id (0 overworld, 1 nether, 2 end)."#;

/// Acting player, overriding the config's `[player]` section.
#[derive(Debug, Args)]
struct IdentityArgs {
    /// Display name of the acting player.
    #[arg(long = "as", value_name = "NAME", global = true)]
    acting_name: Option<String>,

    /// Unique id of the acting player.
    #[arg(long, global = true)]
    xuid: Option<String>,

    /// Permission level of the acting player. Above zero may delete any warp.
    #[arg(long, global = true)]
    perm_level: Option<u8>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all warps in creation order.
    List,

    /// Show one warp in detail.
    Show {
        /// Number from `list`.
        index: usize,
    },

    /// Create a warp.
    Add {
        /// Warp name.
        name: String,

        /// Position as x,y,z[,dimension].
        #[arg(long, value_parser = parse_position)]
        at: Position,

        /// Free-text description.
        #[arg(long)]
        desc: Option<String>,
    },

    /// Delete a warp you created (or any warp, with a permission level above zero).
    Delete {
        /// Number from `list`.
        index: usize,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Move data left by the plugin's old name into the store.
    Migrate,

    /// Run an in-game command and answer its forms on the terminal.
    Run {
        /// `warpmanage`, `warpm`, `warplist`, or `warp`.
        command: String,

        /// Where the acting player stands, as x,y,z[,dimension].
        #[arg(long, value_parser = parse_position, default_value = "0,64,0,0")]
        at: Position,
    },
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    let acting = |pos| cli.identity.player(&config, pos);

    match cli.command {
        Command::List => cmd_list(&load_plugin(&config)?),
        Command::Show { index } => cmd_show(&load_plugin(&config)?, index),
        Command::Add { name, at, desc } => {
            cmd_add(&load_plugin(&config)?, &acting(at), &name, desc)
        }
        Command::Delete { index, yes } => cmd_delete(
            &load_plugin(&config)?,
            &acting(Position::default()),
            index,
            yes,
        ),
        Command::Migrate => cmd_migrate(&config),
        Command::Run { command, at } => cmd_run(&mut load_plugin(&config)?, &command, acting(at)),
    }
}

impl IdentityArgs {
    fn player(&self, config: &Config, pos: Position) -> Player {
        let mut player = config.player.to_player(pos);
        if let Some(name) = &self.acting_name {
            player.name.clone_from(name);
            if config.player.real_name.is_none() {
                player.real_name.clone_from(name);
            }
        }
        if let Some(xuid) = &self.xuid {
            player.xuid.clone_from(xuid);
        }
        if let Some(level) = self.perm_level {
            player.perm_level = level;
        }
        player
    }
}

fn cmd_list(plugin: &EveryoneWarp) -> Result<(), String> {
    let warps = load_warps(plugin)?;

    if warps.is_empty() {
        println!("No warps");
        return Ok(());
    }

    for (i, warp) in warps.iter().enumerate() {
        println!("{}", format_warp_row(i, warp, plugin.locale()));
    }

    Ok(())
}

fn cmd_show(plugin: &EveryoneWarp, index: usize) -> Result<(), String> {
    let warps = load_warps(plugin)?;
    let warp = pick(&warps, index)?;

    let details = warp_details(warp, plugin.locale(), plugin.time_zone());
    println!("{}", strip_codes(&details));
    Ok(())
}

fn cmd_add(
    plugin: &EveryoneWarp,
    player: &Player,
    name: &str,
    desc: Option<String>,
) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("warp name must not be empty".to_string());
    }
    let desc = desc.filter(|d| !d.trim().is_empty());

    let warp = Warp::new(player.snapshot(), player.pos, name, desc);
    plugin
        .store()
        .append(&warp)
        .map_err(|e| format!("failed to save warp: {e}"))?;

    let pos = strip_codes(&format_position(&warp.pos, plugin.locale()));
    eprintln!("Created warp {} at {pos}", warp.name);
    Ok(())
}

fn cmd_delete(
    plugin: &EveryoneWarp,
    player: &Player,
    index: usize,
    yes: bool,
) -> Result<(), String> {
    let warps = load_warps(plugin)?;
    let warp = pick(&warps, index)?;

    if !player.can_delete(warp) {
        return Err(format!(
            "'{}' belongs to {}; only its owner or a player with a permission level above zero can delete it",
            warp.name, warp.player.name
        ));
    }

    if !yes && !confirm(&format!("Delete warp '{}'?", warp.name))? {
        eprintln!("Cancelled");
        return Ok(());
    }

    let removed = plugin
        .store()
        .remove_by_value(warp)
        .map_err(|e| format!("failed to delete warp: {e}"))?;
    if !removed {
        return Err(format!("warp '{}' no longer exists", warp.name));
    }

    eprintln!("Deleted warp {}", warp.name);
    Ok(())
}

fn cmd_migrate(config: &Config) -> Result<(), String> {
    let store = WarpStore::new(config.store_path());
    let paths = config.legacy_paths();

    match store
        .migrate_legacy(&paths)
        .map_err(|e| format!("failed to migrate {}: {e}", paths.legacy.display()))?
    {
        MigrationOutcome::NothingToMigrate => {
            eprintln!("Nothing to migrate ({} not found)", paths.legacy.display());
        }
        MigrationOutcome::Migrated { count } => {
            eprintln!(
                "Migrated {count} warp(s); old file moved to {}",
                paths.aside.display()
            );
        }
    }
    Ok(())
}

fn cmd_run(plugin: &mut EveryoneWarp, command: &str, player: Player) -> Result<(), String> {
    plugin.on_server_started();

    let xuid = player.xuid.clone();
    let origin = CommandOrigin {
        player: Some(player),
    };
    let (session, step) = plugin
        .dispatch(command, origin)
        .map_err(|e| strip_codes(&e.message(plugin.locale())))?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    console
        .drive(plugin, session, step)
        .and_then(|()| console.report_navigation(plugin, &xuid))
        .map_err(|e| format!("console I/O failed: {e}"))
}

fn load_plugin(config: &Config) -> Result<EveryoneWarp, String> {
    EveryoneWarp::load(config).map_err(|e| e.to_string())
}

fn load_warps(plugin: &EveryoneWarp) -> Result<Vec<Warp>, String> {
    plugin
        .store()
        .load()
        .map_err(|e| format!("failed to load warps: {e}"))
}

/// Resolve a 1-based index from `list`.
fn pick(warps: &[Warp], index: usize) -> Result<&Warp, String> {
    index
        .checked_sub(1)
        .and_then(|i| warps.get(i))
        .ok_or_else(|| format!("no warp #{index} (there are {})", warps.len()))
}

fn confirm(question: &str) -> Result<bool, String> {
    eprint!("{question} [y/N] ");
    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(|e| format!("failed to read answer: {e}"))?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Parse `x,y,z` or `x,y,z,dim`.
fn parse_position(input: &str) -> Result<Position, String> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    let coord = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{s}' is not a number"))
    };
    let (x, y, z, dim) = match parts.as_slice() {
        [x, y, z] => (x, y, z, "0"),
        [x, y, z, dim] => (x, y, z, *dim),
        _ => return Err("expected x,y,z or x,y,z,dimension".to_string()),
    };
    let dim_id = dim
        .parse::<i32>()
        .map_err(|_| format!("'{dim}' is not a dimension id"))?;
    Ok(Position::new(coord(x)?, coord(y)?, coord(z)?, dim_id))
}

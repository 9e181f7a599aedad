//! Plugin lifecycle: load, server start, command dispatch.
//!
//! One `EveryoneWarp` is built when the host loads the plugin and lives until
//! the host shuts down. It owns the warp store and the navigation board and
//! hands them to sessions by reference.

use jiff::tz::TimeZone;

use crate::commands::{self, COMMANDS, CommandError, CommandOrigin, CommandSpec};
use crate::config::{Config, ConfigError};
use crate::flow::{Context, Response, Session, Step};
use crate::lang::Locale;
use crate::nav::TaskBoard;
use crate::storage::{LegacyPaths, MigrationOutcome, WarpStore};

pub const PLUGIN_NAME: &str = "EveryoneWarp";

/// The running plugin.
pub struct EveryoneWarp {
    store: WarpStore,
    navigator: TaskBoard,
    locale: Locale,
    time_zone: TimeZone,
    started: bool,
}

impl EveryoneWarp {
    /// Loads the plugin and migrates legacy data before anything else runs.
    ///
    /// Only configuration problems fail here. A bad legacy file is logged and
    /// left for the next start.
    pub fn load(config: &Config) -> Result<Self, ConfigError> {
        let time_zone = config.time_zone()?;
        let store = WarpStore::new(config.store_path());
        migrate_on_startup(&store, &config.legacy_paths());

        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            store = %store.path().display(),
            "{PLUGIN_NAME} loaded"
        );

        Ok(Self {
            store,
            navigator: TaskBoard::new(),
            locale: config.locale,
            time_zone,
            started: false,
        })
    }

    /// Registers the commands. Commands are unavailable until this runs.
    pub fn on_server_started(&mut self) -> &'static [CommandSpec] {
        self.started = true;
        for spec in &COMMANDS {
            tracing::debug!(
                name = spec.name,
                alias = spec.alias,
                description = self.locale.text(spec.description),
                "command registered"
            );
        }
        &COMMANDS
    }

    /// Runs a command by name or alias.
    pub fn dispatch(
        &mut self,
        input: &str,
        origin: CommandOrigin,
    ) -> Result<(Session, Step), CommandError> {
        let spec = commands::find(input)
            .filter(|_| self.started)
            .ok_or_else(|| CommandError::Unknown(input.trim().to_string()))?;
        commands::execute(spec, origin, &mut self.context())
    }

    /// Feeds a form response into a session.
    pub fn respond(&mut self, session: &mut Session, response: Response) -> Step {
        session.respond(response, &mut self.context())
    }

    pub fn store(&self) -> &WarpStore {
        &self.store
    }

    pub fn navigator(&self) -> &TaskBoard {
        &self.navigator
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    fn context(&mut self) -> Context<'_> {
        Context {
            store: &self.store,
            navigator: &mut self.navigator,
            locale: self.locale,
            time_zone: &self.time_zone,
        }
    }
}

/// Runs the legacy migration, logging instead of failing.
pub fn migrate_on_startup(store: &WarpStore, paths: &LegacyPaths) -> Option<MigrationOutcome> {
    match store.migrate_legacy(paths) {
        Ok(outcome) => Some(outcome),
        Err(error) => {
            tracing::error!(
                %error,
                legacy = %paths.legacy.display(),
                "legacy warp migration failed; will retry on next start"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    use crate::model::{Player, Position};

    fn config_in(dir: &TempDir) -> Config {
        Config {
            server_root: dir.path().to_path_buf(),
            time_zone: None,
            ..Config::default()
        }
    }

    fn player() -> Player {
        Player {
            name: "Steve".into(),
            real_name: "Steve".into(),
            xuid: "1".into(),
            perm_level: 0,
            pos: Position::new(0.0, 64.0, 0.0, 0),
        }
    }

    fn write_legacy(config: &Config, contents: &str) {
        let legacy = config.legacy_paths().legacy;
        fs::create_dir_all(legacy.parent().unwrap()).unwrap();
        fs::write(legacy, contents).unwrap();
    }

    #[test]
    fn load_migrates_legacy_data() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_legacy(
            &config,
            r#"{ "wraps": [ {
                "player": { "name": "Alex", "realName": "Alex", "xuid": "2" },
                "pos": { "x": 1, "y": 2, "z": 3, "dimId": 0 },
                "name": "Old spot",
                "date": "2022-01-01T00:00:00.000Z",
                "desc": null
            } ] }"#,
        );

        let plugin = EveryoneWarp::load(&config).unwrap();

        let warps = plugin.store().load().unwrap();
        assert_eq!(warps.len(), 1);
        assert_eq!(warps[0].name, "Old spot");
        assert!(config.legacy_paths().aside.exists());
    }

    #[test]
    fn load_survives_malformed_legacy_data() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_legacy(&config, "garbage");

        let plugin = EveryoneWarp::load(&config).unwrap();

        assert!(plugin.store().load().unwrap().is_empty());
        assert!(config.legacy_paths().legacy.exists());
    }

    #[test]
    fn commands_unavailable_before_server_start() {
        let dir = TempDir::new().unwrap();
        let mut plugin = EveryoneWarp::load(&config_in(&dir)).unwrap();
        let origin = CommandOrigin {
            player: Some(player()),
        };

        let err = plugin.dispatch("warp", origin).unwrap_err();
        assert!(matches!(err, CommandError::Unknown(_)));
    }

    #[test]
    fn dispatch_and_respond_after_server_start() {
        let dir = TempDir::new().unwrap();
        let mut plugin = EveryoneWarp::load(&config_in(&dir)).unwrap();
        assert_eq!(plugin.on_server_started().len(), 2);

        let origin = CommandOrigin {
            player: Some(player()),
        };
        let (mut session, step) = plugin.dispatch("warpm", origin).unwrap();
        assert!(step.form.is_some());

        let step = plugin.respond(&mut session, Response::Closed);
        assert!(step.form.is_none());
        assert!(session.is_finished());
    }
}

//! Plugin configuration.
//!
//! Looked up in order: `--config <path>`, `./everyone-warp.toml`,
//! `~/.everyone-warp/config.toml`. Defaults apply when none exists.
//!
//! ```toml
//! server-root = "/srv/bedrock"
//! locale = "zh"
//! time-zone = "Asia/Shanghai"
//!
//! [player]
//! name = "Steve"
//! xuid = "2535400000000001"
//! perm-level = 1
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use jiff::tz::TimeZone;
use serde::Deserialize;

use crate::lang::Locale;
use crate::model::{Player, Position};
use crate::storage::LegacyPaths;

/// Name of the config file looked up in the working directory.
pub const LOCAL_FILE: &str = "everyone-warp.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unknown time zone '{name}': {source}")]
    TimeZone { name: String, source: jiff::Error },
}

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Server directory; plugin data lives under `<server-root>/plugins/`.
    pub server_root: PathBuf,

    /// Language for forms and messages.
    pub locale: Locale,

    /// IANA zone for displayed dates. The system zone when unset.
    pub time_zone: Option<String>,

    /// Who the console host acts as.
    pub player: PlayerConfig,
}

/// Identity used by the console host when no flags override it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PlayerConfig {
    pub name: String,

    /// Account name. Falls back to `name`.
    pub real_name: Option<String>,

    pub xuid: String,
    pub perm_level: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_root: PathBuf::from("."),
            locale: Locale::default(),
            time_zone: None,
            player: PlayerConfig::default(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Console".to_string(),
            real_name: None,
            xuid: "0".to_string(),
            perm_level: 0,
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit path must exist. Otherwise the first file found in the
    /// lookup chain wins, and no file at all means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        let candidates = [Some(PathBuf::from(LOCAL_FILE)), Self::home_path()];
        for path in candidates.into_iter().flatten() {
            match fs::read_to_string(&path) {
                Ok(contents) => return Self::parse(&contents, &path),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(ConfigError::Read { path, source }),
            }
        }

        Ok(Self::default())
    }

    /// The per-user config path: `~/.everyone-warp/config.toml`.
    pub fn home_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".everyone-warp").join("config.toml"))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// This plugin's data directory.
    pub fn plugin_dir(&self) -> PathBuf {
        self.server_root.join("plugins").join("EveryoneWarp")
    }

    /// The warp store file.
    pub fn store_path(&self) -> PathBuf {
        self.plugin_dir().join("warps.json")
    }

    /// Where data from the plugin's old name lives, and where it is moved once migrated.
    pub fn legacy_paths(&self) -> LegacyPaths {
        LegacyPaths {
            legacy: self
                .server_root
                .join("plugins")
                .join("EveryoneWrap")
                .join("warps.json"),
            aside: self.plugin_dir().join("warps_old.json"),
        }
    }

    pub fn time_zone(&self) -> Result<TimeZone, ConfigError> {
        match &self.time_zone {
            Some(name) => TimeZone::get(name).map_err(|source| ConfigError::TimeZone {
                name: name.clone(),
                source,
            }),
            None => Ok(TimeZone::system()),
        }
    }
}

impl PlayerConfig {
    /// A host player with this identity, standing at `pos`.
    pub fn to_player(&self, pos: Position) -> Player {
        Player {
            name: self.name.clone(),
            real_name: self.real_name.clone().unwrap_or_else(|| self.name.clone()),
            xuid: self.xuid.clone(),
            perm_level: self.perm_level,
            pos,
        }
    }
}

//! One-shot migration from the plugin's old data location.
//!
//! Early releases shipped under a misspelled name and stored the list under
//! `wraps` instead of `warps`. If that file is still around at startup its
//! warps are copied into the store and the file is renamed aside, so the
//! check fails on every later run.

use std::{fs, path::PathBuf};

use serde::Deserialize;

use crate::model::Warp;

use super::{Result, WarpStore};

/// Where legacy data lives and where it goes once migrated.
#[derive(Debug, Clone)]
pub struct LegacyPaths {
    /// The old store file.
    pub legacy: PathBuf,

    /// Where the old file is moved after a successful migration.
    pub aside: PathBuf,
}

/// What a migration run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No legacy file was found.
    NothingToMigrate,

    /// Legacy warps were written to the store.
    Migrated { count: usize },
}

#[derive(Deserialize)]
struct LegacyFile {
    #[serde(default)]
    wraps: Vec<Warp>,
}

impl WarpStore {
    /// Moves legacy warps into this store, replacing its contents.
    ///
    /// A legacy file that cannot be read or parsed is an error. In that case
    /// neither the store nor the legacy file is touched, so the next startup
    /// tries again.
    pub fn migrate_legacy(&self, paths: &LegacyPaths) -> Result<MigrationOutcome> {
        if !paths.legacy.is_file() {
            return Ok(MigrationOutcome::NothingToMigrate);
        }

        let json = fs::read_to_string(&paths.legacy)?;
        let legacy: LegacyFile = serde_json::from_str(&json)?;
        let count = legacy.wraps.len();

        self.save(&legacy.wraps)?;

        if let Some(parent) = paths.aside.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&paths.legacy, &paths.aside)?;

        tracing::info!(
            count,
            from = %paths.legacy.display(),
            aside = %paths.aside.display(),
            "migrated legacy warp data"
        );

        Ok(MigrationOutcome::Migrated { count })
    }
}

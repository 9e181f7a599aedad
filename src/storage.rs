//! Local persistence for warps.
//!
//! All warps live in one JSON file, under a single key:
//!
//! ```text
//! plugins/EveryoneWarp/
//!   warps.json       # { "warps": [ ... ] }
//!   warps_old.json   # Legacy data, renamed aside after migration
//! ```
//!
//! Every write replaces the whole list. Callers read, modify, and write back.

mod migrate;

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

// Trait must be in scope for `.flush()` on `BufWriter`.
use io::Write;

use serde::{Deserialize, Serialize};

use crate::model::Warp;

pub use migrate::{LegacyPaths, MigrationOutcome};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// On-disk shape of the store file.
///
/// The host's JSON config files may carry other keys next to `warps`;
/// they are kept as-is across writes.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WarpFile {
    #[serde(default)]
    warps: Vec<Warp>,

    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

/// The warp list, backed by one JSON file.
///
/// Construct once at startup and pass by reference to whatever needs it.
/// `append` and `remove_by_value` hold a lock across their read-modify-write,
/// so a shared store never loses a concurrent write.
pub struct WarpStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl WarpStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every warp in insertion order.
    ///
    /// A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<Warp>> {
        Ok(self.read_file()?.warps)
    }

    /// Replaces the stored list with `warps`.
    pub fn save(&self, warps: &[Warp]) -> Result<()> {
        let _guard = self.lock();
        self.replace(warps.to_vec())
    }

    /// Adds a warp at the end of the list. Duplicates are allowed.
    pub fn append(&self, warp: &Warp) -> Result<()> {
        let _guard = self.lock();
        let mut warps = self.load()?;
        warps.push(warp.clone());
        self.replace(warps)
    }

    /// Removes the first warp equal to `warp`.
    ///
    /// Returns `false` without writing anything when no warp matches.
    pub fn remove_by_value(&self, warp: &Warp) -> Result<bool> {
        let _guard = self.lock();
        let mut warps = self.load()?;
        let Some(index) = warps.iter().position(|w| w == warp) else {
            return Ok(false);
        };
        warps.remove(index);
        self.replace(warps)?;
        Ok(true)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock has nothing to repair.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_file(&self) -> Result<WarpFile> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(WarpFile::default()),
            Err(e) => return Err(e.into()),
        };
        if json.trim().is_empty() {
            return Ok(WarpFile::default());
        }
        Ok(serde_json::from_str(&json)?)
    }

    /// Writes `warps` under the existing document's other keys.
    fn replace(&self, warps: Vec<Warp>) -> Result<()> {
        let mut file = self.read_file()?;
        file.warps = warps;
        self.write_file(&file)
    }

    /// Writes to a sibling temp file, then renames it over the store.
    fn write_file(&self, file: &WarpFile) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.tmp_path();
        {
            let mut writer = io::BufWriter::new(fs::File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, file)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("warps.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{sync::Arc, thread};

    use jiff::Timestamp;
    use tempfile::TempDir;

    use crate::model::*;

    fn test_store() -> (TempDir, WarpStore) {
        let dir = TempDir::new().unwrap();
        let store = WarpStore::new(dir.path().join("EveryoneWarp").join("warps.json"));
        (dir, store)
    }

    fn sample_warp(name: &str) -> Warp {
        Warp {
            player: WarpPlayer {
                name: "Steve".into(),
                real_name: "Steve".into(),
                xuid: "2535400000000001".into(),
            },
            pos: Position::new(12.5, 64.0, -30.25, 0),
            name: name.into(),
            date: Timestamp::new(1_700_000_000, 0).unwrap(),
            desc: None,
        }
    }

    #[test]
    fn load_without_file_is_empty() {
        let (_dir, store) = test_store();
        let warps = store.load().unwrap();

        assert!(warps.is_empty());
    }

    #[test]
    fn save_then_load_keeps_order_and_values() {
        let (_dir, store) = test_store();
        let mut described = sample_warp("Farm");
        described.desc = Some("Wheat and carrots".into());
        described.pos = Position::new(0.1, 0.2, 0.3, 2);
        let warps = vec![sample_warp("Spawn"), described, sample_warp("Spawn")];

        store.save(&warps).unwrap();

        assert_eq!(store.load().unwrap(), warps);
    }

    #[test]
    fn save_replaces_whole_list() {
        let (_dir, store) = test_store();
        store
            .save(&[sample_warp("A"), sample_warp("B")])
            .unwrap();
        store.save(&[sample_warp("C")]).unwrap();

        let names: Vec<String> = store.load().unwrap().into_iter().map(|w| w.name).collect();
        assert_eq!(names, ["C"]);
    }

    #[test]
    fn append_adds_to_the_end() {
        let (_dir, store) = test_store();
        store.append(&sample_warp("First")).unwrap();
        store.append(&sample_warp("Second")).unwrap();

        let warps = store.load().unwrap();
        assert_eq!(warps.len(), 2);
        assert_eq!(warps.last().unwrap(), &sample_warp("Second"));
    }

    #[test]
    fn append_does_not_deduplicate() {
        let (_dir, store) = test_store();
        store.append(&sample_warp("Twin")).unwrap();
        store.append(&sample_warp("Twin")).unwrap();

        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn remove_by_value_removes_first_equal_warp() {
        let (_dir, store) = test_store();
        let a = sample_warp("A");
        let b = sample_warp("B");
        let c = sample_warp("C");
        store.save(&[a.clone(), b, c.clone()]).unwrap();

        // A separately built value, equal field by field.
        let b_again = sample_warp("B");
        assert!(store.remove_by_value(&b_again).unwrap());

        assert_eq!(store.load().unwrap(), vec![a, c]);
    }

    #[test]
    fn remove_by_value_only_removes_one_of_equal_pair() {
        let (_dir, store) = test_store();
        store
            .save(&[sample_warp("Twin"), sample_warp("Other"), sample_warp("Twin")])
            .unwrap();

        assert!(store.remove_by_value(&sample_warp("Twin")).unwrap());

        let names: Vec<String> = store.load().unwrap().into_iter().map(|w| w.name).collect();
        assert_eq!(names, ["Other", "Twin"]);
    }

    #[test]
    fn remove_by_value_miss_leaves_store_unchanged() {
        let (_dir, store) = test_store();
        let warps = vec![sample_warp("A"), sample_warp("B")];
        store.save(&warps).unwrap();

        let mut stranger = sample_warp("A");
        stranger.pos.dim_id = 1;
        assert!(!store.remove_by_value(&stranger).unwrap());

        assert_eq!(store.load().unwrap(), warps);
    }

    #[test]
    fn remove_by_value_on_missing_file_does_not_create_it() {
        let (_dir, store) = test_store();

        assert!(!store.remove_by_value(&sample_warp("A")).unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn concurrent_appends_are_all_kept() {
        let (_dir, store) = test_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.append(&sample_warp(&format!("W{i}"))).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut names: Vec<String> = store.load().unwrap().into_iter().map(|w| w.name).collect();
        names.sort();
        let mut expected: Vec<String> = (0..16).map(|i| format!("W{i}")).collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn concurrent_removes_and_appends_do_not_lose_writes() {
        let (_dir, store) = test_store();
        let doomed: Vec<Warp> = (0..8).map(|i| sample_warp(&format!("Old{i}"))).collect();
        store.save(&doomed).unwrap();
        let store = Arc::new(store);

        let removers = doomed.into_iter().map(|warp| {
            let store = Arc::clone(&store);
            thread::spawn(move || assert!(store.remove_by_value(&warp).unwrap()))
        });
        let appenders = (0..8).map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.append(&sample_warp(&format!("New{i}"))).unwrap())
        });
        let handles: Vec<_> = removers.chain(appenders).collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let warps = store.load().unwrap();
        assert_eq!(warps.len(), 8);
        assert!(warps.iter().all(|w| w.name.starts_with("New")));
    }

    #[test]
    fn save_keeps_unrelated_keys() {
        let (_dir, store) = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{ "version": 3, "warps": [] }"#).unwrap();

        store.append(&sample_warp("A")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 3);
        assert_eq!(raw["warps"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let (_dir, store) = test_store();
        store.save(&[sample_warp("A")]).unwrap();

        let entries: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, [OsString::from("warps.json")]);
    }

    #[test]
    fn empty_file_is_an_empty_store() {
        let (_dir, store) = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "").unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn hand_written_records_survive_a_save_cycle() {
        let (_dir, store) = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{ "warps": [ {
                "player": { "name": "Steve", "realName": "Steve", "xuid": "1" },
                "pos": { "x": 0.1, "y": 64, "z": -1234.5678, "dimId": 2 },
                "name": "Portal",
                "date": "2023-07-04T09:05:03.120Z",
                "desc": null
            } ] }"#,
        )
        .unwrap();

        let first = store.load().unwrap();
        store.save(&first).unwrap();

        assert_eq!(store.load().unwrap(), first);
        assert_eq!(first[0].pos, Position::new(0.1, 64.0, -1234.5678, 2));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let (_dir, store) = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }
}

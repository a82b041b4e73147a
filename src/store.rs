#![cfg(feature = "std")]
//! Persistence of the settings and match snapshot blobs.
//!
//! The surrounding application owns a key/value store; the engine only
//! defines the two keys and the JSON encoding of what goes under them.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use log::debug;

use crate::config::{SETTINGS_KEY, SNAPSHOT_KEY};
use crate::game::MatchSnapshot;
use crate::settings::MatchSettings;

/// Minimal string key/value store.
pub trait BlobStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

/// Store kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store that keeps one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating store directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading blob {}", key)),
        }
    }

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        fs::write(self.path(key), value).with_context(|| format!("writing blob {}", key))
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing blob {}", key)),
        }
    }
}

/// Reads and writes the settings and snapshot blobs under their fixed keys.
#[derive(Debug)]
pub struct MatchStorage<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> MatchStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn save_settings(&mut self, settings: &MatchSettings) -> anyhow::Result<()> {
        let blob = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, blob)
    }

    /// Stored settings, re-validated. Empty blobs read as `None`.
    pub fn load_settings(&self) -> anyhow::Result<Option<MatchSettings>> {
        let Some(blob) = self.store.get(SETTINGS_KEY)? else {
            return Ok(None);
        };
        if blob.trim().is_empty() {
            return Ok(None);
        }
        let settings: MatchSettings =
            serde_json::from_str(&blob).context("decoding settings blob")?;
        settings.validate()?;
        Ok(Some(settings))
    }

    pub fn save_snapshot(&mut self, snapshot: &MatchSnapshot) -> anyhow::Result<()> {
        let blob = serde_json::to_string(snapshot)?;
        debug!("saving snapshot at stage {}", snapshot.stage);
        self.store.set(SNAPSHOT_KEY, blob)
    }

    pub fn load_snapshot(&self) -> anyhow::Result<Option<MatchSnapshot>> {
        match self.store.get(SNAPSHOT_KEY)? {
            Some(blob) if !blob.trim().is_empty() => Ok(Some(
                serde_json::from_str(&blob).context("decoding match snapshot blob")?,
            )),
            _ => Ok(None),
        }
    }

    /// Forget both blobs, as on a reset.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.store.remove(SETTINGS_KEY)?;
        self.store.remove(SNAPSHOT_KEY)
    }
}

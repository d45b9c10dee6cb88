//! Tracker state persistence with file locking.
//!
//! The whole application state is one JSON document at a fixed path.
//! Saves are atomic (temp file + rename) and guarded by advisory locks so
//! a second process cannot interleave a partial write.

use crate::{Error, Result, TrackerState};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// File name of the persisted state document inside the data directory
pub const STATE_FILE: &str = "tracker.json";

impl TrackerState {
    /// Load tracker state from a file with shared locking.
    ///
    /// Returns default state if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns default state,
    /// keeping the tracker usable offline.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No state file found, using default state");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<TrackerState>(&contents) {
            Ok(state) => {
                tracing::debug!(
                    "Loaded tracker state from {:?} ({} weights, {} meals)",
                    path,
                    state.weights.len(),
                    state.meals.len()
                );
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save tracker state to a file with exclusive locking.
    ///
    /// Atomically writes state by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "state path missing parent")
        })?)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old state file
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved tracker state to {:?}", path);
        Ok(())
    }

    /// Load state, modify it, and save it back atomically.
    ///
    /// Every mutating UI action goes through this load-modify-save pattern;
    /// the dashboard then recomputes from the saved state.
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut TrackerState) -> Result<()>,
    {
        let mut state = Self::load(path)?;
        f(&mut state)?;
        state.save(path)?;
        Ok(state)
    }
}

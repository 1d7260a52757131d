//! Save file management for map snapshots.
//!
//! Each slot is a binary snapshot (`<slot>.emap`) plus a small JSON
//! metadata file (`<slot>.meta`) for listing. Writes go to a temp file
//! first and are renamed into place.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use empire_common::SnapshotError;
use empire_world::MapSnapshot;

/// Errors that can occur during save operations.
#[derive(Debug, Error)]
pub enum SaveError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot encode/decode error.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Metadata encode/decode error.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Save slot not found.
    #[error("Save slot not found: {0}")]
    SlotNotFound(String),

    /// Invalid slot name.
    #[error("Invalid slot name: {0}")]
    InvalidSlotName(String),

    /// Atomic write failed.
    #[error("Atomic write failed: {0}")]
    AtomicWriteFailed(String),
}

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Metadata about a save slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotMetadata {
    /// Slot name.
    pub slot_name: String,
    /// Map width.
    pub width: u32,
    /// Map height.
    pub height: u32,
    /// Map seed.
    pub seed: u64,
    /// Game time at save.
    pub game_time: u64,
    /// Fraction of cells explored at save.
    pub explored_fraction: f64,
    /// Size of the snapshot file in bytes.
    pub bytes: usize,
}

/// Manages snapshot slots in a directory.
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Creates a save manager for a directory.
    #[must_use]
    pub fn new(save_dir: impl AsRef<Path>) -> Self {
        Self {
            save_dir: save_dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the save directory path.
    #[must_use]
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn slot_path(&self, slot_name: &str) -> PathBuf {
        self.save_dir.join(format!("{slot_name}.emap"))
    }

    fn metadata_path(&self, slot_name: &str) -> PathBuf {
        self.save_dir.join(format!("{slot_name}.meta"))
    }

    fn json_path(&self, slot_name: &str) -> PathBuf {
        self.save_dir.join(format!("{slot_name}.json"))
    }

    fn validate_slot_name(slot_name: &str) -> SaveResult<()> {
        if slot_name.is_empty() {
            return Err(SaveError::InvalidSlotName("Empty slot name".to_string()));
        }

        let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '.'];
        if let Some(c) = slot_name.chars().find(|c| invalid_chars.contains(c)) {
            return Err(SaveError::InvalidSlotName(format!(
                "Invalid character '{c}' in slot name"
            )));
        }
        Ok(())
    }

    /// Saves a snapshot to a slot.
    pub fn save(&self, slot_name: &str, snapshot: &MapSnapshot) -> SaveResult<SlotMetadata> {
        Self::validate_slot_name(slot_name)?;
        fs::create_dir_all(&self.save_dir)?;

        let bytes = snapshot.to_bytes()?;
        write_atomic(&self.slot_path(slot_name), &bytes)?;

        let summary = snapshot.map_data.fog.summary();
        let metadata = SlotMetadata {
            slot_name: slot_name.to_string(),
            width: snapshot.config.width,
            height: snapshot.config.height,
            seed: snapshot.config.seed,
            game_time: snapshot.map_data.game_time,
            explored_fraction: summary.explored_fraction(),
            bytes: bytes.len(),
        };
        let meta = serde_json::to_vec_pretty(&metadata).map_err(|e| SaveError::Metadata(e.to_string()))?;
        write_atomic(&self.metadata_path(slot_name), &meta)?;

        info!("Saved map to slot: {} ({} bytes)", slot_name, bytes.len());
        Ok(metadata)
    }

    /// Writes a pretty JSON copy of a snapshot next to the slot.
    pub fn export_json(&self, slot_name: &str, snapshot: &MapSnapshot) -> SaveResult<PathBuf> {
        Self::validate_slot_name(slot_name)?;
        fs::create_dir_all(&self.save_dir)?;

        let path = self.json_path(slot_name);
        write_atomic(&path, snapshot.to_json()?.as_bytes())?;
        debug!("Exported JSON snapshot to {}", path.display());
        Ok(path)
    }

    /// Loads a snapshot from a slot.
    pub fn load(&self, slot_name: &str) -> SaveResult<MapSnapshot> {
        Self::validate_slot_name(slot_name)?;

        let path = self.slot_path(slot_name);
        if !path.exists() {
            return Err(SaveError::SlotNotFound(slot_name.to_string()));
        }

        let bytes = fs::read(&path)?;
        let snapshot = MapSnapshot::from_bytes(&bytes)?;
        info!("Loaded map from slot: {}", slot_name);
        Ok(snapshot)
    }

    /// Returns true if a slot has a snapshot.
    #[must_use]
    pub fn slot_exists(&self, slot_name: &str) -> bool {
        Self::validate_slot_name(slot_name).is_ok() && self.slot_path(slot_name).exists()
    }

    /// Deletes a slot and its side files.
    pub fn delete_slot(&self, slot_name: &str) -> SaveResult<()> {
        Self::validate_slot_name(slot_name)?;

        let path = self.slot_path(slot_name);
        if !path.exists() {
            return Err(SaveError::SlotNotFound(slot_name.to_string()));
        }
        fs::remove_file(path)?;
        for side in [self.metadata_path(slot_name), self.json_path(slot_name)] {
            if side.exists() {
                fs::remove_file(side)?;
            }
        }

        info!("Deleted save slot: {}", slot_name);
        Ok(())
    }

    /// Lists metadata of every slot, sorted by name.
    pub fn list_slots(&self) -> SaveResult<Vec<SlotMetadata>> {
        if !self.save_dir.exists() {
            return Ok(Vec::new());
        }

        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("meta") {
                continue;
            }
            let reader = BufReader::new(File::open(&path)?);
            let metadata: SlotMetadata =
                serde_json::from_reader(reader).map_err(|e| SaveError::Metadata(e.to_string()))?;
            slots.push(metadata);
        }
        slots.sort_by(|a, b| a.slot_name.cmp(&b.slot_name));
        Ok(slots)
    }
}

/// Writes `data` to a temp file beside `path`, then renames it into place.
fn write_atomic(path: &Path, data: &[u8]) -> SaveResult<()> {
    let temp_path = path.with_extension("tmp");
    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(data)?;
        writer.flush()?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SaveError::AtomicWriteFailed(e.to_string())
    })
}

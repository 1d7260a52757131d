//! Map snapshots.
//!
//! [`MapSnapshot`] is the plain-data form of a [`MapSystem`]. It can be
//! written as JSON for inspection, or as a compact binary envelope:
//!
//! ```text
//! [u32 LE header length][bincode SnapshotHeader][lz4(bincode MapData)]
//! ```

use empire_common::{MagicBytes, SchemaVersion, SnapshotError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::exploration::FogOfWar;
use crate::generation::{GenerationReport, RiverPath};
use crate::grid::{check_grid, Grid};
use crate::locations::SpecialLocation;
use crate::map_system::{MapConfig, MapError, MapResult, MapSystem};
use crate::terrain::TerrainKind;

/// Result type for snapshot encoding.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Binary envelope header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHeader {
    /// Magic bytes for format identification
    pub magic: [u8; 4],
    /// Schema version
    pub version: SchemaVersion,
    /// Compression type (0 = none, 1 = lz4)
    pub compression: u8,
}

impl SnapshotHeader {
    /// Creates a header for the current schema.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            magic: MagicBytes::MAP.0,
            version: SchemaVersion::MAP_SNAPSHOT,
            compression: 1,
        }
    }

    /// Validates the header.
    pub fn validate(&self) -> SnapshotResult<()> {
        if self.magic != MagicBytes::MAP.0 {
            return Err(SnapshotError::InvalidFormat);
        }
        if !SchemaVersion::MAP_SNAPSHOT.can_read(&self.version) {
            return Err(SnapshotError::VersionMismatch {
                expected: SchemaVersion::MAP_SNAPSHOT.to_string(),
                actual: self.version.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a map holds besides its config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Terrain grid
    pub terrain: Grid<TerrainKind>,
    /// Exploration levels and last-seen memory
    pub fog: FogOfWar,
    /// Special locations
    pub locations: Vec<SpecialLocation>,
    /// Carved rivers
    pub rivers: Vec<RiverPath>,
    /// Current game time
    pub game_time: u64,
    /// Random stream state
    pub rng_state: u64,
    /// Generation counters
    pub report: GenerationReport,
}

/// Serializable form of a [`MapSystem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    /// Map configuration
    pub config: MapConfig,
    /// Map contents
    pub map_data: MapData,
}

impl MapSnapshot {
    /// Encodes the binary envelope.
    pub fn to_bytes(&self) -> SnapshotResult<Vec<u8>> {
        let header_bytes = bincode::serialize(&SnapshotHeader::new())
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))?;
        let body = bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))?;
        let compressed = lz4_flex::compress_prepend_size(&body);

        let mut result = Vec::with_capacity(4 + header_bytes.len() + compressed.len());
        result.extend_from_slice(&(header_bytes.len() as u32).to_le_bytes());
        result.extend_from_slice(&header_bytes);
        result.extend_from_slice(&compressed);

        debug!(
            raw = body.len(),
            compressed = compressed.len(),
            "Encoded map snapshot"
        );
        Ok(result)
    }

    /// Decodes the binary envelope.
    pub fn from_bytes(bytes: &[u8]) -> SnapshotResult<Self> {
        if bytes.len() < 4 {
            return Err(SnapshotError::DeserializationFailed("data too short".into()));
        }
        let header_len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let rest = &bytes[4..];
        if rest.len() < header_len {
            return Err(SnapshotError::DeserializationFailed("header length mismatch".into()));
        }
        let (header_bytes, body) = rest.split_at(header_len);

        let header: SnapshotHeader =
            bincode::deserialize(header_bytes).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        header.validate()?;

        let raw = match header.compression {
            0 => body.to_vec(),
            1 => lz4_flex::decompress_size_prepended(body)
                .map_err(|e| SnapshotError::CompressionFailed(e.to_string()))?,
            other => {
                return Err(SnapshotError::DeserializationFailed(format!(
                    "unknown compression type {other}"
                )))
            },
        };
        bincode::deserialize(&raw).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    /// Encodes as pretty-printed JSON.
    pub fn to_json(&self) -> SnapshotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decodes from JSON.
    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    /// Checks that every grid matches the configured dimensions.
    pub fn validate(&self) -> SnapshotResult<()> {
        self.config.validate()?;
        let size = self.config.size();
        check_grid("terrain", &self.map_data.terrain, size)?;
        self.map_data.fog.check_size(size)
    }
}

impl MapSystem {
    /// Captures the full map state.
    #[must_use]
    pub fn serialize(&self) -> MapSnapshot {
        MapSnapshot {
            config: self.config,
            map_data: MapData {
                terrain: self.terrain.clone(),
                fog: self.fog.clone(),
                locations: self.locations.clone(),
                rivers: self.rivers.clone(),
                game_time: self.game_time,
                rng_state: self.rng.get_seed(),
                report: self.report,
            },
        }
    }

    /// Restores a map from a snapshot.
    ///
    /// Fails when the config is invalid or a grid disagrees with it.
    pub fn deserialize(snapshot: MapSnapshot) -> MapResult<Self> {
        snapshot.validate().map_err(MapError::Snapshot)?;
        let MapSnapshot { config, map_data } = snapshot;

        let mut map = Self {
            config,
            terrain: map_data.terrain,
            fog: map_data.fog,
            locations: map_data.locations,
            rivers: map_data.rivers,
            report: map_data.report,
            game_time: map_data.game_time,
            rng: fastrand::Rng::with_seed(map_data.rng_state),
            location_cells: Default::default(),
        };
        map.index_locations();
        Ok(map)
    }
}

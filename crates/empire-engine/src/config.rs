//! Session configuration.
//!
//! Map size, scouting behaviour, memory decay and save location. Loaded
//! from `empire.toml`; missing or broken files fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use empire_world::{MapConfig, MemoryDecay};

/// Configuration file name.
pub const CONFIG_FILE: &str = "empire.toml";

/// Session configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Map Settings ===
    /// Map width in cells
    pub map_width: u32,
    /// Map height in cells
    pub map_height: u32,
    /// Map seed (None = random)
    pub map_seed: Option<u64>,

    // === Scouting Settings ===
    /// Scout sight radius in cells
    pub scout_radius: f64,
    /// Number of scouting steps
    pub scout_steps: u32,
    /// Game ticks that pass per step
    pub ticks_per_step: u64,

    // === Memory Settings ===
    /// Base chance that stale partial memory fades
    pub decay_rate: f64,
    /// Ticks before partial memory starts to fade
    pub decay_threshold: u64,

    // === Save Settings ===
    /// Directory for save files
    pub save_dir: PathBuf,
    /// Slot name for the session save
    pub save_slot: String,
    /// Also write a JSON copy of the snapshot
    pub export_json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            map_width: 64,
            map_height: 48,
            map_seed: None,

            scout_radius: 4.0,
            scout_steps: 60,
            ticks_per_step: 25,

            decay_rate: 0.1,
            decay_threshold: 500,

            save_dir: PathBuf::from("saves"),
            save_slot: "session".to_string(),
            export_json: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        // Map
        self.map_width = self.map_width.clamp(8, 1024);
        self.map_height = self.map_height.clamp(8, 1024);

        // Scouting
        if !self.scout_radius.is_finite() {
            self.scout_radius = 4.0;
        }
        self.scout_radius = self.scout_radius.clamp(1.0, 32.0);
        self.scout_steps = self.scout_steps.clamp(1, 10_000);
        self.ticks_per_step = self.ticks_per_step.clamp(1, 10_000);

        // Memory
        if !self.decay_rate.is_finite() {
            self.decay_rate = 0.1;
        }
        self.decay_rate = self.decay_rate.clamp(0.0, 1.0);

        // Save
        if self.save_slot.is_empty() {
            self.save_slot = "session".to_string();
        }
    }

    /// Map config for this session, drawing a random seed when none is set.
    #[must_use]
    pub fn map_config(&self) -> MapConfig {
        match self.map_seed {
            Some(seed) => MapConfig::with_seed(self.map_width, self.map_height, seed),
            None => MapConfig::new(self.map_width, self.map_height),
        }
    }

    /// Memory decay parameters.
    #[must_use]
    pub fn memory_decay(&self) -> MemoryDecay {
        MemoryDecay::new(self.decay_rate, self.decay_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.map_width, 64);
        assert_eq!(config.map_height, 48);
        assert_eq!(config.map_seed, None);
        assert_eq!(config.memory_decay(), MemoryDecay::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();

        config.map_width = 0;
        config.map_height = 5000;
        config.scout_radius = f64::NAN;
        config.scout_steps = 0;
        config.decay_rate = 3.0;
        config.save_slot = String::new();

        config.validate();

        assert_eq!(config.map_width, 8);
        assert_eq!(config.map_height, 1024);
        assert!((config.scout_radius - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.scout_steps, 1);
        assert!((config.decay_rate - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.save_slot, "session");
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("empire.toml");

        let mut config = EngineConfig::default();
        config.map_width = 100;
        config.map_seed = Some(12345);
        config.export_json = true;

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("empire.toml");
        fs::write(&config_path, "map_width = 20\nmap_seed = 7\n").expect("write config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded.map_width, 20);
        assert_eq!(loaded.map_seed, Some(7));
        assert_eq!(loaded.map_height, 48);
        assert_eq!(loaded.map_config(), MapConfig::with_seed(20, 48, 7));
    }

    #[test]
    fn test_config_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("empire.toml");
        fs::write(&config_path, "map_width = \"wide\"").expect("write config");

        assert_eq!(EngineConfig::load_from(&config_path), EngineConfig::default());
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/empire.toml");
        assert_eq!(config.map_width, 64);
    }
}

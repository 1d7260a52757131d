//! Scripted scouting session.
//!
//! A scout sweeps the map in lanes. Every step reveals the area around it,
//! lets old memory fade, and cashes in any location close enough to be fully
//! discovered. At the end the map is saved and reloaded to check the round
//! trip.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use empire_common::{GridCoord, GridSize};
use empire_world::{MapSystem, ResourceKind, Reward};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::save_manager::SaveManager;

/// Totals collected over a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    /// Steps taken
    pub steps: u32,
    /// Final game time
    pub game_time: u64,
    /// Locations discovered
    pub discovered: usize,
    /// Locations interacted with
    pub interactions: usize,
    /// Resources granted, by kind
    pub resources: BTreeMap<ResourceKind, u64>,
    /// Technology points granted
    pub tech_points: u64,
    /// Artifact names found
    pub artifacts: Vec<String>,
    /// Other rewards (offers, bonuses)
    pub other_rewards: usize,
    /// Cells forgotten by memory decay
    pub forgotten_cells: usize,
    /// Fraction of the map explored at the end
    pub explored_fraction: f64,
}

impl SessionSummary {
    fn record(&mut self, reward: &Reward) {
        match reward {
            Reward::Resource { resource, amount } => {
                *self.resources.entry(*resource).or_default() += u64::from(*amount);
            },
            Reward::TechPoints(points) => self.tech_points += u64::from(*points),
            Reward::Artifact(artifact) => self.artifacts.push(artifact.name.clone()),
            _ => self.other_rewards += 1,
        }
    }
}

/// Position of the scout at a step: a back-and-forth sweep in lanes.
#[must_use]
pub fn scout_position(size: GridSize, radius: f64, step: u32) -> GridCoord {
    let lane = (radius.ceil() as i32).max(1);
    let columns = (size.width as i32 / lane).max(1);
    let rows = (size.height as i32 / (2 * lane)).max(1);

    let step = step as i32;
    let row = (step / columns) % rows;
    let column = step % columns;
    let lane_column = if row % 2 == 0 { column } else { columns - 1 - column };
    let x = lane_column * lane;
    let y = row * 2 * lane + lane;
    size.clamp(GridCoord::new(x, y))
}

/// Runs a full session: generate, scout, save, reload.
pub fn run(config: &EngineConfig) -> Result<SessionSummary> {
    let mut map = MapSystem::new(config.map_config()).context("failed to generate map")?;
    let summary = scout(&mut map, config);

    let saves = SaveManager::new(&config.save_dir);
    let snapshot = map.serialize();
    saves
        .save(&config.save_slot, &snapshot)
        .with_context(|| format!("failed to save slot {}", config.save_slot))?;
    if config.export_json {
        saves.export_json(&config.save_slot, &snapshot)?;
    }

    let restored = MapSystem::deserialize(saves.load(&config.save_slot)?).context("failed to restore map")?;
    if restored.serialize() != snapshot {
        bail!("reloaded map differs from the saved one");
    }
    info!(slot = %config.save_slot, "Save round trip verified");

    Ok(summary)
}

/// Moves the scout for the configured number of steps.
pub fn scout(map: &mut MapSystem, config: &EngineConfig) -> SessionSummary {
    let decay = config.memory_decay();
    let mut summary = SessionSummary::default();

    for step in 0..config.scout_steps {
        let now = u64::from(step + 1) * config.ticks_per_step;
        let at = scout_position(map.size(), config.scout_radius, step);

        let seen = map.explore_area(at.x, at.y, config.scout_radius, Some(now));
        let forgotten = map.update_exploration_memory(now, decay);
        summary.forgotten_cells += forgotten;
        debug!(step, x = at.x, y = at.y, seen, forgotten, "Scout moved");

        let ready: Vec<_> = map
            .discovered_locations()
            .filter(|loc| loc.fully_discovered && !loc.interacted)
            .map(|loc| loc.id)
            .collect();
        for id in ready {
            // Ids come straight from the map, so the only failure is a repeat.
            let Ok(outcome) = map.interact_with_location(id) else {
                continue;
            };
            info!(
                location = %outcome.location,
                kind = ?outcome.kind,
                rewards = outcome.rewards.len(),
                bonus = outcome.discovery_bonus_applied,
                "Explored special location"
            );
            for reward in &outcome.rewards {
                summary.record(reward);
            }
            summary.interactions += 1;
        }

        summary.steps = step + 1;
        summary.game_time = now;
    }

    summary.discovered = map.discovered_locations().count();
    summary.explored_fraction = map.exploration_summary().explored_fraction();
    summary
}

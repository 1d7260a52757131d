//! # Empire
//!
//! Runs a scripted scouting session over a generated map.
//!
//! Usage: `empire [config.toml]` (defaults to `empire.toml` in the working
//! directory). Log levels follow `RUST_LOG`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use empire_engine::config::{EngineConfig, CONFIG_FILE};
use empire_engine::session;

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("empire=info".parse()?))
        .init();

    info!("Empire map session starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let mut config = EngineConfig::load_from(&config_path);
    config.validate();

    let summary = session::run(&config)?;

    info!(
        steps = summary.steps,
        game_time = summary.game_time,
        discovered = summary.discovered,
        interactions = summary.interactions,
        tech_points = summary.tech_points,
        artifacts = summary.artifacts.len(),
        forgotten = summary.forgotten_cells,
        "Session finished, {:.1}% explored",
        summary.explored_fraction * 100.0
    );
    for (resource, amount) in &summary.resources {
        info!("  {resource}: {amount}");
    }

    Ok(())
}

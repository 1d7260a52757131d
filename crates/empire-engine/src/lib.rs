//! Empire engine: configuration, save slots and the scouting session
//! driven by the `empire` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod save_manager;
pub mod session;

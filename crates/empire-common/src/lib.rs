//! # Empire Common
//!
//! Common types, utilities, and shared abstractions for the Empire map core.
//!
//! This crate provides foundational types used across all Empire crates:
//! - Grid coordinate and size types
//! - ID types (LocationId)
//! - Version information for snapshot schemas
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::version::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_conversion() {
        let size = GridSize::new(32, 16);
        let coord = GridCoord::new(4, 8);
        let index = size.index_of(coord).expect("in bounds");

        assert_eq!(index, 8 * 32 + 4);
        assert_eq!(size.coord_of(index), coord);
    }

    #[test]
    fn test_location_id_display() {
        let id = LocationId::new(7);
        assert_eq!(id.to_string(), "loc_7");
        assert_eq!("loc_7".parse::<LocationId>().ok(), Some(id));
    }
}

//! Snapshot format identification.
//!
//! A snapshot header carries [`MagicBytes::MAP`] and the [`SchemaVersion`]
//! it was written with. Readers accept any snapshot with the same major
//! version; minor and patch bumps only add optional data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot schema version (`major.minor.patch`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Bumped when old readers can no longer decode the data
    pub major: u16,
    /// Bumped when fields are added with defaults
    pub minor: u16,
    /// Bumped for fixes that keep the layout
    pub patch: u16,
}

impl SchemaVersion {
    /// Version written by this build.
    pub const MAP_SNAPSHOT: Self = Self::new(1, 0, 0);

    /// Creates a schema version.
    #[must_use]
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self { major, minor, patch }
    }

    /// Whether a reader at this version can decode data written at `written`.
    #[must_use]
    pub const fn can_read(&self, written: &Self) -> bool {
        self.major == written.major
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Four-byte tag at the start of a snapshot header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicBytes(pub [u8; 4]);

impl MagicBytes {
    /// Map snapshot tag.
    pub const MAP: Self = Self(*b"EMAP");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_same_major_only() {
        let current = SchemaVersion::MAP_SNAPSHOT;
        assert!(current.can_read(&SchemaVersion::new(1, 4, 2)));
        assert!(!current.can_read(&SchemaVersion::new(2, 0, 0)));
        assert!(!current.can_read(&SchemaVersion::new(0, 9, 0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(SchemaVersion::new(1, 2, 3).to_string(), "1.2.3");
    }
}

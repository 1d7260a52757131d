//! ID types for map entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix used by the string form of a [`LocationId`].
const LOCATION_PREFIX: &str = "loc_";

/// Unique identifier for a special location on a map.
///
/// Ids are assigned sequentially at generation time and are stable across
/// snapshots. The string form is `loc_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(u32);

impl LocationId {
    /// Creates a location ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LOCATION_PREFIX}{}", self.0)
    }
}

/// Error returned when parsing a malformed location id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location id: {0:?}")]
pub struct ParseLocationIdError(pub String);

impl FromStr for LocationId {
    type Err = ParseLocationIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(LOCATION_PREFIX)
            .and_then(|raw| raw.parse().ok())
            .map(Self)
            .ok_or_else(|| ParseLocationIdError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("7".parse::<LocationId>().is_err());
        assert!("loc_".parse::<LocationId>().is_err());
        assert!("loc_x1".parse::<LocationId>().is_err());
        assert_eq!("loc_42".parse::<LocationId>(), Ok(LocationId::new(42)));
    }
}

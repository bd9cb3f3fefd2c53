//! Strongly-typed schema version number.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one schema state.
///
/// Either a sequential counter (`1`, `2`, ...) or a UTC timestamp such as
/// `20240115093000`. Versions are totally ordered and always positive; `0`
/// is reserved for "nothing applied" and is never a valid script version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// The lowest valid version.
    pub const FIRST: Version = Version(1);

    /// Create a version, returning `None` for zero.
    pub fn new(value: u64) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Return the raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Value as stored in a signed `BIGINT` column.
    ///
    /// Returns `None` for versions above `i64::MAX`, which cannot be stored.
    pub fn to_i64(self) -> Option<i64> {
        i64::try_from(self.0).ok()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidVersion {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let n: u64 = trimmed.parse().map_err(|_| invalid())?;
        Version::new(n).ok_or_else(invalid)
    }
}

impl TryFrom<i64> for Version {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .ok()
            .and_then(Version::new)
            .ok_or_else(|| CoreError::InvalidVersion {
                value: value.to_string(),
            })
    }
}

/// Render an optional version the way the CLI and logs show it.
pub fn display_version(version: Option<Version>) -> String {
    match version {
        Some(v) => v.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;

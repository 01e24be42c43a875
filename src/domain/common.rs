use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque record identifier. Seeded records use small numeric ids; new ones
/// come from the store's allocator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of sequence-allocated ids; `None` for UUIDs and other
    /// free-form ids.
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &RecordId;
}

/// Records that belong to exactly one farm.
pub trait FarmScoped {
    fn farm_id(&self) -> &RecordId;
}

/// Raised when free text does not name a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{value}` is not a valid {what}")]
pub struct ParseEnumError {
    pub what: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.trim().to_string(),
        }
    }
}

/// Implements `Display`, `FromStr` and an `ALL` table for label-backed enums.
macro_rules! labelled_enum {
    ($name:ident, $what:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::common::ParseEnumError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let needle = raw.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.label().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| $crate::domain::common::ParseEnumError::new($what, raw))
            }
        }
    };
}

pub(crate) use labelled_enum;

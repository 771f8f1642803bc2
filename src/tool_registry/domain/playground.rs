//! Playground server selection.
//!
//! The selection is recorded for display and reported back to callers. No
//! registry operation consults it.

use super::ParsePlaygroundServerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playground server a tool is exercised against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaygroundServer {
    /// First playground server.
    #[default]
    #[serde(rename = "playground-1")]
    Playground1,
    /// Second playground server.
    #[serde(rename = "playground-2")]
    Playground2,
}

impl PlaygroundServer {
    /// All selectable servers in display order.
    pub const ALL: [Self; 2] = [Self::Playground1, Self::Playground2];

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playground1 => "playground-1",
            Self::Playground2 => "playground-2",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Playground1 => "Playground 1",
            Self::Playground2 => "Playground 2",
        }
    }
}

impl fmt::Display for PlaygroundServer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PlaygroundServer {
    type Error = ParsePlaygroundServerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "playground-1" => Ok(Self::Playground1),
            "playground-2" => Ok(Self::Playground2),
            _ => Err(ParsePlaygroundServerError(value.to_owned())),
        }
    }
}

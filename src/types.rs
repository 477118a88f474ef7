/// Shared types used across the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Schema flavour of the institution behind the connector.
///
/// Both flavours hold the same academic data but name tables and columns
/// differently, so every service picks its SQL by mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceMode {
    #[default]
    Misca,
    Smart,
}

impl InstanceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceMode::Misca => "misca",
            InstanceMode::Smart => "smart",
        }
    }

    pub fn is_smart(&self) -> bool {
        matches!(self, InstanceMode::Smart)
    }
}

impl FromStr for InstanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "misca" => Ok(InstanceMode::Misca),
            "smart" => Ok(InstanceMode::Smart),
            other => Err(format!("unknown instance mode: {}", other)),
        }
    }
}

impl fmt::Display for InstanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// What to write in place of a placeholder whose variable is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Write the literal text `undefined`. This matches the historical
    /// build script byte for byte.
    #[default]
    Undefined,
    /// Write an empty string.
    Empty,
    /// Leave the placeholder in the file.
    Keep,
    /// Fail before anything is written.
    Error,
}

impl MissingPolicy {
    pub const ALL: [MissingPolicy; 4] = [Self::Undefined, Self::Empty, Self::Keep, Self::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Empty => "empty",
            Self::Keep => "keep",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
                format!("unknown missing-variable policy '{s}' (expected one of: {})", valid.join(", "))
            })
    }
}

//! Project visibility enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who may read a project besides its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the owner can read or write.
    Private,
    /// Anyone can read; only the owner can write.
    Public,
}

impl Visibility {
    /// Check whether this visibility allows reads by non-owners.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    /// Return the visibility as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Private
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = codehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            _ => Err(codehub_core::AppError::validation(format!(
                "Invalid visibility: '{s}'. Expected one of: private, public"
            ))),
        }
    }
}

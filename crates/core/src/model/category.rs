use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Time-of-day partition of the azkar catalog.
///
/// Every item belongs to exactly one category. Which category the user is
/// looking at is transient navigation state and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Morning,
    Evening,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Morning, Category::Evening];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Morning => "morning",
            Category::Evening => "evening",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "morning" => Ok(Category::Morning),
            "evening" => Ok(Category::Evening),
            other => Err(ParseCategoryError(other.to_owned())),
        }
    }
}

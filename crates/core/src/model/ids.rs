use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an azkar item.
///
/// Ids are assigned statically in the catalog and are unique across the
/// combined morning and evening sets. The decimal string form doubles as
/// the key of the persisted progress object, so `Display` and `FromStr`
/// must round-trip exactly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new `ItemId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an `ItemId` from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError;

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse ItemId from string")
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for ItemId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(ItemId::new).map_err(|_| ParseIdError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_display() {
        let id = ItemId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_item_id_from_str() {
        let id: ItemId = "123".parse().unwrap();
        assert_eq!(id, ItemId::new(123));
    }

    #[test]
    fn test_item_id_from_str_invalid() {
        let result = "not-a-number".parse::<ItemId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_id_roundtrip() {
        let original = ItemId::new(42);
        let serialized = original.to_string();
        let deserialized: ItemId = serialized.parse().unwrap();
        assert_eq!(original, deserialized);
    }
}

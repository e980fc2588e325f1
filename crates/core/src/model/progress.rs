use std::collections::HashMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::Catalog;
use crate::model::ids::ItemId;
use crate::model::item::AzkarItem;

/// Per-item remaining repeat counts for the current session.
///
/// An id that is absent from the map has not been started: its effective
/// remaining count is the item's `initial`. This is a load-bearing
/// convention, not an omission — a fresh session and a reset session are
/// both simply the empty map. Counts only ever move downward; the sole way
/// back up is [`ProgressMap::clear`].
///
/// The serialized form is a JSON object keyed by the decimal string form
/// of each id (`{"3": 1, "20": 97}`), matching the payload the mobile app
/// has always stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressMap {
    remaining: HashMap<ItemId, u32>,
}

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Raw stored count for `id`, if an entry exists.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<u32> {
        self.remaining.get(&id).copied()
    }

    /// Insert an explicit entry.
    ///
    /// Exists for repositories and tests building maps directly; session
    /// mutation goes through [`ProgressMap::decrement`].
    pub fn insert(&mut self, id: ItemId, remaining: u32) {
        self.remaining.insert(id, remaining);
    }

    /// Effective remaining count for `item` (absence means `initial`).
    #[must_use]
    pub fn remaining_for(&self, item: &AzkarItem) -> u32 {
        self.remaining
            .get(&item.id())
            .copied()
            .unwrap_or_else(|| item.initial())
    }

    #[must_use]
    pub fn is_completed(&self, item: &AzkarItem) -> bool {
        self.remaining_for(item) == 0
    }

    /// Record one recitation of `item` and return the new remaining count.
    ///
    /// An already-completed item stays at zero and the map is not touched.
    pub fn decrement(&mut self, item: &AzkarItem) -> u32 {
        let current = self.remaining_for(item);
        if current == 0 {
            return 0;
        }

        let next = current - 1;
        self.remaining.insert(item.id(), next);
        next
    }

    /// Return every item to the not-yet-started state.
    pub fn clear(&mut self) {
        self.remaining.clear();
    }

    /// Drop entries for ids the catalog does not know and clamp stored
    /// values into `[0, initial]`.
    ///
    /// Stored payloads are overwrite-only JSON; a stale or hand-edited
    /// payload must not be able to violate the remaining-count invariant.
    #[must_use]
    pub fn clamp_to(mut self, catalog: &Catalog) -> Self {
        self.remaining.retain(|id, remaining| {
            catalog.get(*id).is_some_and(|item| {
                *remaining = (*remaining).min(item.initial());
                true
            })
        });
        self
    }

    /// Fraction of `items` that are completed, in `[0, 1]`.
    ///
    /// Defined as 0 for an empty slice so callers never divide by zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completed_fraction(&self, items: &[AzkarItem]) -> f32 {
        if items.is_empty() {
            return 0.0;
        }

        let completed = items.iter().filter(|item| self.is_completed(item)).count();
        completed as f32 / items.len() as f32
    }
}

impl Serialize for ProgressMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.remaining.len()))?;
        for (id, remaining) in &self.remaining {
            map.serialize_entry(&id.to_string(), remaining)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProgressMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ProgressMapVisitor;

        impl<'de> Visitor<'de> for ProgressMapVisitor {
            type Value = ProgressMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of item ids to remaining counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut remaining = HashMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, u32>()? {
                    let id = key.parse::<ItemId>().map_err(de::Error::custom)?;
                    remaining.insert(id, value);
                }
                Ok(ProgressMap { remaining })
            }
        }

        deserializer.deserialize_map(ProgressMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_item(id: u32, initial: u32) -> AzkarItem {
        AzkarItem::new(ItemId::new(id), format!("ذكر {id}"), initial).unwrap()
    }

    #[test]
    fn absent_entry_reads_as_initial() {
        let map = ProgressMap::new();
        let item = build_item(1, 3);

        assert_eq!(map.remaining_for(&item), 3);
        assert!(!map.is_completed(&item));
    }

    #[test]
    fn explicit_initial_entry_is_equivalent_to_absence() {
        let item = build_item(1, 3);
        let absent = ProgressMap::new();
        let mut explicit = ProgressMap::new();
        explicit.insert(item.id(), item.initial());

        assert_eq!(explicit.remaining_for(&item), absent.remaining_for(&item));
        assert_eq!(explicit.is_completed(&item), absent.is_completed(&item));
        assert_eq!(
            explicit.completed_fraction(std::slice::from_ref(&item)),
            absent.completed_fraction(std::slice::from_ref(&item)),
        );
    }

    #[test]
    fn decrement_counts_down_and_stops_at_zero() {
        let item = build_item(1, 3);
        let mut map = ProgressMap::new();

        assert_eq!(map.decrement(&item), 2);
        assert_eq!(map.decrement(&item), 1);
        assert_eq!(map.decrement(&item), 0);
        assert!(map.is_completed(&item));

        // Fourth recitation is a no-op and must not wrap.
        let before = map.clone();
        assert_eq!(map.decrement(&item), 0);
        assert_eq!(map, before);
    }

    #[test]
    fn clear_returns_items_to_initial() {
        let item = build_item(1, 3);
        let mut map = ProgressMap::new();
        map.decrement(&item);
        map.decrement(&item);

        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.remaining_for(&item), 3);
    }

    #[test]
    fn completed_fraction_counts_completed_items() {
        let done = build_item(1, 2);
        let pending = build_item(2, 5);
        let mut map = ProgressMap::new();
        map.insert(done.id(), 0);

        let items = vec![done, pending];
        assert!((map.completed_fraction(&items) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn completed_fraction_of_no_items_is_zero() {
        let map = ProgressMap::new();
        assert_eq!(map.completed_fraction(&[]), 0.0);
    }

    #[test]
    fn clamp_drops_unknown_ids_and_oversized_counts() {
        let item = build_item(1, 3);
        let catalog = Catalog::new(vec![item.clone()], Vec::new()).unwrap();

        let mut map = ProgressMap::new();
        map.insert(item.id(), 999);
        map.insert(ItemId::new(77), 5);

        let clamped = map.clamp_to(&catalog);
        assert_eq!(clamped.get(item.id()), Some(3));
        assert_eq!(clamped.get(ItemId::new(77)), None);
        assert_eq!(clamped.len(), 1);
    }

    #[test]
    fn serde_roundtrip_preserves_entries() {
        let mut map = ProgressMap::new();
        map.insert(ItemId::new(3), 1);
        map.insert(ItemId::new(20), 97);

        let json = serde_json::to_string(&map).unwrap();
        let restored: ProgressMap = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, map);
    }

    #[test]
    fn serde_uses_string_keys() {
        let mut map = ProgressMap::new();
        map.insert(ItemId::new(12), 4);

        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"12":4}"#);
    }

    #[test]
    fn serde_rejects_non_numeric_keys() {
        assert!(serde_json::from_str::<ProgressMap>(r#"{"abc":1}"#).is_err());
    }

    #[test]
    fn serde_rejects_non_object_payloads() {
        assert!(serde_json::from_str::<ProgressMap>("[1,2,3]").is_err());
        assert!(serde_json::from_str::<ProgressMap>(r#""oops""#).is_err());
    }
}

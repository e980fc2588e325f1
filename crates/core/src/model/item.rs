use thiserror::Error;

use crate::model::ids::ItemId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    #[error("item text cannot be empty")]
    EmptyText,

    #[error("initial repeat count must be > 0")]
    ZeroInitial,
}

/// A fixed recitation text with its prescribed repeat count.
///
/// Items are defined statically in the catalog and never created or edited
/// by the user; `initial` is the count an unstarted recitation begins at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzkarItem {
    id: ItemId,
    text: String,
    initial: u32,
}

impl AzkarItem {
    /// Creates a new item.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::EmptyText` if the text is empty or
    /// whitespace-only, or `ItemError::ZeroInitial` if the repeat count
    /// is zero.
    pub fn new(id: ItemId, text: impl Into<String>, initial: u32) -> Result<Self, ItemError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ItemError::EmptyText);
        }
        if initial == 0 {
            return Err(ItemError::ZeroInitial);
        }

        Ok(Self {
            id,
            text: text.trim().to_owned(),
            initial,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn initial(&self) -> u32 {
        self.initial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_new_rejects_empty_text() {
        let err = AzkarItem::new(ItemId::new(1), "   ", 3).unwrap_err();
        assert_eq!(err, ItemError::EmptyText);
    }

    #[test]
    fn item_new_rejects_zero_initial() {
        let err = AzkarItem::new(ItemId::new(1), "text", 0).unwrap_err();
        assert_eq!(err, ItemError::ZeroInitial);
    }

    #[test]
    fn item_new_happy_path() {
        let item = AzkarItem::new(ItemId::new(12), "  سُبْحَانَ اللَّهِ  ", 7).unwrap();
        assert_eq!(item.id(), ItemId::new(12));
        assert_eq!(item.text(), "سُبْحَانَ اللَّهِ");
        assert_eq!(item.initial(), 7);
    }
}

//! Tag-based selection predicate composed into queue queries.

use std::collections::BTreeSet;

/// Row id of a tag in the tag table.
pub type TagId = u64;

/// Resolved active/inactive tag sets.
///
/// A card is eligible iff the active set is empty or the card carries at
/// least one active tag, and the card carries no inactive tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub active: BTreeSet<TagId>,
    pub inactive: BTreeSet<TagId>,
}

impl TagFilter {
    pub fn new(active: BTreeSet<TagId>, inactive: BTreeSet<TagId>) -> TagFilter {
        TagFilter { active, inactive }
    }

    /// A filter that admits every card.
    pub fn unrestricted() -> TagFilter {
        TagFilter::default()
    }

    /// Whether a card with the given tag ids passes the filter.
    pub fn admits(&self, card_tags: &BTreeSet<TagId>) -> bool {
        if !self.active.is_empty() && self.active.is_disjoint(card_tags) {
            return false;
        }
        self.inactive.is_disjoint(card_tags)
    }
}

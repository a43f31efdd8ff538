//! Storage abstraction required by the scheduler.

use std::collections::BTreeSet;

use uuid::Uuid;

use srs_domain::{Card, Fact, ReviewLogEntry};

use crate::errors::StoreResult;
use crate::filter::{TagFilter, TagId};
use crate::ordering::{NewOrder, ReviewOrder};

/// A learning-queue row: exact due time and card id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LearnEntry {
    pub due: i64,
    pub card_id: Uuid,
}

/// A review/new batch row. The fact id travels with the card id so the
/// scheduler can drop spaced siblings without a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    pub card_id: Uuid,
    pub fact_id: Uuid,
}

/// The persistence operations the scheduler consumes.
///
/// Implementations backed by a database must make every write performed
/// during a single answer visible atomically: the scheduler treats one
/// answer as one transaction. The scheduler itself is single-threaded and
/// never shares a store across threads.
pub trait DeckStore {
    fn card(&self, id: Uuid) -> StoreResult<Option<Card>>;
    fn save_card(&mut self, card: &Card) -> StoreResult<()>;

    /// Learning rows with `queue = Learn` and `due < cutoff`, ascending by
    /// due, at most `limit`. The learning queue is never tag-filtered.
    fn learn_queue(&self, cutoff: i64, limit: usize) -> StoreResult<Vec<LearnEntry>>;

    /// Count of review cards due before the cutoff under the filter.
    fn review_count(&self, cutoff: i64, filter: &TagFilter) -> StoreResult<usize>;
    /// Count of review cards due on a later day (review-early selection).
    fn review_count_ahead(&self, cutoff: i64, filter: &TagFilter) -> StoreResult<usize>;
    /// Ordered batch of review cards due before the cutoff, at most
    /// `limit`, skipping facts in `exclude_facts`.
    fn review_queue(
        &self,
        order: ReviewOrder,
        cutoff: i64,
        limit: usize,
        filter: &TagFilter,
        exclude_facts: &BTreeSet<Uuid>,
    ) -> StoreResult<Vec<QueueEntry>>;
    /// Batch of not-yet-due review cards ordered by due ascending
    /// (review-early selection).
    fn review_queue_ahead(
        &self,
        cutoff: i64,
        limit: usize,
        filter: &TagFilter,
        exclude_facts: &BTreeSet<Uuid>,
    ) -> StoreResult<Vec<QueueEntry>>;

    /// Count of new cards due before the cutoff under the filter.
    fn new_count(&self, cutoff: i64, filter: &TagFilter) -> StoreResult<usize>;
    /// Ordered batch of new cards due before the cutoff.
    fn new_queue(
        &self,
        order: NewOrder,
        cutoff: i64,
        limit: usize,
        filter: &TagFilter,
        exclude_facts: &BTreeSet<Uuid>,
    ) -> StoreResult<Vec<QueueEntry>>;

    /// Defer every other still-due review/new card of the fact: review
    /// siblings move `interval * rev_spacing` whole days (nothing below
    /// one day), new siblings move to `new_due`; both are marked modified.
    /// Returns how many review siblings were pushed past the cutoff, so
    /// the caller can keep its counters conserved.
    fn space_siblings(
        &mut self,
        card_id: Uuid,
        fact_id: Uuid,
        now: i64,
        cutoff: i64,
        new_due: i64,
        rev_spacing: f64,
    ) -> StoreResult<usize>;

    /// The JSON config blob stored for a model, if any.
    fn model_config_json(&self, model_id: Uuid) -> StoreResult<Option<String>>;

    fn fact(&self, id: Uuid) -> StoreResult<Option<Fact>>;
    /// Upsert a fact and re-sync the tag links of its cards.
    fn save_fact(&mut self, fact: &Fact) -> StoreResult<()>;
    /// Resolve tag names to ids; unknown names resolve to nothing.
    fn tag_ids(&self, names: &[String]) -> StoreResult<Vec<TagId>>;

    /// Move a card to the suspended queue.
    fn suspend_card(&mut self, id: Uuid) -> StoreResult<()>;
    /// Put session-buried cards back in their home queues. A legacy store
    /// may report `SchemaOutOfDate`, which startup logs and ignores.
    fn restore_buried(&mut self) -> StoreResult<()>;

    fn append_review_log(&mut self, entry: &ReviewLogEntry) -> StoreResult<()>;
    /// Number of answers logged at or after `since`.
    fn review_count_since(&self, since: i64) -> StoreResult<usize>;
    /// Number of logged answers taken from the new queue at or after
    /// `since` (first exposures).
    fn new_seen_since(&self, since: i64) -> StoreResult<usize>;
}

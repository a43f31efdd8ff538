use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use srs_domain::{Card, CardQueue, Fact, ModelConfig, ReviewLogEntry};

use crate::errors::StoreResult;
use crate::filter::{TagFilter, TagId};
use crate::ordering::{NewOrder, ReviewOrder, new_ordering, review_ordering};
use crate::store::{DeckStore, LearnEntry, QueueEntry};

/// Reference in-memory implementation of [`DeckStore`].
///
/// Backs the test suites and storage-free embedders. Tag links are derived
/// from each card's fact and kept in sync when facts are saved.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: BTreeMap<Uuid, Card>,
    facts: BTreeMap<Uuid, Fact>,
    models: BTreeMap<Uuid, String>,
    tags: BTreeMap<String, TagId>,
    next_tag_id: TagId,
    card_tags: BTreeMap<Uuid, BTreeSet<TagId>>,
    revlog: Vec<ReviewLogEntry>,
}

impl MemoryStore {
    /// Construct a new, empty store.
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Register a model's scheduling configuration.
    pub fn add_model(&mut self, id: Uuid, config: &ModelConfig) {
        self.models.insert(id, config.to_json());
    }

    /// Insert or replace a fact, interning its tags and re-linking the tag
    /// ids of any cards already attached to it.
    pub fn add_fact(&mut self, fact: Fact) {
        let fact_id = fact.id;
        for tag in fact.tag_list() {
            self.intern_tag(&tag);
        }
        self.facts.insert(fact_id, fact);
        self.sync_fact_links(fact_id);
    }

    /// Insert or replace a card, linking it to its fact's tags.
    pub fn add_card(&mut self, card: Card) {
        let id = card.id;
        let fact_id = card.fact_id;
        self.cards.insert(id, card);
        self.card_tags.insert(id, self.fact_tag_ids(fact_id));
    }

    /// Every answer logged so far, oldest first.
    pub fn review_log(&self) -> &[ReviewLogEntry] {
        &self.revlog
    }

    fn intern_tag(&mut self, name: &str) -> TagId {
        let key = name.to_ascii_lowercase();
        if let Some(&id) = self.tags.get(&key) {
            return id;
        }
        self.next_tag_id += 1;
        self.tags.insert(key, self.next_tag_id);
        self.next_tag_id
    }

    fn fact_tag_ids(&self, fact_id: Uuid) -> BTreeSet<TagId> {
        let Some(fact) = self.facts.get(&fact_id) else {
            return BTreeSet::new();
        };
        fact.tag_list()
            .iter()
            .filter_map(|tag| self.tags.get(&tag.to_ascii_lowercase()).copied())
            .collect()
    }

    fn sync_fact_links(&mut self, fact_id: Uuid) {
        let ids = self.fact_tag_ids(fact_id);
        let members: Vec<Uuid> = self
            .cards
            .values()
            .filter(|card| card.fact_id == fact_id)
            .map(|card| card.id)
            .collect();
        for card_id in members {
            self.card_tags.insert(card_id, ids.clone());
        }
    }

    fn admits(&self, card: &Card, filter: &TagFilter) -> bool {
        static EMPTY: BTreeSet<TagId> = BTreeSet::new();
        let tags = self.card_tags.get(&card.id).unwrap_or(&EMPTY);
        filter.admits(tags)
    }

    fn select_queue(
        &self,
        queue: CardQueue,
        below_cutoff: bool,
        cutoff: i64,
        filter: &TagFilter,
    ) -> Vec<&Card> {
        self.cards
            .values()
            .filter(|card| card.queue == queue)
            .filter(|card| {
                if below_cutoff {
                    card.due < cutoff
                } else {
                    card.due > cutoff
                }
            })
            .filter(|card| self.admits(card, filter))
            .collect()
    }

    fn batch(
        mut selected: Vec<&Card>,
        cmp: fn(&Card, &Card) -> std::cmp::Ordering,
        limit: usize,
        exclude_facts: &BTreeSet<Uuid>,
    ) -> Vec<QueueEntry> {
        selected.retain(|card| !exclude_facts.contains(&card.fact_id));
        selected.sort_by(|a, b| cmp(a, b));
        selected.truncate(limit);
        selected
            .into_iter()
            .map(|card| QueueEntry {
                card_id: card.id,
                fact_id: card.fact_id,
            })
            .collect()
    }
}

impl DeckStore for MemoryStore {
    fn card(&self, id: Uuid) -> StoreResult<Option<Card>> {
        Ok(self.cards.get(&id).cloned())
    }

    fn save_card(&mut self, card: &Card) -> StoreResult<()> {
        if !self.card_tags.contains_key(&card.id) {
            self.card_tags
                .insert(card.id, self.fact_tag_ids(card.fact_id));
        }
        self.cards.insert(card.id, card.clone());
        Ok(())
    }

    fn learn_queue(&self, cutoff: i64, limit: usize) -> StoreResult<Vec<LearnEntry>> {
        let mut rows: Vec<LearnEntry> = self
            .cards
            .values()
            .filter(|card| card.queue == CardQueue::Learn && card.due < cutoff)
            .map(|card| LearnEntry {
                due: card.due,
                card_id: card.id,
            })
            .collect();
        rows.sort();
        rows.truncate(limit);
        Ok(rows)
    }

    fn review_count(&self, cutoff: i64, filter: &TagFilter) -> StoreResult<usize> {
        Ok(self.select_queue(CardQueue::Review, true, cutoff, filter).len())
    }

    fn review_count_ahead(&self, cutoff: i64, filter: &TagFilter) -> StoreResult<usize> {
        Ok(self.select_queue(CardQueue::Review, false, cutoff, filter).len())
    }

    fn review_queue(
        &self,
        order: ReviewOrder,
        cutoff: i64,
        limit: usize,
        filter: &TagFilter,
        exclude_facts: &BTreeSet<Uuid>,
    ) -> StoreResult<Vec<QueueEntry>> {
        let selected = self.select_queue(CardQueue::Review, true, cutoff, filter);
        Ok(MemoryStore::batch(
            selected,
            review_ordering(order),
            limit,
            exclude_facts,
        ))
    }

    fn review_queue_ahead(
        &self,
        cutoff: i64,
        limit: usize,
        filter: &TagFilter,
        exclude_facts: &BTreeSet<Uuid>,
    ) -> StoreResult<Vec<QueueEntry>> {
        let selected = self.select_queue(CardQueue::Review, false, cutoff, filter);
        Ok(MemoryStore::batch(
            selected,
            review_ordering(ReviewOrder::Due),
            limit,
            exclude_facts,
        ))
    }

    fn new_count(&self, cutoff: i64, filter: &TagFilter) -> StoreResult<usize> {
        Ok(self.select_queue(CardQueue::New, true, cutoff, filter).len())
    }

    fn new_queue(
        &self,
        order: NewOrder,
        cutoff: i64,
        limit: usize,
        filter: &TagFilter,
        exclude_facts: &BTreeSet<Uuid>,
    ) -> StoreResult<Vec<QueueEntry>> {
        let selected = self.select_queue(CardQueue::New, true, cutoff, filter);
        Ok(MemoryStore::batch(
            selected,
            new_ordering(order),
            limit,
            exclude_facts,
        ))
    }

    fn space_siblings(
        &mut self,
        card_id: Uuid,
        fact_id: Uuid,
        now: i64,
        cutoff: i64,
        new_due: i64,
        rev_spacing: f64,
    ) -> StoreResult<usize> {
        let mut crossed = 0;
        for card in self.cards.values_mut() {
            if card.id == card_id || card.fact_id != fact_id || card.due >= cutoff {
                continue;
            }
            match card.queue {
                CardQueue::Review => {
                    let days = card.interval * rev_spacing;
                    let days = if days < 1.0 { 0.0 } else { days };
                    card.due += (86_400.0 * days) as i64;
                    if card.due >= cutoff {
                        crossed += 1;
                    }
                }
                CardQueue::New => card.due = new_due,
                _ => continue,
            }
            card.modified = now;
        }
        Ok(crossed)
    }

    fn model_config_json(&self, model_id: Uuid) -> StoreResult<Option<String>> {
        Ok(self.models.get(&model_id).cloned())
    }

    fn fact(&self, id: Uuid) -> StoreResult<Option<Fact>> {
        Ok(self.facts.get(&id).cloned())
    }

    fn save_fact(&mut self, fact: &Fact) -> StoreResult<()> {
        self.add_fact(fact.clone());
        Ok(())
    }

    fn tag_ids(&self, names: &[String]) -> StoreResult<Vec<TagId>> {
        Ok(names
            .iter()
            .filter_map(|name| self.tags.get(&name.to_ascii_lowercase()).copied())
            .collect())
    }

    fn suspend_card(&mut self, id: Uuid) -> StoreResult<()> {
        if let Some(card) = self.cards.get_mut(&id) {
            card.queue = CardQueue::Suspended;
        }
        Ok(())
    }

    fn restore_buried(&mut self) -> StoreResult<()> {
        for card in self.cards.values_mut() {
            if card.queue == CardQueue::SchedBuried {
                card.queue = card.ctype.home_queue();
            }
        }
        Ok(())
    }

    fn append_review_log(&mut self, entry: &ReviewLogEntry) -> StoreResult<()> {
        self.revlog.push(entry.clone());
        Ok(())
    }

    fn review_count_since(&self, since: i64) -> StoreResult<usize> {
        Ok(self.revlog.iter().filter(|entry| entry.time >= since).count())
    }

    fn new_seen_since(&self, since: i64) -> StoreResult<usize> {
        Ok(self
            .revlog
            .iter()
            .filter(|entry| entry.time >= since && entry.from_queue == CardQueue::New)
            .count())
    }
}

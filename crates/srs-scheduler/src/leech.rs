//! Leech detection: cards that keep lapsing get flagged, and optionally
//! suspended, so the learner can rework them.

use srs_domain::{Card, CardQueue, tags};
use srs_store::DeckStore;

use crate::errors::SchedulerError;
use crate::scheduler::Scheduler;

/// Tag added to a fact whose card became a leech.
pub(crate) const LEECH_TAG: &str = "Leech";

impl<S: DeckStore> Scheduler<S> {
    /// A card is a leech when it just lapsed, has reached the failure
    /// threshold, and is at a half-threshold multiple since then.
    pub(crate) fn is_leech(&self, card: &Card) -> bool {
        let threshold = i64::from(self.params.leech_fails);
        if threshold == 0 {
            return false;
        }
        let lapses = i64::from(card.lapses);
        card.successive == 0
            && lapses >= threshold
            && (threshold - lapses).rem_euclid((threshold / 2).max(1)) == 0
    }

    /// Tag the fact, optionally suspend the card, and rebuild counters.
    pub(crate) fn handle_leech(&mut self, card: &mut Card) -> Result<(), SchedulerError> {
        let now = self.clock.now();
        if let Some(mut fact) = self.store.fact(card.fact_id)? {
            fact.tags = tags::add_tag(&fact.tags, LEECH_TAG);
            fact.modified = now;
            self.store.save_fact(&fact)?;
        }
        if self.params.suspend_leeches {
            self.store.suspend_card(card.id)?;
            card.queue = CardQueue::Suspended;
        }
        // counters may have moved; a full reset makes them authoritative
        self.reset()
    }
}

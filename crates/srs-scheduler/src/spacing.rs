//! Sibling spacing: answering one card of a fact defers its siblings so
//! related material is not shown back to back.

use srs_domain::Card;
use srs_store::DeckStore;

use crate::errors::SchedulerError;
use crate::scheduler::Scheduler;

impl<S: DeckStore> Scheduler<S> {
    /// Defer every other still-due review/new card of the answered fact
    /// and drop them from the in-session batches.
    ///
    /// The fact is remembered in `spaced_facts` so queue refills skip it
    /// until the spacing window has passed.
    pub(crate) fn space_cards(&mut self, card: &Card, now: i64) -> Result<(), SchedulerError> {
        let new_due = now + self.params.new_spacing;
        let deferred_past_cutoff = self.store.space_siblings(
            card.id,
            card.fact_id,
            now,
            self.day_cutoff,
            new_due,
            self.params.rev_spacing,
        )?;
        self.rev_count = self.rev_count.saturating_sub(deferred_past_cutoff);
        self.spaced_facts.insert(card.fact_id, new_due);

        // siblings leave the in-session batches; refills skip the fact
        // until the spacing window passes
        let fact = card.fact_id;
        self.rev_queue.retain(|entry| entry.fact_id != fact);
        self.new_queue.retain(|entry| entry.fact_id != fact);
        Ok(())
    }
}

//! Observer hooks fired after each answer.

use uuid::Uuid;

use srs_domain::{Card, CardQueue, Ease, ReviewLogEntry};
use srs_store::DeckStore;

use crate::errors::SchedulerError;
use crate::scheduler::Scheduler;

/// Listener notified once per answered card, after persistence.
///
/// The notification is fire-and-forget; listeners receive ids only and
/// must not mutate the card.
pub trait ReviewObserver {
    fn card_answered(&mut self, card_id: Uuid, is_leech: bool);
}

/// Card values captured before an answer mutates them, for the review log.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AnswerSnapshot {
    pub interval: f64,
    pub factor: f64,
    pub due: i64,
}

impl AnswerSnapshot {
    pub(crate) fn of(card: &Card) -> AnswerSnapshot {
        AnswerSnapshot {
            interval: card.interval,
            factor: card.factor,
            due: card.due,
        }
    }
}

impl<S: DeckStore> Scheduler<S> {
    pub(crate) fn append_log(
        &mut self,
        card: &Card,
        ease: Ease,
        from_queue: CardQueue,
        snapshot: AnswerSnapshot,
        now: i64,
    ) -> Result<(), SchedulerError> {
        let entry = ReviewLogEntry {
            card_id: card.id,
            time: now,
            ease: ease.value(),
            flags: self.mode.review_log_flags(),
            from_queue,
            rep: card.reps,
            last_interval: snapshot.interval,
            interval: card.interval,
            last_factor: snapshot.factor,
            factor: card.factor,
            last_due: snapshot.due,
            due: card.due,
        };
        self.store.append_review_log(&entry)?;
        Ok(())
    }

    pub(crate) fn notify(&mut self, card_id: Uuid, is_leech: bool) {
        for observer in &mut self.observers {
            observer.card_answered(card_id, is_leech);
        }
    }
}

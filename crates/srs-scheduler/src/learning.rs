//! The learning-step state machine.
//!
//! Cards in the learning queue (and new cards on their first answer) walk
//! a ladder of short delays from their model's config: the `new` ladder
//! for unseen cards, the `lapse` ladder for everything relearning.
//! Finishing the ladder, or an early removal, graduates the card into the
//! review queue.

use srs_domain::{Card, CardQueue, CardType, Ease, EaseError, StepsConfig};
use srs_store::DeckStore;

use crate::errors::SchedulerError;
use crate::hooks::AnswerSnapshot;
use crate::scheduler::Scheduler;

impl<S: DeckStore> Scheduler<S> {
    pub(crate) fn answer_learn_card(
        &mut self,
        card: &mut Card,
        ease: Ease,
    ) -> Result<(), SchedulerError> {
        if ease == Ease::Easy {
            return Err(EaseError::OutOfRange {
                value: ease.value(),
                context: "learning",
            }
            .into());
        }
        let now = self.clock.now();
        let old_queue = card.queue;
        let snapshot = AnswerSnapshot::of(card);
        let steps = self.learn_steps(card)?;

        let graduated = match ease {
            // early removal, with a bonus interval
            Ease::Good => {
                let interval = if card.ctype == CardType::Mature {
                    None
                } else if card.cycles == 0 {
                    Some(steps.ints[1])
                } else {
                    Some(steps.ints[2])
                };
                self.reschedule_as_review(card, interval, now);
                true
            }
            _ => {
                card.cycles += 1;
                if ease == Ease::Hard {
                    card.grade += 1;
                } else {
                    card.grade = 0;
                }
                if card.grade as usize >= steps.delays.len() {
                    let interval = if card.ctype == CardType::Mature {
                        None
                    } else {
                        Some(steps.ints[0])
                    };
                    self.reschedule_as_review(card, interval, now);
                    true
                } else {
                    card.due = now + (steps.delays[card.grade as usize] * 60.0) as i64;
                    card.queue = CardQueue::Learn;
                    false
                }
            }
        };
        card.modified = now;

        let stays_today = !graduated && card.due < self.day_cutoff;
        if stays_today {
            self.push_learn_entry(card.due, card.id);
        }
        if old_queue == CardQueue::New {
            self.new_avail = self.new_avail.saturating_sub(1);
            self.new_seen_today += 1;
            self.update_new_count_today();
            if stays_today {
                self.learn_count += 1;
            }
        } else if !stays_today {
            self.learn_count = self.learn_count.saturating_sub(1);
        }

        self.store.save_card(card)?;
        self.append_log(card, ease, old_queue, snapshot, now)?;
        self.reps_today += 1;
        self.notify(card.id, false);
        Ok(())
    }

    /// The ladder config for a card: `new` until first graduation, `lapse`
    /// for relearning.
    fn learn_steps(&mut self, card: &Card) -> Result<StepsConfig, SchedulerError> {
        let config = self.model_config(card.model_id)?;
        Ok(if card.ctype == CardType::New {
            config.new
        } else {
            config.lapse
        })
    }

    /// Graduate a card into the review queue. A concrete interval also
    /// promotes the card to mature; `None` keeps the interval it has.
    fn reschedule_as_review(&mut self, card: &mut Card, interval: Option<u32>, now: i64) {
        card.queue = CardQueue::Review;
        if let Some(days) = interval {
            card.ctype = CardType::Mature;
            card.interval = f64::from(days);
        }
        card.due = now + (card.interval * 86_400.0) as i64;
    }
}

//! The review engine: interval, ease and due computation for graded
//! answers on review cards.

use rand::Rng;

use srs_domain::{Card, CardQueue, CardType, Ease};
use srs_store::DeckStore;

use crate::config::DeckParams;
use crate::cutoff::SECS_PER_DAY;
use crate::errors::SchedulerError;
use crate::hooks::AnswerSnapshot;
use crate::scheduler::Scheduler;

/// Interval above which a card counts as mature for lapse handling.
const MATURE_INTERVAL: f64 = 21.0;
/// Below this last interval a card is still considered in early learning
/// and its factor is left alone.
const LEARNT_INTERVAL: f64 = 7.0;
/// Historical `delay1` value meaning "no bonus day".
const NO_BONUS: u32 = 600;

/// Age classification of a card before the answer is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReviewState {
    New,
    Young,
    Mature,
}

impl<S: DeckStore> Scheduler<S> {
    pub(crate) fn answer_review_card(
        &mut self,
        card: &mut Card,
        ease: Ease,
    ) -> Result<(), SchedulerError> {
        let now = self.clock.now();
        let old_state = card_state(card);
        let old_queue = card.queue;
        let snapshot = AnswerSnapshot::of(card);

        let last = card.interval;
        card.interval = self.next_interval(card, ease);
        card.last_interval = last;
        if card.reps > 0 {
            card.last_due = card.due;
        }
        card.due = self.next_due(card, ease, old_state, now);
        if self.mode.adjusts_factor() {
            update_factor(card, ease, self.params.average_factor);
        }
        self.space_cards(card, now)?;

        // counter for the queue the card lands in, then the one it left
        if ease == Ease::Again && card.due < self.day_cutoff {
            self.learn_count += 1;
        }
        self.rev_count = self.rev_count.saturating_sub(1);

        card.reps += 1;
        if ease == Ease::Again {
            card.successive = 0;
            card.lapses += 1;
        } else {
            card.successive += 1;
        }
        card.modified = now;

        card.ctype = card_type(card);
        card.queue = card.ctype.home_queue();
        if ease != Ease::Again {
            card.due = card.due.max(self.day_cutoff + 1);
        }
        if self.mode.buries_answered() && ease != Ease::Again {
            card.queue = CardQueue::SchedBuried;
        }

        self.store.save_card(card)?;
        self.append_log(card, ease, old_queue, snapshot, now)?;
        self.reps_today += 1;
        if card.queue == CardQueue::Learn && card.due < self.day_cutoff {
            self.push_learn_entry(card.due, card.id);
        }

        // after the queues: leech handling may trigger a reset
        let is_leech = self.is_leech(card);
        if is_leech {
            self.handle_leech(card)?;
        }
        self.notify(card.id, is_leech);
        Ok(())
    }

    /// Next interval with fuzz applied.
    fn next_interval(&mut self, card: &Card, ease: Ease) -> f64 {
        let delay = self.adjusted_delay(card);
        let params = &self.params;
        let rng = &mut self.rng;
        next_interval_inner(params, card, delay, ease, &mut |lo, hi| {
            if lo < hi { rng.gen_range(lo..hi) } else { lo }
        })
    }

    /// Deterministic interval used for previews: band midpoints, no fuzz.
    pub fn preview_interval(&self, card: &Card, ease: Ease) -> f64 {
        let delay = self.adjusted_delay(card);
        next_interval_inner(&self.params, card, delay, ease, &mut |lo, hi| {
            (lo + hi) / 2.0
        })
    }

    /// Days the answer came late, relative to the cutoff.
    ///
    /// Zero for new cards. For not-yet-due cards the delay is zero under
    /// the standard scheduler; reviewing-early and cramming keep the
    /// negative value, which routes through the cramming branch of the
    /// interval computation.
    fn adjusted_delay(&self, card: &Card) -> f64 {
        if card.is_new() {
            return 0.0;
        }
        let days = (self.day_cutoff - card.due) as f64 / SECS_PER_DAY as f64;
        if days >= 0.0 || self.mode.allows_early_delay() {
            days
        } else {
            0.0
        }
    }

    /// When the card expires given the answer.
    fn next_due(&self, card: &Card, ease: Ease, old_state: ReviewState, now: i64) -> i64 {
        if ease == Ease::Again {
            let bonus = self.params.delay1;
            if !self.mode.skips_lapse_bonus()
                && old_state == ReviewState::Mature
                && bonus != 0
                && bonus != NO_BONUS
            {
                // failures land at the start of a future day, after the
                // cards already waiting there
                return self.day_cutoff + (i64::from(bonus) - 1) * SECS_PER_DAY;
            }
            now
        } else {
            now + (card.interval * SECS_PER_DAY as f64) as i64
        }
    }
}

fn next_interval_inner(
    params: &DeckParams,
    card: &Card,
    mut delay: f64,
    ease: Ease,
    draw: &mut dyn FnMut(f64, f64) -> f64,
) -> f64 {
    let mut interval = card.interval;
    let factor = card.factor;
    // reviewing early / cramming: shrink toward the interval actually served
    if delay < 0.0 {
        interval = card.last_interval.max(card.interval + delay);
        if interval < params.mid_interval_min {
            interval = 0.0;
        }
        delay = 0.0;
    }
    if ease == Ease::Again {
        interval *= params.delay2;
        if interval < params.hard_interval_min {
            interval = 0.0;
        }
        return interval;
    }
    if interval == 0.0 {
        // graduation: draw from the ease band
        return match ease {
            Ease::Hard => draw(params.hard_interval_min, params.hard_interval_max),
            Ease::Good => draw(params.mid_interval_min, params.mid_interval_max),
            _ => draw(params.easy_interval_min, params.easy_interval_max),
        };
    }
    // boost intervals stuck below the mid band
    if interval < params.hard_interval_max && interval > 0.166 {
        let mid = (params.mid_interval_min + params.mid_interval_max) / 2.0;
        interval = mid / factor;
    }
    interval = match ease {
        Ease::Hard => (interval + delay / 4.0) * 1.2,
        Ease::Good => (interval + delay / 2.0) * factor,
        _ => (interval + delay) * factor * params.factor_four,
    };
    interval * draw(0.95, 1.05)
}

/// Age of the card before this answer.
pub(crate) fn card_state(card: &Card) -> ReviewState {
    if card.is_new() {
        ReviewState::New
    } else if card.interval > MATURE_INTERVAL {
        ReviewState::Mature
    } else {
        ReviewState::Young
    }
}

/// The home queue a card belongs to after an answer: failed cards drop
/// back to learning, passed cards rest in review.
pub(crate) fn card_type(card: &Card) -> CardType {
    if card.is_new() {
        CardType::New
    } else if card.successive > 0 {
        CardType::Mature
    } else {
        CardType::Learning
    }
}

fn update_factor(card: &mut Card, ease: Ease, average_factor: f64) {
    if card.reps == 0 {
        // first graded answer inherits the deck's starting factor
        card.factor = average_factor;
    }
    if card.successive > 0 && !card_is_being_learnt(card) {
        if ease == Ease::Again {
            card.factor -= 0.20;
        } else if ease == Ease::Hard {
            card.factor -= 0.15;
        }
    }
    if ease == Ease::Easy {
        card.factor += 0.10;
    }
    card.factor = card.factor.max(1.3);
}

fn card_is_being_learnt(card: &Card) -> bool {
    card.last_interval < LEARNT_INTERVAL
}

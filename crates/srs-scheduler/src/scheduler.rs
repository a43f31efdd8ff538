//! The scheduler: queue state, the next-card dispatcher, and daily reset.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use srs_domain::{Card, CardQueue, Ease, ModelConfig, tags};
use srs_store::{DeckStore, QueueEntry, StoreError, TagFilter};

use crate::clock::Clock;
use crate::config::{DeckParams, NewCardSpacing};
use crate::cutoff::{SECS_PER_DAY, day_count, next_day_cutoff};
use crate::errors::SchedulerError;
use crate::hooks::ReviewObserver;
use crate::modes::Mode;

/// Serves one learner from one deck: picks the next due card and applies
/// graded answers.
///
/// All queue state is owned here and rebuilt from the store on `reset`.
/// The scheduler is single-threaded; embedders must not share an instance
/// across threads, and each `answer_card` runs to completion as one
/// logical transaction against the store.
pub struct Scheduler<S: DeckStore> {
    pub(crate) store: S,
    pub(crate) params: DeckParams,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) rng: StdRng,
    pub(crate) mode: Mode,
    pub(crate) day_cutoff: i64,
    day_count: i64,
    model_configs: HashMap<Uuid, ModelConfig>,
    pub(crate) spaced_facts: HashMap<Uuid, i64>,
    pub(crate) learn_queue: BinaryHeap<Reverse<(i64, Uuid)>>,
    pub(crate) learn_count: usize,
    pub(crate) rev_queue: Vec<QueueEntry>,
    pub(crate) rev_count: usize,
    pub(crate) new_queue: Vec<QueueEntry>,
    pub(crate) new_avail: usize,
    pub(crate) new_count: usize,
    new_card_modulus: usize,
    pub(crate) reps_today: usize,
    pub(crate) new_seen_today: usize,
    rev_filter: TagFilter,
    new_filter: TagFilter,
    pub(crate) observers: Vec<Box<dyn ReviewObserver>>,
}

impl<S: DeckStore> Scheduler<S> {
    /// Create a scheduler over the given store, restore any session-buried
    /// cards, and build the day's queues.
    pub fn new(
        store: S,
        params: DeckParams,
        clock: Box<dyn Clock>,
    ) -> Result<Scheduler<S>, SchedulerError> {
        Scheduler::with_rng(store, params, clock, StdRng::from_entropy())
    }

    /// As [`Scheduler::new`], with a caller-supplied RNG so interval fuzz
    /// is reproducible in tests.
    pub fn with_rng(
        store: S,
        params: DeckParams,
        clock: Box<dyn Clock>,
        rng: StdRng,
    ) -> Result<Scheduler<S>, SchedulerError> {
        let mut scheduler = Scheduler {
            store,
            params,
            clock,
            rng,
            mode: Mode::Standard,
            day_cutoff: 0,
            day_count: 0,
            model_configs: HashMap::new(),
            spaced_facts: HashMap::new(),
            learn_queue: BinaryHeap::new(),
            learn_count: 0,
            rev_queue: Vec::new(),
            rev_count: 0,
            new_queue: Vec::new(),
            new_avail: 0,
            new_count: 0,
            new_card_modulus: 0,
            reps_today: 0,
            new_seen_today: 0,
            rev_filter: TagFilter::unrestricted(),
            new_filter: TagFilter::unrestricted(),
            observers: Vec::new(),
        };
        scheduler.update_cutoff();
        scheduler.reset_sched_buried()?;
        scheduler.reset()?;
        Ok(scheduler)
    }

    /// Rebuild every counter and queue from the store.
    pub fn reset(&mut self) -> Result<(), SchedulerError> {
        self.model_configs.clear();
        self.spaced_facts.clear();
        self.rev_filter = self.resolve_filter(
            &self.params.rev_active_tags,
            &self.params.rev_inactive_tags,
        )?;
        self.new_filter = self.resolve_filter(
            &self.params.new_active_tags,
            &self.params.new_inactive_tags,
        )?;
        let day_start = self.day_cutoff - SECS_PER_DAY;
        self.reps_today = self.store.review_count_since(day_start)?;
        self.new_seen_today = self.store.new_seen_since(day_start)?;
        self.reset_learn()?;
        self.reset_review()?;
        self.reset_new()?;
        self.update_new_card_ratio();
        Ok(())
    }

    /// Put cards buried by the review-early scheduler back into play.
    ///
    /// A store predating the buried queue reports `SchemaOutOfDate`; that
    /// is logged and recovery is a no-op.
    pub fn reset_sched_buried(&mut self) -> Result<(), SchedulerError> {
        match self.store.restore_buried() {
            Err(StoreError::SchemaOutOfDate(detail)) => {
                warn!(%detail, "store cannot restore buried cards; skipping");
                Ok(())
            }
            other => Ok(other?),
        }
    }

    /// Probe for day rollover; crossing the cutoff rebuilds all queues.
    pub fn check_day(&mut self) -> Result<(), SchedulerError> {
        if self.clock.now() > self.day_cutoff {
            info!(day = self.day_count, "day rolled over; rebuilding queues");
            self.update_cutoff();
            self.reset()?;
        }
        Ok(())
    }

    /// Pop the next card to study, or `None` when the session is finished.
    pub fn get_card(&mut self) -> Result<Option<Card>, SchedulerError> {
        self.check_day()?;
        match self.get_card_id()? {
            Some(id) => {
                let card = self
                    .store
                    .card(id)?
                    .ok_or(SchedulerError::CardNotFound(id))?;
                Ok(Some(card))
            }
            None => Ok(None),
        }
    }

    /// Apply a graded answer to a card previously handed out by
    /// [`Scheduler::get_card`].
    pub fn answer_card(&mut self, card: &mut Card, ease: Ease) -> Result<(), SchedulerError> {
        match card.queue {
            CardQueue::Learn | CardQueue::New => self.answer_learn_card(card, ease),
            CardQueue::Review => self.answer_review_card(card, ease),
            queue => Err(SchedulerError::InvalidQueue {
                card: card.id,
                queue,
            }),
        }
    }

    /// Counts shown in the session header: (learning, review).
    pub fn counts(&self) -> (usize, usize) {
        (self.learn_count, self.rev_count)
    }

    /// New cards still offered today under the daily cap.
    pub fn new_card_count(&self) -> usize {
        self.new_count
    }

    /// New cards still due today, before the daily cap.
    pub fn new_available(&self) -> usize {
        self.new_avail
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn day_cutoff(&self) -> i64 {
        self.day_cutoff
    }

    pub fn day_count(&self) -> i64 {
        self.day_count
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the scheduler and return the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Register a listener for `card_answered` notifications.
    pub fn add_observer(&mut self, observer: Box<dyn ReviewObserver>) {
        self.observers.push(observer);
    }

    // Mode switches. Swapping rebuilds all queue state; no card is in
    // flight across a switch.

    pub fn setup_standard_scheduler(&mut self) -> Result<(), SchedulerError> {
        debug!("switching to standard scheduling");
        self.mode = Mode::Standard;
        self.reset()
    }

    pub fn setup_review_early_scheduler(&mut self) -> Result<(), SchedulerError> {
        debug!("switching to review-early scheduling");
        self.mode = Mode::ReviewEarly;
        self.reset()
    }

    pub fn setup_learn_more_scheduler(&mut self) -> Result<(), SchedulerError> {
        debug!("switching to learn-more scheduling");
        self.mode = Mode::LearnMore;
        self.reset()
    }

    pub fn setup_cram_scheduler(&mut self) -> Result<(), SchedulerError> {
        debug!("switching to cram scheduling");
        self.mode = Mode::Cram;
        self.reset()
    }

    // Dispatch

    fn get_card_id(&mut self) -> Result<Option<Uuid>, SchedulerError> {
        // learning card due?
        if let Some(id) = self.get_learn_card(false) {
            return Ok(Some(id));
        }
        // time to interleave a new card?
        if self.time_for_new_card() {
            if let Some(id) = self.get_new_card()? {
                return Ok(Some(id));
            }
        }
        // card due for review?
        if let Some(id) = self.get_review_card()? {
            return Ok(Some(id));
        }
        // new cards left?
        if let Some(id) = self.get_new_card()? {
            return Ok(Some(id));
        }
        // collapse or finish
        Ok(self.get_learn_card(true))
    }

    fn get_learn_card(&mut self, collapse: bool) -> Option<Uuid> {
        let Reverse((due, _)) = *self.learn_queue.peek()?;
        let mut horizon = self.clock.now();
        if collapse {
            horizon += self.params.collapse_time;
        }
        if due < horizon {
            let Reverse((_, id)) = self.learn_queue.pop()?;
            return Some(id);
        }
        None
    }

    fn get_review_card(&mut self) -> Result<Option<Uuid>, SchedulerError> {
        if self.rev_count > 0 && self.rev_queue.is_empty() {
            self.fill_rev_queue()?;
        }
        Ok(self.rev_queue.pop().map(|entry| entry.card_id))
    }

    fn fill_rev_queue(&mut self) -> Result<(), SchedulerError> {
        let exclude = self.spaced_fact_ids(self.clock.now());
        let mut batch = if self.mode.reviews_ahead() {
            self.store.review_queue_ahead(
                self.day_cutoff,
                self.params.queue_limit,
                &self.rev_filter,
                &exclude,
            )?
        } else {
            self.store.review_queue(
                self.params.rev_card_order,
                self.day_cutoff,
                self.params.queue_limit,
                &self.rev_filter,
                &exclude,
            )?
        };
        // consumed from the tail
        batch.reverse();
        debug!(len = batch.len(), "filled review queue");
        self.rev_queue = batch;
        Ok(())
    }

    fn get_new_card(&mut self) -> Result<Option<Uuid>, SchedulerError> {
        if self.new_count > 0 && self.new_queue.is_empty() {
            self.fill_new_queue()?;
        }
        if self.new_count == 0 {
            return Ok(None);
        }
        Ok(self.new_queue.pop().map(|entry| entry.card_id))
    }

    fn fill_new_queue(&mut self) -> Result<(), SchedulerError> {
        let exclude = self.spaced_fact_ids(self.clock.now());
        let mut batch = self.store.new_queue(
            self.params.new_card_order,
            self.day_cutoff,
            self.params.queue_limit,
            &self.new_filter,
            &exclude,
        )?;
        batch.reverse();
        debug!(len = batch.len(), "filled new queue");
        self.new_queue = batch;
        Ok(())
    }

    fn time_for_new_card(&self) -> bool {
        if self.new_count == 0 {
            return false;
        }
        match self.params.new_card_spacing {
            NewCardSpacing::Last => false,
            NewCardSpacing::First => true,
            NewCardSpacing::Distribute => {
                self.new_card_modulus != 0 && self.reps_today % self.new_card_modulus == 0
            }
        }
    }

    // Queue and counter rebuilds

    fn reset_learn(&mut self) -> Result<(), SchedulerError> {
        let rows = self
            .store
            .learn_queue(self.day_cutoff, self.params.learn_limit)?;
        self.learn_count = rows.len();
        self.learn_queue = rows
            .into_iter()
            .map(|row| Reverse((row.due, row.card_id)))
            .collect();
        Ok(())
    }

    fn reset_review(&mut self) -> Result<(), SchedulerError> {
        self.rev_count = if self.mode.reviews_ahead() {
            self.store
                .review_count_ahead(self.day_cutoff, &self.rev_filter)?
        } else {
            self.store.review_count(self.day_cutoff, &self.rev_filter)?
        };
        self.rev_queue.clear();
        Ok(())
    }

    fn reset_new(&mut self) -> Result<(), SchedulerError> {
        self.rebuild_new_count()?;
        self.new_queue.clear();
        Ok(())
    }

    fn rebuild_new_count(&mut self) -> Result<(), SchedulerError> {
        self.new_avail = self.store.new_count(self.day_cutoff, &self.new_filter)?;
        self.update_new_count_today();
        Ok(())
    }

    pub(crate) fn update_new_count_today(&mut self) {
        self.new_count = if self.mode.uncapped_new() {
            self.new_avail
        } else {
            self.new_avail.min(
                self.params
                    .new_cards_per_day
                    .saturating_sub(self.new_seen_today),
            )
        };
    }

    fn update_new_card_ratio(&mut self) {
        self.new_card_modulus = match self.params.new_card_spacing {
            NewCardSpacing::Distribute if self.new_count > 0 => {
                let modulus = (self.new_count + self.rev_count).div_ceil(self.new_count);
                if self.rev_count > 0 {
                    modulus.max(2)
                } else {
                    modulus
                }
            }
            _ => 0,
        };
    }

    fn update_cutoff(&mut self) {
        let now = self.clock.now();
        self.day_cutoff = next_day_cutoff(
            now,
            self.params.utc_offset,
            i64::from(self.clock.local_offset_secs()),
        );
        self.day_count = day_count(self.day_cutoff, self.params.deck_created);
    }

    fn resolve_filter(&self, active: &str, inactive: &str) -> Result<TagFilter, SchedulerError> {
        let active_ids = self.store.tag_ids(&tags::parse_tags(active))?;
        let inactive_ids = self.store.tag_ids(&tags::parse_tags(inactive))?;
        Ok(TagFilter::new(
            active_ids.into_iter().collect(),
            inactive_ids.into_iter().collect(),
        ))
    }

    /// Per-model config, cached for the session.
    pub(crate) fn model_config(&mut self, model_id: Uuid) -> Result<ModelConfig, SchedulerError> {
        if let Some(config) = self.model_configs.get(&model_id) {
            return Ok(config.clone());
        }
        let json = self
            .store
            .model_config_json(model_id)?
            .ok_or(SchedulerError::ConfigMissing(model_id))?;
        let config = ModelConfig::parse(&json)?;
        self.model_configs.insert(model_id, config.clone());
        Ok(config)
    }

    pub(crate) fn spaced_fact_ids(&self, now: i64) -> BTreeSet<Uuid> {
        self.spaced_facts
            .iter()
            .filter(|&(_, &until)| until > now)
            .map(|(&fact, _)| fact)
            .collect()
    }

    pub(crate) fn push_learn_entry(&mut self, due: i64, card_id: Uuid) {
        self.learn_queue.push(Reverse((due, card_id)));
    }
}

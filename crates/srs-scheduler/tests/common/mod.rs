#![allow(dead_code)]

use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use srs_domain::{Card, CardQueue, CardType, Fact, ModelConfig};
use srs_scheduler::{DeckParams, ManualClock, Scheduler};
use srs_store::MemoryStore;

/// Mid-morning on an arbitrary day; the next cutoff lands about ten hours
/// later at 1_036_800.
pub const START: i64 = 1_000_000;

pub const DAY: i64 = 86_400;

/// Build a deck: populate the store, then construct a scheduler over it
/// with a controllable clock and a fixed RNG seed.
pub fn deck(
    params: DeckParams,
    setup: impl FnOnce(&mut MemoryStore),
) -> (Rc<ManualClock>, Scheduler<MemoryStore>) {
    let mut store = MemoryStore::new();
    setup(&mut store);
    let clock = Rc::new(ManualClock::new(START, 0));
    let scheduler = Scheduler::with_rng(
        store,
        params,
        Box::new(Rc::clone(&clock)),
        StdRng::seed_from_u64(42),
    )
    .expect("scheduler builds");
    (clock, scheduler)
}

/// Register the default model config and return its id.
pub fn stock_model(store: &mut MemoryStore) -> Uuid {
    let id = Uuid::new_v4();
    store.add_model(id, &ModelConfig::default());
    id
}

pub fn add_fact(store: &mut MemoryStore, tags: &str) -> Uuid {
    let id = Uuid::new_v4();
    store.add_fact(Fact::new(id, tags, START));
    id
}

/// A never-studied card sitting in the new queue.
pub fn new_card(store: &mut MemoryStore, fact: Uuid, model: Uuid, due: i64) -> Card {
    let card = Card::new(fact, model, 0, due);
    store.add_card(card.clone());
    card
}

/// A card mid-ladder in the learning queue.
pub fn learning_card(store: &mut MemoryStore, fact: Uuid, model: Uuid, due: i64) -> Card {
    let mut card = Card::new(fact, model, 0, due);
    card.queue = CardQueue::Learn;
    card.ctype = CardType::New;
    store.add_card(card.clone());
    card
}

/// A graduated card in the review queue.
pub fn review_card(store: &mut MemoryStore, fact: Uuid, model: Uuid, due: i64, interval: f64) -> Card {
    let mut card = Card::new(fact, model, 0, due);
    card.queue = CardQueue::Review;
    card.ctype = CardType::Mature;
    card.interval = interval;
    card.last_interval = interval;
    card.factor = 2.5;
    card.reps = 10;
    card.successive = 5;
    store.add_card(card.clone());
    card
}

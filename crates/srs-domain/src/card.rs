use uuid::Uuid;

use crate::{CardQueue, CardType};

/// Scheduling state tracked for a single card.
///
/// Times (`due`, `last_due`, `modified`) are epoch seconds. Learning cards
/// carry exact due times; review and new cards carry day-aligned ones.
/// Intervals are real-valued days.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: Uuid,
    /// Group key; siblings share it and are spaced apart after answers.
    pub fact_id: Uuid,
    /// Configuration key into the model table.
    pub model_id: Uuid,
    /// Position of the card within its fact.
    pub ordinal: u32,
    pub queue: CardQueue,
    pub ctype: CardType,
    pub due: i64,
    pub interval: f64,
    pub last_interval: f64,
    /// Ease multiplier applied to interval growth; never below 1.3.
    pub factor: f64,
    pub reps: u32,
    pub successive: u32,
    pub lapses: u32,
    /// Passes through the learning ladder, including restarts.
    pub cycles: u32,
    /// Current step index within the learning ladder.
    pub grade: u32,
    pub last_due: i64,
    pub modified: i64,
}

impl Card {
    /// Create a brand new card, due at ingestion time.
    pub fn new(fact_id: Uuid, model_id: Uuid, ordinal: u32, due: i64) -> Card {
        Card {
            id: Uuid::new_v4(),
            fact_id,
            model_id,
            ordinal,
            queue: CardQueue::New,
            ctype: CardType::New,
            due,
            interval: 0.0,
            last_interval: 0.0,
            factor: 2.5,
            reps: 0,
            successive: 0,
            lapses: 0,
            cycles: 0,
            grade: 0,
            last_due: 0,
            modified: due,
        }
    }

    /// A card is new until its first graded review.
    pub fn is_new(&self) -> bool {
        self.reps == 0
    }
}

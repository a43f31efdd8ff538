//! Card scheduler core for a spaced-repetition learning system.
//!
//! Given a deck of cards with persistent review state, the [`Scheduler`]
//! decides which card the learner studies next and how a card's state
//! changes after the learner grades their recall. It interleaves three
//! queues (learning / review / new), runs an SM-2-derived interval
//! algorithm with fuzzing and ease adjustment, spaces sibling cards,
//! rolls the day over at a local cutoff, flags leeches, and supports
//! alternate scheduling modes (review-early, learn-more, cram).
//!
//! The scheduler is single-threaded and owns all of its queue state; it
//! talks to persistence only through the [`srs_store::DeckStore`] trait.

mod clock;
mod config;
mod cutoff;
mod display;
mod errors;
mod hooks;
mod learning;
mod leech;
mod modes;
mod review;
mod scheduler;
mod spacing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DeckParams, NewCardSpacing};
pub use display::fmt_time_span;
pub use errors::SchedulerError;
pub use hooks::ReviewObserver;
pub use modes::Mode;
pub use scheduler::Scheduler;

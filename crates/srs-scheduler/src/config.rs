//! Deck-wide parameters governing queue limits, interval bounds, spacing
//! and leech policy.

use srs_store::{NewOrder, ReviewOrder};

/// When new cards are shown relative to due reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewCardSpacing {
    /// Interleave new cards evenly through the session.
    #[default]
    Distribute,
    /// Show all new cards before reviews.
    First,
    /// Show new cards only once reviews are exhausted.
    Last,
}

/// Process-wide scheduler tunables.
///
/// `delay1` counts bonus days granted to a failed mature card; 600 is a
/// historical sentinel meaning "no bonus". Interval bounds are in days,
/// `collapse_time` and `new_spacing` in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckParams {
    pub deck_created: i64,
    /// Deck timezone, seconds east of UTC.
    pub utc_offset: i64,
    /// End-of-session grace during which learning cards show early.
    pub collapse_time: i64,
    pub queue_limit: usize,
    pub learn_limit: usize,
    pub new_cards_per_day: usize,
    pub new_card_spacing: NewCardSpacing,
    pub new_card_order: NewOrder,
    pub rev_card_order: ReviewOrder,
    pub hard_interval_min: f64,
    pub hard_interval_max: f64,
    pub mid_interval_min: f64,
    pub mid_interval_max: f64,
    pub easy_interval_min: f64,
    pub easy_interval_max: f64,
    pub delay0: i64,
    pub delay1: u32,
    pub delay2: f64,
    /// Extra multiplier applied on an Easy review answer.
    pub factor_four: f64,
    /// Starting factor inherited by cards on their first review.
    pub average_factor: f64,
    pub rev_spacing: f64,
    pub new_spacing: i64,
    /// Lapse threshold for leech detection; 0 disables it.
    pub leech_fails: u32,
    pub suspend_leeches: bool,
    pub rev_active_tags: String,
    pub rev_inactive_tags: String,
    pub new_active_tags: String,
    pub new_inactive_tags: String,
}

impl Default for DeckParams {
    fn default() -> DeckParams {
        DeckParams {
            deck_created: 0,
            utc_offset: 0,
            collapse_time: 600,
            queue_limit: 200,
            learn_limit: 1_000,
            new_cards_per_day: 20,
            new_card_spacing: NewCardSpacing::Distribute,
            new_card_order: NewOrder::Oldest,
            rev_card_order: ReviewOrder::IntervalDesc,
            hard_interval_min: 0.333,
            hard_interval_max: 0.5,
            mid_interval_min: 3.0,
            mid_interval_max: 5.0,
            easy_interval_min: 7.0,
            easy_interval_max: 9.0,
            delay0: 600,
            delay1: 600,
            delay2: 0.0,
            factor_four: 1.3,
            average_factor: 2.5,
            rev_spacing: 0.1,
            new_spacing: 60,
            leech_fails: 16,
            suspend_leeches: true,
            rev_active_tags: String::new(),
            rev_inactive_tags: String::new(),
            new_active_tags: String::new(),
            new_inactive_tags: String::new(),
        }
    }
}

impl DeckParams {
    /// Whether failed cards are held back until the session winds down.
    pub fn show_failed_last(&self) -> bool {
        self.collapse_time > 0 || self.delay0 == 0
    }
}

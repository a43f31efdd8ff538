//! Scheduling modes.
//!
//! A mode swaps the behavior of a fixed set of extension points; the
//! variant is consulted at each point rather than replacing methods, so a
//! switch is atomic and no card is ever in flight across one.

/// The active scheduling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Standard,
    /// Study cards before they are due; answered cards are buried for the
    /// rest of the session.
    ReviewEarly,
    /// Ignore the daily cap on new cards.
    LearnMore,
    /// Cramming; failed cards never earn a bonus day.
    Cram,
}

impl Mode {
    /// Review selection targets cards due after the cutoff.
    pub fn reviews_ahead(self) -> bool {
        matches!(self, Mode::ReviewEarly)
    }

    /// The daily new-card cap is suspended.
    pub fn uncapped_new(self) -> bool {
        matches!(self, Mode::LearnMore)
    }

    /// Failed mature cards are never pushed to a bonus day.
    pub fn skips_lapse_bonus(self) -> bool {
        matches!(self, Mode::Cram)
    }

    /// Cards answered ahead of schedule keep their negative delay, which
    /// routes them through the cramming interval adjustment.
    pub fn allows_early_delay(self) -> bool {
        matches!(self, Mode::ReviewEarly | Mode::Cram)
    }

    /// Ease factors only move under the standard scheduler.
    pub fn adjusts_factor(self) -> bool {
        matches!(self, Mode::Standard)
    }

    /// Answered cards are hidden for the rest of the session.
    pub fn buries_answered(self) -> bool {
        matches!(self, Mode::ReviewEarly)
    }

    /// Flag value recorded with review-log entries.
    pub fn review_log_flags(self) -> u8 {
        if self == Mode::ReviewEarly { 1 } else { 0 }
    }
}

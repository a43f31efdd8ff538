//! Human-readable interval previews for answer buttons.

use srs_domain::{Card, Ease};
use srs_store::DeckStore;

use crate::scheduler::Scheduler;

/// Format a span of seconds with the largest unit that keeps the number
/// small: seconds, minutes, hours, days, months, years.
pub fn fmt_time_span(seconds: f64, short: bool) -> String {
    let steps = [
        (60.0, "second", "s"),
        (60.0, "minute", "m"),
        (24.0, "hour", "h"),
        (30.0, "day", "d"),
        (12.0, "month", "mo"),
        (f64::INFINITY, "year", "y"),
    ];
    let mut value = seconds;
    for (step, unit, abbrev) in steps {
        if value < step {
            return render(value, unit, abbrev, short);
        }
        value /= step;
    }
    unreachable!("final step is unbounded")
}

fn render(value: f64, unit: &str, abbrev: &str, short: bool) -> String {
    let whole = (value - value.round()).abs() < 0.05;
    if short {
        if whole {
            format!("{:.0}{abbrev}", value.round())
        } else {
            format!("{value:.1}{abbrev}")
        }
    } else if whole {
        let rounded = value.round();
        let plural = if rounded == 1.0 { "" } else { "s" };
        format!("{rounded:.0} {unit}{plural}")
    } else {
        format!("{value:.1} {unit}s")
    }
}

impl<S: DeckStore> Scheduler<S> {
    /// Preview text for the interval an answer would produce.
    ///
    /// Uses the deterministic interval (no fuzz) so the label is stable
    /// across calls.
    pub fn next_interval_str(&self, card: &Card, ease: Ease, short: bool) -> String {
        let days = self.preview_interval(card, ease);
        fmt_time_span(days * 86_400.0, short)
    }
}

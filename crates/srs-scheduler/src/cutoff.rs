//! Daily cutoff arithmetic.
//!
//! The cutoff is the next deck-local midnight, expressed in epoch seconds.
//! It partitions "today's" cards: everything selectable is due before it,
//! and crossing it triggers a full queue rebuild.

pub(crate) const SECS_PER_DAY: i64 = 86_400;

/// Compute the next daily boundary after `now`.
///
/// The deck frame is shifted by `utc_offset` (seconds east of UTC); the
/// result is corrected for the host timezone, advanced by whole days until
/// strictly in the future, and capped at 24 hours ahead.
pub(crate) fn next_day_cutoff(now: i64, utc_offset: i64, local_offset: i64) -> i64 {
    let shifted = now - utc_offset;
    let mut cutoff = (shifted.div_euclid(SECS_PER_DAY) + 1) * SECS_PER_DAY;
    cutoff += utc_offset - local_offset;
    while cutoff <= now {
        cutoff += SECS_PER_DAY;
    }
    cutoff.min(now + SECS_PER_DAY)
}

/// Days elapsed between deck creation and the cutoff.
pub(crate) fn day_count(cutoff: i64, deck_created: i64) -> i64 {
    cutoff.div_euclid(SECS_PER_DAY) - deck_created.div_euclid(SECS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_is_strictly_ahead_and_at_most_a_day_away() {
        for now in [0, 1, 43_200, 86_399, 86_400, 1_700_000_000] {
            for utc_offset in [-10 * 3_600, 0, 3_600, 9 * 3_600] {
                for local_offset in [-8 * 3_600, 0, 2 * 3_600] {
                    let cutoff = next_day_cutoff(now, utc_offset, local_offset);
                    assert!(cutoff > now, "cutoff in past for now={now}");
                    assert!(cutoff <= now + SECS_PER_DAY);
                }
            }
        }
    }

    #[test]
    fn cutoff_lands_on_the_next_deck_midnight() {
        // Matching deck and host offsets: the correction cancels and the
        // cutoff is the next multiple of a day in the deck frame.
        let cutoff = next_day_cutoff(10_000, 0, 0);
        assert_eq!(cutoff, SECS_PER_DAY);
        let cutoff = next_day_cutoff(SECS_PER_DAY + 5, 0, 0);
        assert_eq!(cutoff, 2 * SECS_PER_DAY);
    }

    #[test]
    fn day_count_counts_whole_days_since_creation() {
        assert_eq!(day_count(SECS_PER_DAY, 0), 1);
        assert_eq!(day_count(10 * SECS_PER_DAY + 5, 3 * SECS_PER_DAY), 7);
        assert_eq!(day_count(SECS_PER_DAY, SECS_PER_DAY), 0);
    }
}

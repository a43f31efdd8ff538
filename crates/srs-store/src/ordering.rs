//! Queue orderings: a closed set of disciplines plus their comparators.

use std::cmp::Ordering;

use srs_domain::Card;

/// How the review queue batch is ordered before consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewOrder {
    /// Largest interval first.
    #[default]
    IntervalDesc,
    /// Smallest interval first.
    IntervalAsc,
    /// Longest overdue first.
    Due,
    /// Grouped by fact, then by the card's position within it.
    FactThenOrdinal,
}

/// How the new queue batch is ordered before consumption.
///
/// `Random` currently orders by due like `Oldest`: the historical random
/// discipline is incompatible with sibling spacing and its replacement is
/// an open question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewOrder {
    #[default]
    Oldest,
    Random,
    Newest,
}

/// Comparator for a review ordering; ties break on due then id so batches
/// are stable.
pub fn review_ordering(order: ReviewOrder) -> fn(&Card, &Card) -> Ordering {
    match order {
        ReviewOrder::IntervalDesc => |a, b| {
            b.interval
                .total_cmp(&a.interval)
                .then_with(|| (a.due, a.id).cmp(&(b.due, b.id)))
        },
        ReviewOrder::IntervalAsc => |a, b| {
            a.interval
                .total_cmp(&b.interval)
                .then_with(|| (a.due, a.id).cmp(&(b.due, b.id)))
        },
        ReviewOrder::Due => |a, b| (a.due, a.id).cmp(&(b.due, b.id)),
        ReviewOrder::FactThenOrdinal => {
            |a, b| (a.fact_id, a.ordinal, a.id).cmp(&(b.fact_id, b.ordinal, b.id))
        }
    }
}

/// Comparator for a new-card ordering.
pub fn new_ordering(order: NewOrder) -> fn(&Card, &Card) -> Ordering {
    match order {
        NewOrder::Oldest | NewOrder::Random => |a, b| (a.due, a.id).cmp(&(b.due, b.id)),
        NewOrder::Newest => |a, b| (b.due, b.id).cmp(&(a.due, a.id)),
    }
}

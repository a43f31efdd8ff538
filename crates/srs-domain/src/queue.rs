//! Queue membership and home-queue classification for cards.

/// Which queue a card occupies at rest.
///
/// The discriminants are the on-disk codes; the negative values mark cards
/// that are out of play (`Suspended` indefinitely, `SchedBuried` for the
/// remainder of the session by the review-early scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum CardQueue {
    /// Short-interval learning steps, due in seconds.
    Learn = 0,
    /// Graduated cards due for spaced review.
    Review = 1,
    /// Cards never yet studied.
    New = 2,
    /// Removed from study until the learner unsuspends the card.
    Suspended = -1,
    /// Hidden for the rest of the session; restored to the home queue on startup.
    SchedBuried = -3,
}

impl CardQueue {
    /// Decode an on-disk queue code.
    pub fn from_i8(code: i8) -> Option<CardQueue> {
        match code {
            0 => Some(CardQueue::Learn),
            1 => Some(CardQueue::Review),
            2 => Some(CardQueue::New),
            -1 => Some(CardQueue::Suspended),
            -3 => Some(CardQueue::SchedBuried),
            _ => None,
        }
    }

    /// The on-disk code for this queue.
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

/// The card's home queue: where it belongs when nothing transient
/// (suspension, burying) overrides the placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum CardType {
    /// Walking the learning-step ladder.
    Learning = 0,
    /// Graduated; reviewed at growing intervals.
    Mature = 1,
    /// Never answered.
    New = 2,
}

impl CardType {
    /// Decode an on-disk type code.
    pub fn from_i8(code: i8) -> Option<CardType> {
        match code {
            0 => Some(CardType::Learning),
            1 => Some(CardType::Mature),
            2 => Some(CardType::New),
            _ => None,
        }
    }

    /// The on-disk code for this type.
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// The queue a card of this type rests in.
    pub fn home_queue(self) -> CardQueue {
        match self {
            CardType::Learning => CardQueue::Learn,
            CardType::Mature => CardQueue::Review,
            CardType::New => CardQueue::New,
        }
    }
}

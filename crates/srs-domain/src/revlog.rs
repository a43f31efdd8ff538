use uuid::Uuid;

use crate::CardQueue;

/// Append-only record of one graded answer.
///
/// Snapshots the card state on both sides of the answer so history can be
/// replayed or audited. `from_queue` is the queue the card was answered
/// from, which lets a store count first exposures of new cards; `flags` is
/// 1 for answers taken while reviewing early, 0 otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewLogEntry {
    pub card_id: Uuid,
    pub time: i64,
    pub ease: u8,
    pub flags: u8,
    pub from_queue: CardQueue,
    /// The card's review count after this answer.
    pub rep: u32,
    pub last_interval: f64,
    pub interval: f64,
    pub last_factor: f64,
    pub factor: f64,
    pub last_due: i64,
    pub due: i64,
}

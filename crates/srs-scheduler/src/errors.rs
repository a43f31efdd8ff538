//! Error types returned by the scheduler.

use thiserror::Error;
use uuid::Uuid;

use srs_domain::{CardQueue, ConfigError, EaseError};
use srs_store::StoreError;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A queue handed out an id the store no longer knows.
    #[error("card not found: {0}")]
    CardNotFound(Uuid),
    /// `answer_card` was invoked on a card that is not answerable.
    #[error("card {card} cannot be answered from queue {queue:?}")]
    InvalidQueue { card: Uuid, queue: CardQueue },
    /// The card's model has no stored configuration; it cannot be scheduled.
    #[error("no configuration stored for model {0}")]
    ConfigMissing(Uuid),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ease(#[from] EaseError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Learner grades and their per-context validation.

use thiserror::Error;

/// Grade assigned by the learner to an answer.
///
/// The numeric codes are the protocol: mature reviews accept 1 through 4;
/// learning steps accept 1 through 3, where 2 advances the ladder and 3
/// removes the card from it early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Ease {
    /// Failed to recall.
    Again = 1,
    /// Recalled with difficulty (review); ladder advance (learning).
    Hard = 2,
    /// Recalled comfortably (review); early removal (learning).
    Good = 3,
    /// Recalled effortlessly; reviews only.
    Easy = 4,
}

impl Ease {
    /// Validate a grade for a mature review (1..=4).
    pub fn for_review(value: u8) -> Result<Ease, EaseError> {
        Ease::from_u8(value).ok_or(EaseError::OutOfRange {
            value,
            context: "review",
        })
    }

    /// Validate a grade for a learning step (1..=3).
    pub fn for_learning(value: u8) -> Result<Ease, EaseError> {
        match Ease::from_u8(value) {
            Some(Ease::Easy) | None => Err(EaseError::OutOfRange {
                value,
                context: "learning",
            }),
            Some(ease) => Ok(ease),
        }
    }

    fn from_u8(value: u8) -> Option<Ease> {
        match value {
            1 => Some(Ease::Again),
            2 => Some(Ease::Hard),
            3 => Some(Ease::Good),
            4 => Some(Ease::Easy),
            _ => None,
        }
    }

    /// The numeric grade code.
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Grade rejected for the queue it was submitted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EaseError {
    #[error("ease {value} out of range for a {context} answer")]
    OutOfRange { value: u8, context: &'static str },
}

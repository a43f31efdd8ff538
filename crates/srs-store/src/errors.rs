//! Error types surfaced by deck stores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying store rejected a query; the session cannot continue.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// A legacy store lacks a column or code the scheduler expects.
    /// Startup treats this as recoverable.
    #[error("schema out of date: {0}")]
    SchemaOutOfDate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::StoreError;

    #[test]
    fn errors_display_their_detail() {
        let err = StoreError::Unavailable("disk gone".into());
        assert!(err.to_string().contains("disk gone"));
        let err = StoreError::SchemaOutOfDate("no buried queue".into());
        assert!(err.to_string().contains("no buried queue"));
    }
}

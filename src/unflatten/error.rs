use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnflattenError {
    /// Raised in strict mode only. Points at the aggregation query, not at
    /// the caller, so it is never retried.
    #[error(
        "Data mismatch: all pipe-separated fields must have the same number of elements \
         ('{column}' has {actual}, '{anchor}' has {expected})"
    )]
    DataMismatch {
        anchor: String,
        column: String,
        expected: usize,
        actual: usize,
    },
}

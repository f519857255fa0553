use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the store layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An update referenced an id with no matching record.
    #[error("{kind} not found")]
    NotFound { kind: &'static str, id: Uuid },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

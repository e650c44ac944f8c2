//! Collection errors

use crate::value::Kind;
use thiserror::Error;

/// Errors raised by collection operations
///
/// No operation mutates a collection before returning one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The value's kind can never be stored
    #[error("{kind} is not a supported element type")]
    InvalidType { kind: Kind },

    /// The value's kind differs from the collection's locked kind
    #[error("invalid value type: expected {expected}, found {found}")]
    InvalidKind { expected: Kind, found: Kind },

    /// Two sets are locked to different kinds
    #[error("mismatched data types among sets: {left} and {right}")]
    MismatchedKind { left: Kind, right: Kind },

    #[error("invalid operation as {collection} is empty")]
    EmptyCollection { collection: &'static str },

    /// A bulk count is negative or larger than the collection
    #[error("invalid count ({requested}) for {collection} of size {available}")]
    InvalidCount {
        collection: &'static str,
        requested: isize,
        available: usize,
    },
}

/// Result type for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;

impl CollectionError {
    pub(crate) fn count(collection: &'static str, requested: usize, available: usize) -> Self {
        CollectionError::InvalidCount {
            collection,
            requested: isize::try_from(requested).unwrap_or(isize::MAX),
            available,
        }
    }
}

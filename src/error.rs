use super::*;

use crate::script::Kind;

pub type Result<T, E = MarshalError> = std::result::Result<T, E>;

/// A conversion that was aborted before producing any value.
///
/// The `Display` text reads like a script-level argument error so hosts can
/// raise it verbatim.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarshalError {
    /// The argument at 1-based stack `position` has the wrong kind.
    #[error("bad argument #{position} ({expected} expected, got {actual})")]
    TypeMismatch {
        position: usize,
        expected: Kind,
        actual:   Kind,
    },

    /// Element `index` (1-based) of a sequence being encoded is not a number.
    #[error("bad element #{index} in table ({expected} expected, got {actual})")]
    ElementTypeMismatch {
        index:    usize,
        expected: Kind,
        actual:   Kind,
    },
}

impl MarshalError {
    pub fn type_mismatch(position: usize, expected: Kind, actual: Kind) -> Self {
        MarshalError::TypeMismatch { position, expected, actual }
    }

    /// Stack position or element index the error points at.
    pub fn index(&self) -> usize {
        match *self {
            MarshalError::TypeMismatch { position, .. } => position,
            MarshalError::ElementTypeMismatch { index, .. } => index,
        }
    }
}

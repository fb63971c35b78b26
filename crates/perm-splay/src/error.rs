//! Precondition errors for [`SeqTree`](crate::SeqTree) operations.
//!
//! Every check runs before the tree is split, so a rejected call leaves the
//! sequence exactly as it was.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeqError {
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("range operation on an empty sequence")]
    EmptyRangeOnEmptyTree,
    #[error("range begin {begin} is past range end {end}")]
    InvertedRange { begin: usize, end: usize },
}

/// Checks an inclusive `[begin, end]` range against a sequence of `len`.
pub(crate) fn check_range(begin: usize, end: usize, len: usize) -> Result<(), SeqError> {
    if len == 0 {
        return Err(SeqError::EmptyRangeOnEmptyTree);
    }
    if begin > end {
        return Err(SeqError::InvertedRange { begin, end });
    }
    if end >= len {
        return Err(SeqError::IndexOutOfRange { index: end, len });
    }
    Ok(())
}

/// Checks a single existing position.
pub(crate) fn check_position(pos: usize, len: usize) -> Result<(), SeqError> {
    if len == 0 {
        return Err(SeqError::EmptyRangeOnEmptyTree);
    }
    if pos >= len {
        return Err(SeqError::IndexOutOfRange { index: pos, len });
    }
    Ok(())
}

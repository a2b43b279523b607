use thiserror::Error;

use crate::MIN_SELECTION_CHARS;

/// Rejections raised before any network or storage call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(
        "selection too short: {actual} characters, at least {min} required",
        min = MIN_SELECTION_CHARS
    )]
    SelectionTooShort { actual: usize },
    #[error("notes are empty")]
    EmptyNotes,
    #[error("unknown operation '{0}' (expected summarize, suggest, explain or keypoints)")]
    UnknownOperation(String),
}

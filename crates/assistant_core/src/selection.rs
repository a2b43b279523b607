use crate::{OperationKind, ValidationError};

/// Minimum number of characters a trimmed selection must contain.
pub const MIN_SELECTION_CHARS: usize = 10;

/// Text shown in the result area when a selection is rejected.
pub const SELECTION_TOO_SHORT_HINT: &str =
    "Please select meaningful text (at least 10 characters)";

/// A validated request for the dispatcher.
///
/// The content is kept exactly as selected; only the length check looks at
/// the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    content: String,
    operation: OperationKind,
}

impl SelectionRequest {
    pub fn new(
        content: impl Into<String>,
        operation: OperationKind,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        let actual = content.trim().chars().count();
        if actual < MIN_SELECTION_CHARS {
            return Err(ValidationError::SelectionTooShort { actual });
        }
        Ok(Self { content, operation })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }
}

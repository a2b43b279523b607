use crate::{OperationKind, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Persisted notes were read at start-up.
    NotesLoaded(Option<String>),
    /// User edited the notes buffer.
    NotesEdited(String),
    /// User asked for an operation on the current selection.
    OperationTriggered {
        operation: OperationKind,
        selection: String,
    },
    /// The dispatcher resolved a request, successfully or not.
    ProcessingFinished {
        request_id: RequestId,
        outcome: Result<String, String>,
        completed_at: String,
    },
    /// User clicked Save.
    SaveClicked,
    /// The notes slot now holds `value`.
    NotesSaved { value: String },
    /// User clicked Clear.
    ClearClicked,
    /// User confirmed and the notes slot was removed.
    NotesCleared,
    /// User declined the clear confirmation.
    ClearCancelled,
    /// User clicked Export.
    ExportClicked,
    /// Export artifact written.
    NotesExported { filename: String },
    /// A storage or export operation failed.
    StorageFailed { message: String },
}

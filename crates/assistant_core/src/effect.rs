use crate::{RequestId, SelectionRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch {
        request_id: RequestId,
        request: SelectionRequest,
    },
    SaveNotes {
        value: String,
    },
    /// Ask the user before removing the notes slot.
    ConfirmClear {
        buffer: String,
    },
    ExportNotes {
        value: String,
    },
}

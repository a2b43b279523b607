use crate::view_model::{AppViewModel, ResultView, StatusTone};
use crate::OperationKind;

pub type RequestId = u64;

/// Interaction state of the panel. Only `update` moves between these.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    InFlight {
        request_id: RequestId,
        operation: OperationKind,
    },
    Success {
        message: String,
    },
    Error {
        message: String,
    },
}

impl Status {
    pub fn label(&self) -> &str {
        match self {
            Status::Idle => "Ready",
            Status::InFlight { .. } => "Processing...",
            Status::Success { message } | Status::Error { message } => message,
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Status::Idle => StatusTone::Idle,
            Status::InFlight { .. } => StatusTone::Loading,
            Status::Success { .. } => StatusTone::Success,
            Status::Error { .. } => StatusTone::Error,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Status::InFlight { .. })
    }
}

/// The single result currently on display. A new one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    pub content: String,
    pub operation: Option<OperationKind>,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    status: Status,
    result: Option<ProcessingResult>,
    notes_buffer: String,
    stored_notes: Option<String>,
    clear_pending: bool,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn result(&self) -> Option<&ProcessingResult> {
        self.result.as_ref()
    }

    pub fn notes_buffer(&self) -> &str {
        &self.notes_buffer
    }

    pub fn stored_notes(&self) -> Option<&str> {
        self.stored_notes.as_deref()
    }

    pub fn is_clear_pending(&self) -> bool {
        self.clear_pending
    }

    pub fn has_notes(&self) -> bool {
        !self.notes_buffer.trim().is_empty()
    }

    pub fn view(&self) -> AppViewModel {
        let result = self.result.as_ref().map(|result| ResultView {
            content: result.content.clone(),
            meta: result_meta(result),
        });
        AppViewModel {
            status_text: self.status.label().to_string(),
            status_tone: self.status.tone(),
            operations_enabled: !self.status.is_in_flight(),
            notes_actions_enabled: self.has_notes() && !self.clear_pending,
            result,
            notes: self.notes_buffer.clone(),
            notes_unsaved: self.stored_notes.as_deref().unwrap_or("") != self.notes_buffer,
        }
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
        self.dirty = true;
    }

    pub(crate) fn show_result(&mut self, result: ProcessingResult) {
        self.result = Some(result);
        self.dirty = true;
    }

    pub(crate) fn begin_request(&mut self, operation: OperationKind) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.set_status(Status::InFlight {
            request_id,
            operation,
        });
        request_id
    }

    pub(crate) fn in_flight_request(&self) -> Option<RequestId> {
        match self.status {
            Status::InFlight { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    pub(crate) fn restore_notes(&mut self, stored: Option<String>) {
        self.notes_buffer = stored.clone().unwrap_or_default();
        self.stored_notes = stored;
        self.dirty = true;
    }

    pub(crate) fn edit_notes(&mut self, buffer: String) {
        if self.notes_buffer != buffer {
            self.notes_buffer = buffer;
            self.dirty = true;
        }
    }

    pub(crate) fn mark_saved(&mut self, value: String) {
        self.stored_notes = Some(value);
        self.dirty = true;
    }

    pub(crate) fn set_clear_pending(&mut self, pending: bool) {
        self.clear_pending = pending;
        self.dirty = true;
    }

    pub(crate) fn mark_cleared(&mut self) {
        self.notes_buffer.clear();
        self.stored_notes = None;
        self.clear_pending = false;
        self.dirty = true;
    }
}

fn result_meta(result: &ProcessingResult) -> String {
    match (result.operation, result.completed_at.as_deref()) {
        (Some(operation), Some(at)) => format!("{operation} | {at}"),
        (Some(operation), None) => operation.to_string(),
        (None, Some(at)) => at.to_string(),
        (None, None) => String::new(),
    }
}

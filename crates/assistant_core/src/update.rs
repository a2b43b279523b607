use crate::{
    AppState, Effect, Msg, ProcessingResult, SelectionRequest, Status, SELECTION_TOO_SHORT_HINT,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::NotesLoaded(stored) => {
            state.restore_notes(stored);
            Vec::new()
        }
        Msg::NotesEdited(buffer) => {
            state.edit_notes(buffer);
            Vec::new()
        }
        Msg::OperationTriggered {
            operation,
            selection,
        } => {
            // One request per surface: triggers are dead while in flight.
            if state.status().is_in_flight() {
                return (state, Vec::new());
            }
            match SelectionRequest::new(selection, operation) {
                Ok(request) => {
                    let request_id = state.begin_request(operation);
                    vec![Effect::Dispatch {
                        request_id,
                        request,
                    }]
                }
                Err(_) => {
                    state.show_result(ProcessingResult {
                        content: SELECTION_TOO_SHORT_HINT.to_string(),
                        operation: None,
                        completed_at: None,
                    });
                    state.set_status(Status::Error {
                        message: "Selection too short".to_string(),
                    });
                    Vec::new()
                }
            }
        }
        Msg::ProcessingFinished {
            request_id,
            outcome,
            completed_at,
        } => {
            let current = state.in_flight_request() == Some(request_id);
            let operation = match state.status() {
                Status::InFlight { operation, .. } if current => Some(*operation),
                _ => None,
            };
            // Last completion wins the result area, even for a stale request.
            let status = match outcome {
                Ok(content) => {
                    state.show_result(ProcessingResult {
                        content,
                        operation,
                        completed_at: Some(completed_at),
                    });
                    Status::Success {
                        message: "Completed".to_string(),
                    }
                }
                Err(message) => {
                    state.show_result(ProcessingResult {
                        content: format!("Error: {message}"),
                        operation: None,
                        completed_at: Some(completed_at),
                    });
                    Status::Error {
                        message: "Failed".to_string(),
                    }
                }
            };
            if current {
                state.set_status(status);
            }
            Vec::new()
        }
        Msg::SaveClicked => match notes_to_act_on(&mut state) {
            Some(value) => vec![Effect::SaveNotes { value }],
            None => Vec::new(),
        },
        Msg::NotesSaved { value } => {
            state.mark_saved(value);
            state.set_status(Status::Success {
                message: "Notes saved".to_string(),
            });
            Vec::new()
        }
        Msg::ClearClicked => {
            if state.is_clear_pending() {
                return (state, Vec::new());
            }
            match notes_to_act_on(&mut state) {
                Some(buffer) => {
                    state.set_clear_pending(true);
                    vec![Effect::ConfirmClear { buffer }]
                }
                None => Vec::new(),
            }
        }
        Msg::NotesCleared => {
            state.mark_cleared();
            state.set_status(Status::Success {
                message: "Notes cleared".to_string(),
            });
            Vec::new()
        }
        Msg::ClearCancelled => {
            state.set_clear_pending(false);
            Vec::new()
        }
        Msg::ExportClicked => match notes_to_act_on(&mut state) {
            Some(value) => vec![Effect::ExportNotes { value }],
            None => Vec::new(),
        },
        Msg::NotesExported { filename } => {
            state.set_status(Status::Success {
                message: format!("Notes exported to {filename}"),
            });
            Vec::new()
        }
        Msg::StorageFailed { message } => {
            state.set_clear_pending(false);
            state.set_status(Status::Error {
                message: format!("Storage error: {message}"),
            });
            Vec::new()
        }
    };

    (state, effects)
}

/// Returns the notes buffer for save/clear/export, or flags the state when it is blank.
fn notes_to_act_on(state: &mut AppState) -> Option<String> {
    if state.has_notes() {
        Some(state.notes_buffer().to_string())
    } else {
        state.set_status(Status::Error {
            message: "Notes are empty".to_string(),
        });
        None
    }
}

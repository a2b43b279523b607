use std::collections::VecDeque;
use std::time::{Duration, Instant};

use assistant_core::{update, AppState, AppViewModel, Msg, Status};
use assistant_engine::{
    take_pending_selection, KeyValueStore, NotesError, PendingSelection, StorageError,
};
use assistant_logging::{assistant_debug, assistant_warn};

use super::effects::EffectRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One interactive surface: owns the state and feeds effects back as messages.
pub struct Panel<S> {
    state: AppState,
    runner: EffectRunner<S>,
    /// Upper bound on waiting for the engine; the dispatcher's own timeout fires first.
    response_deadline: Duration,
}

impl<S: KeyValueStore> Panel<S> {
    pub fn new(runner: EffectRunner<S>, response_deadline: Duration) -> Self {
        Self {
            state: AppState::new(),
            runner,
            response_deadline,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Reads the persisted notes into the buffer.
    pub fn load_notes(&mut self) -> Result<AppViewModel, NotesError> {
        let stored = self.runner.notes().load()?;
        self.dispatch(Msg::NotesLoaded(stored));
        Ok(self.state.view())
    }

    /// Consumes a selection parked by `capture`, if any.
    pub fn take_pending_selection(&self) -> Result<Option<PendingSelection>, StorageError> {
        take_pending_selection(self.runner.notes().storage())
    }

    /// Applies `msg` and every message its effects produce.
    /// Returns the view when anything changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            assistant_debug!("dispatch {}", msg_name(&msg));
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if let Some(follow_up) = self.runner.run(effect) {
                    inbox.push_back(follow_up);
                }
            }
        }

        if self.state.consume_dirty() {
            Some(self.state.view())
        } else {
            None
        }
    }

    /// Blocks until no request is in flight.
    pub fn wait_until_settled(&mut self) -> Option<AppViewModel> {
        let started = Instant::now();
        let mut latest = None;
        while let Status::InFlight { request_id, .. } = *self.state.status() {
            let msg = match self.runner.next_completion(POLL_INTERVAL) {
                Some(msg) => msg,
                None if started.elapsed() < self.response_deadline => continue,
                None => {
                    assistant_warn!("No completion for request {} in time", request_id);
                    Msg::ProcessingFinished {
                        request_id,
                        outcome: Err("no response from engine".to_string()),
                        completed_at: chrono::Local::now().format("%H:%M:%S").to_string(),
                    }
                }
            };
            if let Some(view) = self.dispatch(msg) {
                latest = Some(view);
            }
        }
        latest
    }
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::NotesLoaded(_) => "NotesLoaded",
        Msg::NotesEdited(_) => "NotesEdited",
        Msg::OperationTriggered { .. } => "OperationTriggered",
        Msg::ProcessingFinished { .. } => "ProcessingFinished",
        Msg::SaveClicked => "SaveClicked",
        Msg::NotesSaved { .. } => "NotesSaved",
        Msg::ClearClicked => "ClearClicked",
        Msg::NotesCleared => "NotesCleared",
        Msg::ClearCancelled => "ClearCancelled",
        Msg::ExportClicked => "ExportClicked",
        Msg::NotesExported { .. } => "NotesExported",
        Msg::StorageFailed { .. } => "StorageFailed",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use std::path::PathBuf;

    use assistant_core::{OperationKind, SelectionRequest, StatusTone};
    use assistant_engine::{
        export_filename, Dispatcher, EngineHandle, MemoryKeyValueStore, NotesStore,
        ProcessingError,
    };
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;
    use crate::platform::effects::AutoConfirm;

    struct FixedDispatcher(Result<&'static str, ProcessingError>);

    #[async_trait::async_trait]
    impl Dispatcher for FixedDispatcher {
        async fn process(&self, _request: &SelectionRequest) -> Result<String, ProcessingError> {
            self.0.clone().map(str::to_string)
        }
    }

    fn panel(
        answer: Result<&'static str, ProcessingError>,
        confirm: bool,
    ) -> Panel<MemoryKeyValueStore> {
        panel_exporting_to(answer, confirm, std::env::temp_dir())
    }

    fn panel_exporting_to(
        answer: Result<&'static str, ProcessingError>,
        confirm: bool,
        export_dir: PathBuf,
    ) -> Panel<MemoryKeyValueStore> {
        let engine = EngineHandle::with_dispatcher(Arc::new(FixedDispatcher(answer)));
        let notes = NotesStore::new(MemoryKeyValueStore::new());
        let runner = EffectRunner::new(engine, notes, export_dir, Box::new(AutoConfirm(confirm)));
        Panel::new(runner, Duration::from_secs(5))
    }

    fn trigger(operation: OperationKind) -> Msg {
        Msg::OperationTriggered {
            operation,
            selection: "This is a sufficiently long selection of text.".to_string(),
        }
    }

    #[test]
    fn request_round_trip_reaches_completed() {
        let mut panel = panel(Ok("A short summary."), true);

        let view = panel.dispatch(trigger(OperationKind::Summarize)).unwrap();
        assert_eq!(view.status_tone, StatusTone::Loading);
        assert!(!view.operations_enabled);

        let view = panel.wait_until_settled().unwrap();
        assert_eq!(view.status_text, "Completed");
        assert_eq!(view.result.unwrap().content, "A short summary.");
    }

    #[test]
    fn server_failure_shows_failed_and_keeps_notes() {
        let mut panel = panel(Err(ProcessingError::Api { status: 500 }), true);
        panel.dispatch(Msg::NotesEdited("draft".to_string()));
        panel.dispatch(Msg::SaveClicked);

        panel.dispatch(trigger(OperationKind::Explain));
        let view = panel.wait_until_settled().unwrap();

        assert_eq!(view.status_text, "Failed");
        assert_eq!(view.result.unwrap().content, "Error: API Error: 500");
        assert_eq!(panel.load_notes().unwrap().notes, "draft");
    }

    #[test]
    fn declined_clear_keeps_saved_notes() {
        let mut panel = panel(Ok("unused"), false);
        panel.dispatch(Msg::NotesEdited("keep me".to_string()));
        panel.dispatch(Msg::SaveClicked);

        panel.dispatch(Msg::ClearClicked);

        assert!(!panel.state().is_clear_pending());
        assert_eq!(panel.state().stored_notes(), Some("keep me"));
        assert_eq!(panel.load_notes().unwrap().notes, "keep me");
    }

    #[test]
    fn confirmed_clear_removes_saved_notes() {
        let mut panel = panel(Ok("unused"), true);
        panel.dispatch(Msg::NotesEdited("remove me".to_string()));
        panel.dispatch(Msg::SaveClicked);

        let view = panel.dispatch(Msg::ClearClicked).unwrap();

        assert_eq!(view.status_text, "Notes cleared");
        assert_eq!(panel.load_notes().unwrap().notes, "");
        assert_eq!(panel.state().stored_notes(), None);
    }

    #[test]
    fn ignored_trigger_reports_no_change() {
        let mut panel = panel(Ok("A short summary."), true);
        panel.dispatch(trigger(OperationKind::Summarize)).unwrap();

        assert!(panel.dispatch(trigger(OperationKind::Explain)).is_none());

        panel.wait_until_settled();
    }

    #[test]
    fn export_writes_file_named_by_utc_date() {
        let temp = TempDir::new().unwrap();
        let mut panel = panel_exporting_to(Ok("unused"), true, temp.path().to_path_buf());
        panel.dispatch(Msg::NotesEdited("notes".to_string()));

        let before = Utc::now().date_naive();
        let view = panel.dispatch(Msg::ExportClicked).unwrap();
        let after = Utc::now().date_naive();

        let written: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(
            written[0] == export_filename(before) || written[0] == export_filename(after),
            "unexpected export file {}",
            written[0]
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join(&written[0])).unwrap(),
            "notes"
        );
        assert_eq!(view.status_tone, StatusTone::Success);
        assert!(view.status_text.starts_with("Notes exported to "));
        assert_eq!(panel.state().stored_notes(), None);
    }
}

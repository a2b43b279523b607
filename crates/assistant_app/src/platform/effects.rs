use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use assistant_core::{Effect, Msg};
use assistant_engine::{EngineEvent, EngineHandle, KeyValueStore, NotesStore};
use assistant_logging::{assistant_info, assistant_warn};
use chrono::{Local, Utc};

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Prompts on stderr and reads one line from stdin; anything but y/yes declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Fixed answer, for `--yes` and tests.
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Executes core effects against the engine, the notes store and the user.
pub struct EffectRunner<S> {
    engine: EngineHandle,
    notes: NotesStore<S>,
    export_dir: PathBuf,
    confirmer: Box<dyn Confirm>,
}

impl<S: KeyValueStore> EffectRunner<S> {
    pub fn new(
        engine: EngineHandle,
        notes: NotesStore<S>,
        export_dir: PathBuf,
        confirmer: Box<dyn Confirm>,
    ) -> Self {
        Self {
            engine,
            notes,
            export_dir,
            confirmer,
        }
    }

    pub fn notes(&self) -> &NotesStore<S> {
        &self.notes
    }

    /// Runs one effect. Storage effects finish synchronously and report back
    /// with a message; dispatches report through [`Self::next_completion`].
    pub fn run(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::Dispatch {
                request_id,
                request,
            } => {
                assistant_info!(
                    "Dispatch request_id={} operation={}",
                    request_id,
                    request.operation()
                );
                self.engine.process(request_id, request);
                None
            }
            Effect::SaveNotes { value } => Some(match self.notes.save(&value) {
                Ok(()) => Msg::NotesSaved { value },
                Err(err) => storage_failed(err),
            }),
            Effect::ConfirmClear { buffer } => Some(self.confirm_and_clear(&buffer)),
            Effect::ExportNotes { value } => {
                // Export files are named by the UTC calendar date.
                let today = Utc::now().date_naive();
                Some(match self.notes.export(&value, &self.export_dir, today) {
                    Ok(artifact) => Msg::NotesExported {
                        filename: artifact.path.display().to_string(),
                    },
                    Err(err) => storage_failed(err),
                })
            }
        }
    }

    fn confirm_and_clear(&mut self, buffer: &str) -> Msg {
        let token = match self.notes.request_clear(buffer) {
            Ok(token) => token,
            Err(err) => return storage_failed(err),
        };
        if !self
            .confirmer
            .confirm("Are you sure you want to clear all notes?")
        {
            return Msg::ClearCancelled;
        }
        match self.notes.clear(token) {
            Ok(()) => Msg::NotesCleared,
            Err(err) => storage_failed(err),
        }
    }

    /// Waits up to `timeout` for a dispatch to resolve.
    pub fn next_completion(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(completion_msg)
    }
}

fn completion_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProcessCompleted { request_id, result } => Msg::ProcessingFinished {
            request_id,
            outcome: result.map_err(|err| err.to_string()),
            completed_at: Local::now().format("%H:%M:%S").to_string(),
        },
    }
}

fn storage_failed(err: impl std::fmt::Display) -> Msg {
    assistant_warn!("Notes operation failed: {}", err);
    Msg::StorageFailed {
        message: err.to_string(),
    }
}

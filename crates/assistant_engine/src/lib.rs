//! Research assistant engine: HTTP dispatch, storage and export.
mod dispatch;
mod engine;
mod export;
mod notes;
mod pending;
mod persist;
mod service;
mod storage;
mod types;

pub use dispatch::{DispatchSettings, Dispatcher, ReqwestDispatcher, PROCESS_PATH};
pub use engine::EngineHandle;
pub use export::{export_filename, export_notes, ExportArtifact, ExportError};
pub use notes::{ClearToken, NotesError, NotesStore, NOTES_KEY};
pub use pending::{park_selection, take_pending_selection, PendingSelection, PENDING_SELECTION_KEY};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use service::{ServiceClient, ServiceError, UsageStats};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError, STORAGE_FILENAME};
pub use types::{EngineEvent, ProcessingError};

use std::path::Path;

use assistant_core::ValidationError;
use assistant_logging::assistant_info;
use chrono::NaiveDate;
use thiserror::Error;

use crate::export::{export_notes, ExportArtifact, ExportError};
use crate::{KeyValueStore, StorageError};

/// Storage key of the notes slot.
pub const NOTES_KEY: &str = "researchNotes";

#[derive(Debug, Error)]
pub enum NotesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Proof that a clear was requested on a non-empty buffer.
///
/// Only [`NotesStore::request_clear`] mints one and [`NotesStore::clear`]
/// consumes it. Dropping it is how a declined confirmation is expressed.
#[derive(Debug)]
#[must_use = "dropping the token cancels the clear"]
pub struct ClearToken {
    _private: (),
}

/// The single persisted notes slot.
#[derive(Debug)]
pub struct NotesStore<S> {
    storage: S,
}

impl<S: KeyValueStore> NotesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load(&self) -> Result<Option<String>, NotesError> {
        Ok(self.storage.get(NOTES_KEY)?)
    }

    /// Overwrites the slot. Blank values are rejected and leave the slot as it was.
    pub fn save(&self, value: &str) -> Result<(), NotesError> {
        require_notes(value)?;
        self.storage.set(NOTES_KEY, value)?;
        assistant_info!("Saved notes ({} chars)", value.chars().count());
        Ok(())
    }

    /// First half of a clear; `buffer` is what the user is looking at.
    pub fn request_clear(&self, buffer: &str) -> Result<ClearToken, NotesError> {
        require_notes(buffer)?;
        Ok(ClearToken { _private: () })
    }

    pub fn clear(&self, token: ClearToken) -> Result<(), NotesError> {
        let ClearToken { _private: () } = token;
        self.storage.remove(NOTES_KEY)?;
        assistant_info!("Cleared notes");
        Ok(())
    }

    /// Copies `value` into an export file. The slot is never read or written.
    pub fn export(
        &self,
        value: &str,
        dir: &Path,
        date: NaiveDate,
    ) -> Result<ExportArtifact, NotesError> {
        require_notes(value)?;
        Ok(export_notes(dir, value, date)?)
    }
}

fn require_notes(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyNotes);
    }
    Ok(())
}

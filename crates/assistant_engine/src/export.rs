use std::path::{Path, PathBuf};

use assistant_logging::assistant_info;
use chrono::NaiveDate;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// `research-notes-YYYY-MM-DD.txt`
pub fn export_filename(date: NaiveDate) -> String {
    format!("research-notes-{}.txt", date.format("%Y-%m-%d"))
}

/// Writes the raw notes to `{dir}/research-notes-<date>.txt`, replacing an export from the same day.
pub fn export_notes(dir: &Path, notes: &str, date: NaiveDate) -> Result<ExportArtifact, ExportError> {
    let filename = export_filename(date);
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    let path = writer.write(&filename, notes)?;
    assistant_info!("Exported {} bytes of notes to {:?}", notes.len(), path);
    Ok(ExportArtifact {
        filename,
        path,
        bytes: notes.len() as u64,
    })
}

use assistant_core::OperationKind;
use assistant_logging::{assistant_info, assistant_warn};
use serde::{Deserialize, Serialize};

use crate::{KeyValueStore, StorageError};

/// Storage key of the quick-action hand-off.
pub const PENDING_SELECTION_KEY: &str = "pendingSelection";

/// A selection captured outside the panel, waiting to be processed when it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSelection {
    pub text: String,
    pub operation: OperationKind,
}

pub fn park_selection<S: KeyValueStore + ?Sized>(
    storage: &S,
    selection: &PendingSelection,
) -> Result<(), StorageError> {
    let encoded = serde_json::to_string(selection)
        .map_err(|err| StorageError::Serialize(err.to_string()))?;
    storage.set(PENDING_SELECTION_KEY, &encoded)?;
    assistant_info!(
        "Parked {} selection ({} chars)",
        selection.operation,
        selection.text.chars().count()
    );
    Ok(())
}

/// Reads and removes the pending selection. An unreadable entry is dropped.
pub fn take_pending_selection<S: KeyValueStore + ?Sized>(
    storage: &S,
) -> Result<Option<PendingSelection>, StorageError> {
    let Some(raw) = storage.get(PENDING_SELECTION_KEY)? else {
        return Ok(None);
    };
    storage.remove(PENDING_SELECTION_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(selection) => Ok(Some(selection)),
        Err(err) => {
            assistant_warn!("Discarding unreadable pending selection: {}", err);
            Ok(None)
        }
    }
}

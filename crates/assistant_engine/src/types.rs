use assistant_core::RequestId;
use thiserror::Error;

/// Failure of a single call to the research service. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    /// The service answered with a non-2xx status.
    #[error("API Error: {status}")]
    Api { status: u16 },
    /// The request never produced a response (refused, DNS, timeout, bad URL).
    #[error("{message}")]
    Transport { message: String },
}

impl ProcessingError {
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProcessCompleted {
        request_id: RequestId,
        result: Result<String, ProcessingError>,
    },
}

//! Research assistant core: pure state machine, selection validation and view-model helpers.
mod effect;
mod error;
mod msg;
mod operation;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::ValidationError;
pub use msg::Msg;
pub use operation::OperationKind;
pub use selection::{SelectionRequest, MIN_SELECTION_CHARS, SELECTION_TOO_SHORT_HINT};
pub use state::{AppState, ProcessingResult, RequestId, Status};
pub use update::update;
pub use view_model::{AppViewModel, ResultView, StatusTone};

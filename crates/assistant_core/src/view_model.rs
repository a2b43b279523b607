#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status_text: String,
    pub status_tone: StatusTone,
    /// The four operation controls; disabled while a request is in flight.
    pub operations_enabled: bool,
    /// Save, clear and export; disabled while the buffer is blank.
    pub notes_actions_enabled: bool,
    pub result: Option<ResultView>,
    pub notes: String,
    pub notes_unsaved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub content: String,
    /// `"<operation> | <time>"`, or whichever half is known.
    pub meta: String,
}

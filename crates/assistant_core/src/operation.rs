use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Text operation requested from the research service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Summarize,
    Suggest,
    Explain,
    Keypoints,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Summarize,
        OperationKind::Suggest,
        OperationKind::Explain,
        OperationKind::Keypoints,
    ];

    /// Name used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Summarize => "summarize",
            OperationKind::Suggest => "suggest",
            OperationKind::Explain => "explain",
            OperationKind::Keypoints => "keypoints",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Summarize => "Summarize",
            OperationKind::Suggest => "Suggest",
            OperationKind::Explain => "Explain",
            OperationKind::Keypoints => "Key Points",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OperationKind::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownOperation(wanted.to_string()))
    }
}

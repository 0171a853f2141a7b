use nx_meta_core::TidError;
use thiserror::Error;

use crate::links::DraftId;
use crate::types::EntryKind;
use crate::validate::{IdRule, Violation};

/// Errors that can occur while importing, editing or exporting a document.
///
/// None of these are fatal: the caller's document is left as it was.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The base title ID is not 16 hex digits ending with 000
    #[error("Invalid base ID '{0}': must be 16 hexadecimal characters ending with 000")]
    InvalidBaseId(String),

    /// A DLC title ID breaks an identifier rule
    #[error("Invalid DLC ID '{id}': {rule}")]
    InvalidDlcId { id: String, rule: IdRule },

    /// An update title ID breaks an identifier rule
    #[error("Invalid update ID '{id}': {rule}")]
    InvalidUpdateId { id: String, rule: IdRule },

    /// The imported file is not JSON, or not a JSON object
    #[error("Malformed import JSON: {0}")]
    MalformedImportJson(#[source] serde_json::Error),

    /// The import file name is not `<base TID>.json`
    #[error("Invalid TID in filename '{0}': must be 16 hexadecimal characters ending with 000")]
    FilenameTidMismatch(String),

    /// An edit addressed an entry that does not exist
    #[error("No {kind} at index {index}")]
    EntryNotFound { kind: EntryKind, index: usize },

    /// Links were requested for a DLC pack the document does not have
    #[error("Document has no DLC pack")]
    NoDlcPack,

    /// A link draft id that is not (or no longer) pending
    #[error("Unknown link draft: {0}")]
    UnknownDraft(DraftId),

    /// Identifier derivation failed
    #[error(transparent)]
    Tid(#[from] TidError),

    /// I/O error while reading or writing a document file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The document could not be serialized
    #[error("JSON serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl DocumentError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from document validation.
    pub fn is_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidBaseId(_) | Self::InvalidDlcId { .. } | Self::InvalidUpdateId { .. }
        )
    }
}

impl From<Violation> for DocumentError {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::InvalidBaseId(id) => Self::InvalidBaseId(id),
            Violation::InvalidDlcId { id, rule } => Self::InvalidDlcId { id, rule },
            Violation::InvalidUpdateId { id, rule } => Self::InvalidUpdateId { id, rule },
        }
    }
}

use nx_meta_core::TidError;
use nx_meta_document::DocumentError;
use nx_meta_lib::SettingsError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Import, edit or export failed
    #[error("{0}")]
    Document(#[from] DocumentError),

    /// Identifier derivation failed
    #[error("{0}")]
    Tid(#[from] TidError),

    /// Settings could not be saved
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// `check` found problems
    #[error("{0} validation error(s)")]
    Invalid(usize),
}

use thiserror::Error;

/// Errors that can occur while saving editor settings.
///
/// Loading never fails: a missing or unreadable file yields defaults.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error while writing the settings file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The settings could not be rendered as TOML
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl SettingsError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

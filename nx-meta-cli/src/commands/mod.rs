pub(crate) mod config;
pub(crate) mod document;
pub(crate) mod edit;

use nx_meta_document::ValidationMode;
use nx_meta_lib::EditorSettings;

/// Settings and flags shared by every command.
pub(crate) struct CliContext {
    pub settings: EditorSettings,
    /// Saved mode, unless overridden by `--strict` / `--legacy`.
    pub mode: ValidationMode,
}

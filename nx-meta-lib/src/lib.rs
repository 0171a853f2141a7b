//! Shared editor state: persisted settings and the editing session.
//!
//! Frontends go through these types so the settings file location and the
//! import/edit/export rules are the same everywhere.

pub mod error;
pub mod session;
pub mod settings;

pub use error::SettingsError;
pub use session::EditingSession;
pub use settings::{EditorSettings, ExportSettings, ValidationSettings};

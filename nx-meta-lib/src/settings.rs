//! Editor settings (validation mode, export directory).
//!
//! Stored as `~/.config/nx-meta/settings.toml`. Every field has a default,
//! so a partial or missing file is fine.

use std::path::{Path, PathBuf};

use nx_meta_document::ValidationMode;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EditorSettings {
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidationSettings {
    #[serde(default)]
    pub mode: ValidationMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExportSettings {
    /// Where exported documents go when no directory is given.
    pub output_dir: Option<PathBuf>,
}

/// Returns `~/.config/nx-meta/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("nx-meta").join("settings.toml")
}

/// Load settings from the default location.
pub fn load_settings() -> EditorSettings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, returning defaults if missing or corrupt.
pub fn load_settings_from(path: &Path) -> EditorSettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            EditorSettings::default()
        }),
        Err(_) => EditorSettings::default(),
    }
}

pub fn save_settings(settings: &EditorSettings) -> Result<(), SettingsError> {
    save_settings_to(settings, &settings_path())
}

/// Save settings to `path` atomically (write to temp, then rename).
pub fn save_settings_to(settings: &EditorSettings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| SettingsError::io(parent.display().to_string(), e))?;
    }
    let contents = toml::to_string_pretty(settings)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents).map_err(|e| SettingsError::io(tmp.display().to_string(), e))?;
    std::fs::rename(&tmp, path).map_err(|e| SettingsError::io(path.display().to_string(), e))?;
    Ok(())
}

/// Resolve the export directory using a priority chain:
///
/// 1. Explicit override (if `Some`)
/// 2. Saved `export.output_dir`
/// 3. `fallback`
pub fn resolve_output_dir(
    cli_override: Option<PathBuf>,
    settings: &EditorSettings,
    fallback: &Path,
) -> PathBuf {
    cli_override
        .or_else(|| settings.export.output_dir.clone())
        .unwrap_or_else(|| fallback.to_path_buf())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;

//! Import and export of document files.
//!
//! A document file is named after its base title ID (`<BASE TID>.json`).
//! Import takes the base ID from the file name, not from the payload.
//! Export validates first and writes nothing if any check fails.

use std::path::{Path, PathBuf};

use nx_meta_core::tid;
use serde_json::Value;

use crate::error::DocumentError;
use crate::normalize::ImportPayload;
use crate::types::GameDocument;
use crate::validate::{ValidationMode, ensure_valid};

const JSON_EXTENSION: &str = ".json";

/// Base title ID encoded in an import file name.
///
/// Any directory part is ignored and one trailing `.json` is stripped. The
/// rest must be a valid base TID (case-insensitive); it is returned
/// uppercased.
pub fn tid_from_filename(name: &str) -> Result<String, DocumentError> {
    let file_name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    let stem = file_name.strip_suffix(JSON_EXTENSION).unwrap_or(file_name);

    if tid::validate(stem, true) {
        Ok(tid::format(stem))
    } else {
        Err(DocumentError::FilenameTidMismatch(file_name.to_string()))
    }
}

/// Import a document from its file name and JSON text.
///
/// The file name is checked before the text is parsed.
pub fn import_str(name: &str, text: &str) -> Result<GameDocument, DocumentError> {
    import_slice(name, text.as_bytes())
}

/// Import from raw file contents; bytes that are not UTF-8 count as
/// malformed JSON.
fn import_slice(name: &str, bytes: &[u8]) -> Result<GameDocument, DocumentError> {
    let base_id = tid_from_filename(name)?;

    let value: Value = serde_json::from_slice(bytes).map_err(DocumentError::MalformedImportJson)?;
    if !value.is_object() {
        return Err(DocumentError::MalformedImportJson(
            <serde_json::Error as serde::de::Error>::custom(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&value)
            )),
        ));
    }

    let doc = ImportPayload::from_value(value).into_document(&base_id);
    log::debug!(
        "Imported {}: {} update(s), {} DLC, pack {}",
        doc.base.id,
        doc.updates.len(),
        doc.dlcs.len(),
        if doc.dlc_pack.is_some() { "yes" } else { "no" }
    );
    Ok(doc)
}

/// Read and import a document file.
pub fn import_file(path: &Path) -> Result<GameDocument, DocumentError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    // Reject badly named files without touching the disk
    tid_from_filename(&name)?;

    let bytes =
        std::fs::read(path).map_err(|e| DocumentError::io(path.display().to_string(), e))?;
    import_slice(&name, &bytes)
}

/// File name a document exports to: `<BASE TID>.json`.
pub fn export_filename(doc: &GameDocument) -> String {
    format!("{}{}", tid::format(&doc.base.id), JSON_EXTENSION)
}

/// Validate `doc` and render it as pretty-printed JSON.
pub fn export_string(doc: &GameDocument, mode: ValidationMode) -> Result<String, DocumentError> {
    ensure_valid(doc, mode)?;
    serde_json::to_string_pretty(doc).map_err(DocumentError::Serialize)
}

/// Validate `doc` and write it to `dir/<BASE TID>.json`.
///
/// The file is written to a temporary name and renamed into place, so an
/// existing export is never left half-written. Returns the final path.
pub fn export_file(
    doc: &GameDocument,
    dir: &Path,
    mode: ValidationMode,
) -> Result<PathBuf, DocumentError> {
    let json = export_string(doc, mode)?;

    std::fs::create_dir_all(dir).map_err(|e| DocumentError::io(dir.display().to_string(), e))?;
    let path = dir.join(export_filename(doc));
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| DocumentError::io(tmp.display().to_string(), e))?;
    std::fs::rename(&tmp, &path).map_err(|e| DocumentError::io(path.display().to_string(), e))?;

    log::debug!("Exported {} to {}", doc.base.id, path.display());
    Ok(path)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

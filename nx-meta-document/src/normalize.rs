//! Normalization of imported JSON into a well-formed [`GameDocument`].
//!
//! Imported files come from other tools and older versions of this one, so
//! nothing about their shape is trusted. A payload that already matches the
//! export format is deserialized directly and then canonicalized; anything
//! else is walked field by field with defaults for whatever is missing or
//! has the wrong type. Either way the base id is replaced by the one the
//! caller supplies (taken from the import file name).

use nx_meta_core::{tid, version};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::types::{
    BaseEntry, ContentEntry, DlcPack, EntryKind, GameDocument, Link, LinkType, Links,
    now_timestamp,
};

/// An imported JSON payload, before normalization.
#[derive(Debug, Clone)]
pub enum ImportPayload {
    /// Deserializes as a [`GameDocument`] as-is.
    Recognized(GameDocument),
    /// Anything else; normalized field by field.
    Opaque(Value),
}

impl ImportPayload {
    pub fn from_value(value: Value) -> Self {
        match GameDocument::deserialize(&value) {
            Ok(doc) => Self::Recognized(doc),
            Err(e) => {
                log::debug!("Payload is not in export shape ({}), normalizing by field", e);
                Self::Opaque(value)
            }
        }
    }

    /// Produce the normalized document, with `base_id` as the base title ID.
    pub fn into_document(self, base_id: &str) -> GameDocument {
        let mut doc = match self {
            Self::Recognized(doc) => canonicalize(doc),
            Self::Opaque(value) => from_opaque(&value),
        };
        doc.base.id = tid::format(base_id);
        doc
    }
}

/// Normalize any JSON value into a document whose base id is `base_id`.
pub fn normalize_document(value: Value, base_id: &str) -> GameDocument {
    ImportPayload::from_value(value).into_document(base_id)
}

/// Bring a correctly shaped document to canonical form: uppercase ids,
/// plain decimal versions and a timestamp on every entity.
///
/// Link types and the legacy `added_date` key are already resolved during
/// deserialization; a payload carrying both date keys is not recognized
/// and goes through [`from_opaque`] instead.
fn canonicalize(mut doc: GameDocument) -> GameDocument {
    fill_added_date(&mut doc.base.added_date);
    if let Some(pack) = doc.dlc_pack.as_mut() {
        fill_added_date(&mut pack.added_date);
    }
    for entry in doc.updates.iter_mut().chain(doc.dlcs.iter_mut()) {
        entry.id = tid::format(&entry.id);
        entry.version = version_from_str(&entry.version);
        fill_added_date(&mut entry.added_date);
    }
    doc
}

fn fill_added_date(added_date: &mut String) {
    if added_date.is_empty() {
        *added_date = now_timestamp();
    }
}

fn from_opaque(json: &Value) -> GameDocument {
    let base = json.get("base");
    let base = BaseEntry {
        id: String::new(),
        version: base
            .and_then(|b| b.get("version"))
            .and_then(integral_number)
            .unwrap_or(0),
        links: normalize_links(base.and_then(|b| b.get("links"))),
        added_date: resolve_added_date(base.and_then(Value::as_object)),
    };

    let dlc_pack = json
        .get("dlc_pack")
        .filter(|pack| is_truthy(pack))
        .map(|pack| DlcPack {
            links: normalize_links(pack.get("links")),
            added_date: resolve_added_date(pack.as_object()),
        });

    GameDocument {
        base,
        dlc_pack,
        updates: normalize_entries(json.get("updates"), EntryKind::Update),
        dlcs: normalize_entries(json.get("dlcs"), EntryKind::Dlc),
    }
}

fn normalize_entries(list: Option<&Value>, kind: EntryKind) -> Vec<ContentEntry> {
    let items = match list {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Vec::new(),
        Some(other) => {
            log::warn!("Ignoring {} list: expected an array, found {}", kind, type_name(other));
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::Object(fields) => Some(normalize_entry(fields)),
            other => {
                log::warn!(
                    "Skipping {} #{}: expected an object, found {}",
                    kind,
                    i,
                    type_name(other)
                );
                None
            }
        })
        .collect()
}

fn normalize_entry(fields: &Map<String, Value>) -> ContentEntry {
    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .map(tid::format)
        .unwrap_or_default();

    let version = match fields.get("version") {
        Some(n @ Value::Number(_)) => integral_number(n)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "0".to_string()),
        Some(Value::String(s)) => version_from_str(s),
        _ => "0".to_string(),
    };

    ContentEntry {
        id,
        version,
        links: normalize_links(fields.get("links")),
        added_date: resolve_added_date(Some(fields)),
    }
}

/// Links as stored now (`{"url", "type"}`) or by older exports (bare URL
/// strings). The type of a bare URL is guessed from its extension.
fn normalize_links(links: Option<&Value>) -> Links {
    let Some(map) = links.and_then(Value::as_object) else {
        return Links::new();
    };

    map.iter()
        .filter_map(|(label, value)| match value {
            Value::String(url) => Some((label.clone(), Link::new(url.as_str()))),
            Value::Object(fields) => {
                let url = fields.get("url").and_then(Value::as_str).unwrap_or_default();
                let kind = fields
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(|t| t.parse().ok())
                    .unwrap_or_else(|| LinkType::from_url(url));
                Some((label.clone(), Link::new(url).with_kind(kind)))
            }
            other => {
                log::warn!("Skipping link '{}': unexpected {}", label, type_name(other));
                None
            }
        })
        .collect()
}

/// `addedDate`, then the legacy `added_date`, then the current time.
fn resolve_added_date(entity: Option<&Map<String, Value>>) -> String {
    ["addedDate", "added_date"]
        .into_iter()
        .find_map(|key| {
            entity?
                .get(key)?
                .as_str()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(now_timestamp)
}

/// A JSON number holding a non-negative integer.
fn integral_number(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
            .map(|f| f as u64)
    })
}

fn version_from_str(raw: &str) -> String {
    if version::is_valid(raw, false) {
        version::normalize(raw, false)
    } else {
        "0".to_string()
    }
}

/// JavaScript-style truthiness, which older exports relied on for `dlc_pack`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

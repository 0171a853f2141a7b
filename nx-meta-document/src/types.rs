//! Data model types for a title metadata document.
//!
//! These types serialize to the exported JSON shape:
//! ```text
//! { "base": { "id", "version", "links", "addedDate" },
//!   "dlc_pack": { "links", "addedDate" },      (optional)
//!   "updates": [ { "id", "version", "links", "addedDate" } ],
//!   "dlcs":    [ { "id", "version", "links", "addedDate" } ] }
//! ```

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ── Links ───────────────────────────────────────────────────────────────────

/// Container format of a download link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    #[default]
    Nsp,
    Xci,
    Nsz,
    Xcz,
}

const ALL_LINK_TYPES: &[LinkType] = &[LinkType::Nsp, LinkType::Xci, LinkType::Nsz, LinkType::Xcz];

impl LinkType {
    /// File extension (and wire name) of this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Nsp => "nsp",
            Self::Xci => "xci",
            Self::Nsz => "nsz",
            Self::Xcz => "xcz",
        }
    }

    /// Guess the format from the file extension in a URL, falling back to NSP.
    ///
    /// Query strings and fragments are ignored (`…/game.xci?dl=1` is XCI).
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let lower = path.to_ascii_lowercase();
        ALL_LINK_TYPES
            .iter()
            .copied()
            .find(|kind| {
                lower
                    .strip_suffix(kind.extension())
                    .is_some_and(|rest| rest.ends_with('.'))
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error returned when a string cannot be parsed into a `LinkType`.
#[derive(Debug, Clone)]
pub struct LinkTypeParseError(pub String);

impl std::fmt::Display for LinkTypeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown link type: '{}' (expected nsp, xci, nsz or xcz)", self.0)
    }
}

impl std::error::Error for LinkTypeParseError {}

impl std::str::FromStr for LinkType {
    type Err = LinkTypeParseError;

    /// Case-insensitive; a leading dot is accepted (`.XCI`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.');
        ALL_LINK_TYPES
            .iter()
            .copied()
            .find(|kind| kind.extension().eq_ignore_ascii_case(name))
            .ok_or_else(|| LinkTypeParseError(s.to_string()))
    }
}

/// A named download reference.
///
/// A stored link without a `type` gets one guessed from its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredLink")]
pub struct Link {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: LinkType,
}

#[derive(Deserialize)]
struct StoredLink {
    url: String,
    #[serde(rename = "type", default)]
    kind: Option<LinkType>,
}

impl From<StoredLink> for Link {
    fn from(stored: StoredLink) -> Self {
        match stored.kind {
            Some(kind) => Link::new(stored.url).with_kind(kind),
            None => Link::new(stored.url),
        }
    }
}

impl Link {
    /// A link whose type is guessed from the URL.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let kind = LinkType::from_url(&url);
        Self { url, kind }
    }

    pub fn with_kind(mut self, kind: LinkType) -> Self {
        self.kind = kind;
        self
    }
}

/// Links of one entity, keyed by a label unique within that entity.
pub type Links = BTreeMap<String, Link>;

// ── Entries ─────────────────────────────────────────────────────────────────

/// The base title. Its id is the root every other id is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntry {
    #[serde(default)]
    pub id: String,
    pub version: u64,
    #[serde(default)]
    pub links: Links,
    #[serde(alias = "added_date")]
    pub added_date: String,
}

/// An update or DLC entry. Updates use multiple-of-65536 versions; DLC
/// versions are unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub links: Links,
    #[serde(alias = "added_date")]
    pub added_date: String,
}

pub type UpdateEntry = ContentEntry;
pub type DlcEntry = ContentEntry;

impl ContentEntry {
    /// New entry with no links, stamped with the current time.
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            links: Links::new(),
            added_date: now_timestamp(),
        }
    }
}

/// Optional bundle of all DLC. Has links but no title ID of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DlcPack {
    #[serde(default)]
    pub links: Links,
    #[serde(alias = "added_date")]
    pub added_date: String,
}

impl DlcPack {
    pub fn new() -> Self {
        Self {
            links: Links::new(),
            added_date: now_timestamp(),
        }
    }
}

impl Default for DlcPack {
    fn default() -> Self {
        Self::new()
    }
}

/// Which list an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Update,
    Dlc,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Update => f.write_str("update"),
            Self::Dlc => f.write_str("DLC"),
        }
    }
}

// ── Document ────────────────────────────────────────────────────────────────

/// One base title with its updates, DLC and optional DLC pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDocument {
    pub base: BaseEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlc_pack: Option<DlcPack>,
    #[serde(default)]
    pub updates: Vec<UpdateEntry>,
    #[serde(default)]
    pub dlcs: Vec<DlcEntry>,
}

impl GameDocument {
    /// A blank document: no base id yet, version 0, nothing attached.
    pub fn empty() -> Self {
        Self {
            base: BaseEntry {
                id: String::new(),
                version: 0,
                links: Links::new(),
                added_date: now_timestamp(),
            },
            dlc_pack: None,
            updates: Vec::new(),
            dlcs: Vec::new(),
        }
    }

    pub fn entries(&self, kind: EntryKind) -> &[ContentEntry] {
        match kind {
            EntryKind::Update => &self.updates,
            EntryKind::Dlc => &self.dlcs,
        }
    }

    pub(crate) fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<ContentEntry> {
        match kind {
            EntryKind::Update => &mut self.updates,
            EntryKind::Dlc => &mut self.dlcs,
        }
    }
}

impl Default for GameDocument {
    fn default() -> Self {
        Self::empty()
    }
}

/// Current time in the stored timestamp format (`2024-05-01T12:00:00.000Z`).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

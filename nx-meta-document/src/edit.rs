//! Editing operations.
//!
//! Every edit borrows the current document and returns a new one, so the
//! editing session only ever swaps one value for another. A failed edit
//! returns an error and the caller keeps its document as it was.

use chrono::{DateTime, FixedOffset};
use nx_meta_core::tid::{self, TID_LEN};
use nx_meta_core::{BaseTid, TidError, version};

use crate::error::DocumentError;
use crate::types::{ContentEntry, DlcPack, EntryKind, GameDocument, Links};

/// Which entity's link map an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Base,
    Update(usize),
    Dlc(usize),
    DlcPack,
}

impl std::fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Update(i) => write!(f, "update {}", i),
            Self::Dlc(i) => write!(f, "DLC {}", i),
            Self::DlcPack => f.write_str("DLC pack"),
        }
    }
}

impl GameDocument {
    /// A blank document for an already validated base title.
    pub fn new(base: &BaseTid) -> Self {
        let mut doc = Self::empty();
        doc.base.id = base.to_string();
        doc
    }

    /// The base id as a typed [`BaseTid`], if it is valid.
    pub fn base_tid(&self) -> Result<BaseTid, TidError> {
        self.base.id.parse()
    }

    /// Set the base id from raw input (non-hex dropped, uppercased, at most
    /// 16 digits). The id may still be incomplete afterwards.
    pub fn with_base_id(&self, raw: &str) -> Self {
        let mut next = self.clone();
        next.base.id = tid::sanitize_hex_input(raw, TID_LEN);
        next
    }

    pub fn with_base_version(&self, raw: &str) -> Self {
        let mut next = self.clone();
        next.base.version = version::parse_version(raw).unwrap_or(0);
        next
    }

    /// Add an update for the current base, listed first.
    ///
    /// Its version is one step past the highest existing update version,
    /// aligned to the update increment.
    pub fn with_update_added(&self) -> Result<Self, DocumentError> {
        let id = tid::derive_update_id(&self.base.id)?;
        let latest = self
            .updates
            .iter()
            .filter_map(|u| version::parse_version(&u.version))
            .max()
            .unwrap_or(0);
        let version = version::normalize(&version::next_version(&latest.to_string()), true);

        log::debug!("Adding update {} v{}", id, version);
        let mut next = self.clone();
        next.updates.insert(0, ContentEntry::new(id, version));
        Ok(next)
    }

    /// Set an update's version, rounded up to a multiple of 65536.
    pub fn with_update_version(&self, index: usize, raw: &str) -> Result<Self, DocumentError> {
        let version = version::normalize(raw, true);
        self.with_entry(EntryKind::Update, index, |entry| entry.version = version)
    }

    /// Advance an update's version by one step.
    pub fn with_update_bumped(&self, index: usize) -> Result<Self, DocumentError> {
        self.with_entry(EntryKind::Update, index, |entry| {
            entry.version = version::next_version(&entry.version);
        })
    }

    /// Add a DLC with the lowest free suffix.
    pub fn with_dlc_added(&self) -> Result<Self, DocumentError> {
        let base = self.base_tid()?;
        let existing: Vec<&str> = self.dlcs.iter().map(|d| d.id.as_str()).collect();
        let suffix = tid::next_free_dlc_suffix(&existing)?;
        let id = base.dlc_id(&suffix);

        log::debug!("Adding DLC {}", id);
        let mut next = self.clone();
        next.dlcs.push(ContentEntry::new(id, "0"));
        Ok(next)
    }

    /// Replace a DLC's id with the base prefix, type digit and `raw` suffix.
    pub fn with_dlc_suffix(&self, index: usize, raw: &str) -> Result<Self, DocumentError> {
        let base = self.base_tid()?;
        self.with_entry(EntryKind::Dlc, index, |entry| entry.id = base.dlc_id(raw))
    }

    pub fn with_dlc_version(&self, index: usize, raw: &str) -> Result<Self, DocumentError> {
        let version = version::normalize(raw, false);
        self.with_entry(EntryKind::Dlc, index, |entry| entry.version = version)
    }

    pub fn without_update(&self, index: usize) -> Result<Self, DocumentError> {
        self.without_entry(EntryKind::Update, index)
    }

    pub fn without_dlc(&self, index: usize) -> Result<Self, DocumentError> {
        self.without_entry(EntryKind::Dlc, index)
    }

    /// Turn the DLC pack on or off. Turning it on keeps an existing pack.
    pub fn with_dlc_pack(&self, enabled: bool) -> Self {
        let mut next = self.clone();
        next.dlc_pack = match (enabled, next.dlc_pack.take()) {
            (true, Some(pack)) => Some(pack),
            (true, None) => Some(DlcPack::new()),
            (false, _) => None,
        };
        next
    }

    pub fn links(&self, target: LinkTarget) -> Result<&Links, DocumentError> {
        Ok(match target {
            LinkTarget::Base => &self.base.links,
            LinkTarget::Update(i) => &self.entry(EntryKind::Update, i)?.links,
            LinkTarget::Dlc(i) => &self.entry(EntryKind::Dlc, i)?.links,
            LinkTarget::DlcPack => {
                &self
                    .dlc_pack
                    .as_ref()
                    .ok_or(DocumentError::NoDlcPack)?
                    .links
            }
        })
    }

    /// Replace the link map of `target`. Setting DLC pack links enables the
    /// pack.
    pub fn with_links(&self, target: LinkTarget, links: Links) -> Result<Self, DocumentError> {
        match target {
            LinkTarget::Base => {
                let mut next = self.clone();
                next.base.links = links;
                Ok(next)
            }
            LinkTarget::Update(i) => self.with_entry(EntryKind::Update, i, |e| e.links = links),
            LinkTarget::Dlc(i) => self.with_entry(EntryKind::Dlc, i, |e| e.links = links),
            LinkTarget::DlcPack => {
                let mut next = self.with_dlc_pack(true);
                if let Some(pack) = next.dlc_pack.as_mut() {
                    pack.links = links;
                }
                Ok(next)
            }
        }
    }

    /// Updates in display order: most recently added first.
    ///
    /// Entries whose timestamp does not parse sort last, in stored order.
    pub fn updates_newest_first(&self) -> Vec<&ContentEntry> {
        let mut updates: Vec<&ContentEntry> = self.updates.iter().collect();
        updates.sort_by_key(|u| std::cmp::Reverse(parse_timestamp(&u.added_date)));
        updates
    }

    /// DLC whose id contains `query` (sanitized like TID input). An empty
    /// query matches everything.
    pub fn dlcs_matching(&self, query: &str) -> Vec<&ContentEntry> {
        let query = tid::sanitize_hex_input(query, TID_LEN);
        self.dlcs
            .iter()
            .filter(|dlc| dlc.id.to_ascii_uppercase().contains(&query))
            .collect()
    }

    fn entry(&self, kind: EntryKind, index: usize) -> Result<&ContentEntry, DocumentError> {
        self.entries(kind)
            .get(index)
            .ok_or(DocumentError::EntryNotFound { kind, index })
    }

    fn with_entry(
        &self,
        kind: EntryKind,
        index: usize,
        edit: impl FnOnce(&mut ContentEntry),
    ) -> Result<Self, DocumentError> {
        let mut next = self.clone();
        let entry = next
            .entries_mut(kind)
            .get_mut(index)
            .ok_or(DocumentError::EntryNotFound { kind, index })?;
        edit(entry);
        Ok(next)
    }

    fn without_entry(&self, kind: EntryKind, index: usize) -> Result<Self, DocumentError> {
        self.entry(kind, index)?;
        let mut next = self.clone();
        next.entries_mut(kind).remove(index);
        Ok(next)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

#[cfg(test)]
#[path = "tests/edit_tests.rs"]
mod tests;

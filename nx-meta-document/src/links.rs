//! Pending link edits.
//!
//! While a link is being typed it has no final label yet, so it lives in a
//! [`LinkDrafts`] table instead of the entity's [`Links`] map. Committing a
//! draft picks its label (typed, else derived from the URL's domain) and
//! returns a new map with the link added; the persisted map never contains
//! placeholder keys.

use std::collections::BTreeMap;

use crate::error::DocumentError;
use crate::types::{Link, LinkType, Links};

/// Label used when neither a typed label nor a domain is available.
const FALLBACK_LABEL: &str = "link";

/// Handle to a pending link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DraftId(u64);

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "draft-{}", self.0)
    }
}

/// A link that has not been committed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    pub url: String,
    /// Typed label, or the suggestion derived from the URL until the user
    /// types one.
    pub label: String,
    /// Explicit format; guessed from the URL on commit when unset.
    pub kind: Option<LinkType>,
    label_typed: bool,
}

/// Side table of pending links, keyed by [`DraftId`].
#[derive(Debug, Clone, Default)]
pub struct LinkDrafts {
    drafts: BTreeMap<DraftId, LinkDraft>,
    next_id: u64,
}

impl LinkDrafts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new, empty draft.
    pub fn add(&mut self) -> DraftId {
        let id = DraftId(self.next_id);
        self.next_id += 1;
        self.drafts.insert(id, LinkDraft::default());
        id
    }

    pub fn get(&self, id: DraftId) -> Option<&LinkDraft> {
        self.drafts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Set the URL. Until a label has been typed, the label follows the
    /// URL's domain.
    pub fn set_url(&mut self, id: DraftId, url: &str) -> Result<(), DocumentError> {
        let draft = self.draft_mut(id)?;
        draft.url = url.to_string();
        if !draft.label_typed {
            draft.label = domain_label(url).unwrap_or_default();
        }
        Ok(())
    }

    /// Set the label typed by the user. An empty label goes back to
    /// following the URL.
    pub fn set_label(&mut self, id: DraftId, label: &str) -> Result<(), DocumentError> {
        let draft = self.draft_mut(id)?;
        let label = label.trim();
        if label.is_empty() {
            draft.label_typed = false;
            draft.label = domain_label(&draft.url).unwrap_or_default();
        } else {
            draft.label_typed = true;
            draft.label = label.to_string();
        }
        Ok(())
    }

    pub fn set_kind(&mut self, id: DraftId, kind: LinkType) -> Result<(), DocumentError> {
        self.draft_mut(id)?.kind = Some(kind);
        Ok(())
    }

    /// Finish a draft: returns `links` plus the new link under a label that
    /// is unique in `links`. The draft is removed.
    pub fn commit(&mut self, id: DraftId, links: &Links) -> Result<Links, DocumentError> {
        let draft = self
            .drafts
            .remove(&id)
            .ok_or(DocumentError::UnknownDraft(id))?;

        let wanted = if draft.label.is_empty() {
            domain_label(&draft.url).unwrap_or_else(|| FALLBACK_LABEL.to_string())
        } else {
            draft.label
        };
        let link = match draft.kind {
            Some(kind) => Link::new(draft.url).with_kind(kind),
            None => Link::new(draft.url),
        };

        let (next, label) = insert_link(links, &wanted, link);
        log::debug!("Committed {} as link '{}'", id, label);
        Ok(next)
    }

    /// Drop a draft without touching any link map.
    pub fn discard(&mut self, id: DraftId) -> Option<LinkDraft> {
        self.drafts.remove(&id)
    }

    fn draft_mut(&mut self, id: DraftId) -> Result<&mut LinkDraft, DocumentError> {
        self.drafts
            .get_mut(&id)
            .ok_or(DocumentError::UnknownDraft(id))
    }
}

/// Add a link under `label`, or a numbered variant of it if taken.
///
/// Returns the new map and the label that was used.
pub fn insert_link(links: &Links, label: &str, link: Link) -> (Links, String) {
    let label = unique_label(links, label);
    let mut next = links.clone();
    next.insert(label.clone(), link);
    (next, label)
}

/// First component of the URL's host name, lowercased.
///
/// `https://www.example.com/x` gives `www`, `https://cdn.host.net` gives
/// `cdn`. Returns `None` for strings without a `scheme://host` part.
pub fn domain_label(url: &str) -> Option<String> {
    let (scheme, rest) = url.trim().split_once("://")?;
    if scheme.is_empty() {
        return None;
    }
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let host = host.split(':').next()?;
    let label = host.split('.').next()?;
    if label.is_empty() {
        None
    } else {
        Some(label.to_ascii_lowercase())
    }
}

fn unique_label(links: &Links, wanted: &str) -> String {
    if !links.contains_key(wanted) {
        return wanted.to_string();
    }
    (2..)
        .map(|n| format!("{}-{}", wanted, n))
        .find(|candidate| !links.contains_key(candidate))
        .unwrap_or_else(|| wanted.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_label() {
        assert_eq!(domain_label("https://www.example.com/a"), Some("www".into()));
        assert_eq!(domain_label("https://Mega.nz/file/x"), Some("mega".into()));
        assert_eq!(domain_label("ftp://user:pw@files.host.org:21/x"), Some("files".into()));
        assert_eq!(domain_label("http://localhost:8080"), Some("localhost".into()));
        assert_eq!(domain_label("not a url"), None);
        assert_eq!(domain_label("https://"), None);
        assert_eq!(domain_label(""), None);
    }

    #[test]
    fn test_label_follows_url_until_typed() {
        let mut drafts = LinkDrafts::new();
        let id = drafts.add();

        drafts.set_url(id, "h").unwrap();
        assert_eq!(drafts.get(id).unwrap().label, "");
        drafts.set_url(id, "https://mega.nz/file").unwrap();
        assert_eq!(drafts.get(id).unwrap().label, "mega");

        drafts.set_label(id, "Mirror").unwrap();
        drafts.set_url(id, "https://gofile.io/d/x").unwrap();
        assert_eq!(drafts.get(id).unwrap().label, "Mirror");

        drafts.set_label(id, "  ").unwrap();
        assert_eq!(drafts.get(id).unwrap().label, "gofile");
    }

    #[test]
    fn test_commit_uses_label_and_type() {
        let mut drafts = LinkDrafts::new();
        let id = drafts.add();
        drafts.set_url(id, "https://mega.nz/game.xci").unwrap();

        let links = drafts.commit(id, &Links::new()).unwrap();
        assert_eq!(links["mega"].kind, LinkType::Xci);
        assert!(drafts.is_empty());

        let id = drafts.add();
        drafts.set_url(id, "https://mega.nz/other").unwrap();
        drafts.set_kind(id, LinkType::Nsz).unwrap();
        let links = drafts.commit(id, &links).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links["mega-2"].kind, LinkType::Nsz);
    }

    #[test]
    fn test_commit_without_domain_uses_fallback() {
        let mut drafts = LinkDrafts::new();
        let id = drafts.add();
        drafts.set_url(id, "magnet:?xt=urn").unwrap();
        let links = drafts.commit(id, &Links::new()).unwrap();
        assert!(links.contains_key("link"));
    }

    #[test]
    fn test_unknown_draft() {
        let mut drafts = LinkDrafts::new();
        let id = drafts.add();
        assert!(drafts.discard(id).is_some());
        assert!(matches!(
            drafts.set_url(id, "x"),
            Err(DocumentError::UnknownDraft(_))
        ));
        assert!(drafts.commit(id, &Links::new()).is_err());
    }

    #[test]
    fn test_insert_link_dedupes() {
        let (links, first) = insert_link(&Links::new(), "main", Link::new("https://a.b/c.nsp"));
        let (links, second) = insert_link(&links, "main", Link::new("https://a.b/d.nsp"));
        assert_eq!(first, "main");
        assert_eq!(second, "main-2");
        assert_eq!(links.len(), 2);
    }
}

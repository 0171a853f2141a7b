//! The editing session: one current document plus the state around it.
//!
//! Every change goes through [`EditingSession::apply`] (or import/clear),
//! which swaps the whole document. A failed edit or import leaves the
//! current document exactly as it was.

use std::path::{Path, PathBuf};

use nx_meta_document::{
    DocumentError, DraftId, GameDocument, LinkDrafts, LinkTarget, ValidationMode, Violation,
    export_file, import_file, validate,
};

use crate::settings::EditorSettings;

#[derive(Debug, Clone, Default)]
pub struct EditingSession {
    document: GameDocument,
    mode: ValidationMode,
    output_dir: Option<PathBuf>,
    drafts: LinkDrafts,
}

impl EditingSession {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// A session using the saved validation mode and export directory.
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            mode: settings.validation.mode,
            output_dir: settings.export.output_dir.clone(),
            ..Self::default()
        }
    }

    pub fn document(&self) -> &GameDocument {
        &self.document
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ValidationMode) {
        self.mode = mode;
    }

    /// Run an edit against the current document and keep its result.
    pub fn apply<F>(&mut self, edit: F) -> Result<(), DocumentError>
    where
        F: FnOnce(&GameDocument) -> Result<GameDocument, DocumentError>,
    {
        self.document = edit(&self.document)?;
        Ok(())
    }

    /// Replace the current document with one imported from `path`.
    pub fn import_file(&mut self, path: &Path) -> Result<(), DocumentError> {
        let doc = import_file(path)?;
        log::debug!("Session now editing {}", doc.base.id);
        self.document = doc;
        self.drafts = LinkDrafts::new();
        Ok(())
    }

    /// Everything that would currently block an export.
    pub fn violations(&self) -> Vec<Violation> {
        validate(&self.document, self.mode)
    }

    /// Export to `dir`, or to the session's configured directory, or to the
    /// current directory. Returns the written path.
    pub fn export(&self, dir: Option<&Path>) -> Result<PathBuf, DocumentError> {
        let dir = dir
            .map(Path::to_path_buf)
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        export_file(&self.document, &dir, self.mode)
    }

    /// Start over with an empty document.
    pub fn clear(&mut self) {
        self.document = GameDocument::empty();
        self.drafts = LinkDrafts::new();
    }

    pub fn drafts(&self) -> &LinkDrafts {
        &self.drafts
    }

    pub fn drafts_mut(&mut self) -> &mut LinkDrafts {
        &mut self.drafts
    }

    /// Commit a pending link into the link map of `target`.
    ///
    /// The draft is only consumed when the target exists.
    pub fn commit_link(&mut self, draft: DraftId, target: LinkTarget) -> Result<(), DocumentError> {
        let current = match target {
            LinkTarget::DlcPack if self.document.dlc_pack.is_none() => Default::default(),
            _ => self.document.links(target)?.clone(),
        };
        let links = self.drafts.commit(draft, &current)?;
        self.apply(|doc| doc.with_links(target, links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nx_meta_document::LinkType;

    const BASE: &str = "0100ABCD00010000";

    fn session_with_base() -> EditingSession {
        let mut session = EditingSession::new(ValidationMode::Strict);
        session.apply(|doc| Ok(doc.with_base_id(BASE))).unwrap();
        session
    }

    #[test]
    fn test_failed_edit_keeps_document() {
        let mut session = session_with_base();
        session.apply(GameDocument::with_dlc_added).unwrap();
        let before = session.document().clone();

        assert!(session.apply(|doc| doc.without_update(4)).is_err());
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn test_commit_link_into_dlc_pack() {
        let mut session = session_with_base();
        let draft = session.drafts_mut().add();
        session
            .drafts_mut()
            .set_url(draft, "https://files.example.net/all-dlc.nsz")
            .unwrap();

        session.commit_link(draft, LinkTarget::DlcPack).unwrap();
        let pack = session.document().dlc_pack.as_ref().unwrap();
        assert_eq!(pack.links["files"].kind, LinkType::Nsz);
        assert!(session.drafts().is_empty());
    }

    #[test]
    fn test_commit_link_to_missing_entry_keeps_draft() {
        let mut session = session_with_base();
        let draft = session.drafts_mut().add();
        assert!(session.commit_link(draft, LinkTarget::Dlc(0)).is_err());
        assert!(session.drafts().get(draft).is_some());
    }

    #[test]
    fn test_clear() {
        let mut session = session_with_base();
        session.drafts_mut().add();
        session.clear();
        assert_eq!(session.document().base.id, "");
        assert!(session.drafts().is_empty());
    }

    #[test]
    fn test_violations_follow_mode() {
        let mut session = session_with_base();
        session
            .apply(|doc| {
                let mut next = doc.clone();
                next.updates.push(nx_meta_document::ContentEntry::new("FFFFFFFFFFFF0800", "0"));
                Ok(next)
            })
            .unwrap();
        assert_eq!(session.violations().len(), 1);
        session.set_mode(ValidationMode::Legacy);
        assert!(session.violations().is_empty());
    }
}

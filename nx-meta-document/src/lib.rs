//! Title metadata document: data model, import normalization, editing,
//! validation and JSON export.
//!
//! A [`GameDocument`] describes one base title plus its updates, DLC and an
//! optional DLC pack. Documents come from [`io::import_str`] /
//! [`io::import_file`] or are built up with the `with_*` edit methods, and
//! leave through [`io::export_string`] / [`io::export_file`], which refuse
//! to write anything the [`validate`] module rejects.

pub mod edit;
pub mod error;
pub mod io;
pub mod links;
pub mod normalize;
pub mod types;
pub mod validate;

pub use edit::LinkTarget;
pub use error::DocumentError;
pub use io::{export_file, export_filename, export_string, import_file, import_str, tid_from_filename};
pub use links::{DraftId, LinkDraft, LinkDrafts, domain_label, insert_link};
pub use normalize::{ImportPayload, normalize_document};
pub use types::*;
pub use validate::{IdRule, ValidationMode, Violation, ensure_valid, validate};

pub use nx_meta_core::{BaseTid, TidError};

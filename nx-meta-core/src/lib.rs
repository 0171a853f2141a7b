//! Identifier and version rules for title metadata.
//!
//! This crate has no I/O. It knows how title IDs are shaped and derived
//! from one another, and how version numbers are normalized and stepped.
//! Everything above it (documents, import/export, the CLI) goes through
//! these functions instead of re-implementing the rules.

pub mod error;
pub mod tid;
pub mod version;

pub use error::TidError;
pub use tid::BaseTid;
pub use version::BASE_INCREMENT;

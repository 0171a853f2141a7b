//! Pre-export validation of a document's title IDs.
//!
//! Checks run in a fixed order (base, then DLC, then updates) and every
//! violation is collected; export uses [`ensure_valid`], which stops at the
//! first one.

use std::collections::HashSet;

use nx_meta_core::BaseTid;
use nx_meta_core::tid::{self, PREFIX_LEN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DocumentError;
use crate::types::GameDocument;

/// How much of the derivation scheme export validation enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Shape plus relationship to the base: shared prefix, DLC type digit,
    /// unique DLC suffixes, update id equal to the derived one.
    #[default]
    Strict,
    /// Only check that DLC and update ids are 16 hex digits.
    Legacy,
}

impl ValidationMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "legacy" | "loose" => Ok(Self::Legacy),
            _ => Err(format!("unknown validation mode: '{}' (expected strict or legacy)", s)),
        }
    }
}

/// The identifier rule a child id broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdRule {
    /// Not exactly 16 hex digits.
    Shape,
    /// First 12 digits differ from the base.
    Prefix,
    /// DLC digit 13 is not the successor of the base's digit 13.
    TypeChar,
    /// Another DLC already uses the same last three digits.
    DuplicateSuffix,
    /// Update id is not the base prefix followed by `800`.
    NotDerived,
}

impl std::fmt::Display for IdRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::Shape => "must be 16 hexadecimal characters",
            Self::Prefix => "first 12 characters must match the base ID",
            Self::TypeChar => "13th character must be the DLC type character of the base ID",
            Self::DuplicateSuffix => "suffix is already used by another DLC",
            Self::NotDerived => "must be the base ID prefix followed by 800",
        };
        f.write_str(msg)
    }
}

/// One failed check, naming the entity and the rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Invalid base ID '{0}': must be 16 hexadecimal characters ending with 000")]
    InvalidBaseId(String),

    #[error("Invalid DLC ID '{id}': {rule}")]
    InvalidDlcId { id: String, rule: IdRule },

    #[error("Invalid update ID '{id}': {rule}")]
    InvalidUpdateId { id: String, rule: IdRule },
}

/// Collect every violation in `doc`.
///
/// Relationship checks need a valid base, so when the base id is invalid
/// only the base violation and child shape errors are reported.
pub fn validate(doc: &GameDocument, mode: ValidationMode) -> Vec<Violation> {
    let mut violations = Vec::new();

    let base = doc.base.id.parse::<BaseTid>().ok();
    if base.is_none() {
        violations.push(Violation::InvalidBaseId(doc.base.id.clone()));
    }

    let related = match mode {
        ValidationMode::Strict => base.as_ref(),
        ValidationMode::Legacy => None,
    };

    let mut seen_suffixes = HashSet::new();
    for dlc in &doc.dlcs {
        if let Some(rule) = check_dlc_id(&dlc.id, related, &mut seen_suffixes) {
            violations.push(Violation::InvalidDlcId {
                id: dlc.id.clone(),
                rule,
            });
        }
    }

    for update in &doc.updates {
        if let Some(rule) = check_update_id(&update.id, related) {
            violations.push(Violation::InvalidUpdateId {
                id: update.id.clone(),
                rule,
            });
        }
    }

    log::debug!(
        "Validated {} ({} mode): {} violation(s)",
        doc.base.id,
        mode,
        violations.len()
    );
    violations
}

/// `Ok` when `doc` may be exported, otherwise the first violation.
pub fn ensure_valid(doc: &GameDocument, mode: ValidationMode) -> Result<(), DocumentError> {
    match validate(doc, mode).into_iter().next() {
        Some(violation) => Err(violation.into()),
        None => Ok(()),
    }
}

fn check_dlc_id(id: &str, base: Option<&BaseTid>, seen: &mut HashSet<u16>) -> Option<IdRule> {
    if !tid::validate(id, false) {
        return Some(IdRule::Shape);
    }
    let base = base?;
    if !id[..PREFIX_LEN].eq_ignore_ascii_case(base.prefix()) {
        return Some(IdRule::Prefix);
    }
    if !base.is_dlc_id(id) {
        return Some(IdRule::TypeChar);
    }
    match tid::dlc_suffix(id) {
        Some(suffix) if !seen.insert(suffix) => Some(IdRule::DuplicateSuffix),
        _ => None,
    }
}

fn check_update_id(id: &str, base: Option<&BaseTid>) -> Option<IdRule> {
    if !tid::validate(id, false) {
        return Some(IdRule::Shape);
    }
    let base = base?;
    if !id[..PREFIX_LEN].eq_ignore_ascii_case(base.prefix()) {
        return Some(IdRule::Prefix);
    }
    if !base.is_update_id(id) {
        return Some(IdRule::NotDerived);
    }
    None
}

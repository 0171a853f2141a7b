//! Title ID validation, formatting and derivation.
//!
//! A title ID (TID) is 16 hexadecimal digits:
//! ```text
//! 0100ABCD0001 0 000   base title   (always ends in 000)
//! 0100ABCD0001 8 00    update       (prefix + "800")
//! 0100ABCD0001 1 001   DLC          (prefix + successor of digit 13 + suffix)
//! ```
//! The first 12 digits are shared by a base title and everything derived
//! from it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::TidError;

/// Number of hex digits in a title ID.
pub const TID_LEN: usize = 16;

/// Length of the prefix shared by a base title and all of its children.
pub const PREFIX_LEN: usize = 12;

/// Number of hex digits in a DLC sequence suffix.
pub const DLC_SUFFIX_LEN: usize = 3;

const BASE_SUFFIX: &str = "000";
const UPDATE_SUFFIX: &str = "800";
const MAX_DLC_SUFFIX: u16 = 0xFFF;
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Check that `tid` is exactly 16 hex digits (either case).
///
/// With `is_base`, the last three digits must also be `000`.
pub fn validate(tid: &str, is_base: bool) -> bool {
    tid.len() == TID_LEN
        && tid.chars().all(|c| c.is_ascii_hexdigit())
        && (!is_base || tid.ends_with(BASE_SUFFIX))
}

/// Canonical display form: uppercase, otherwise unchanged.
pub fn format(tid: &str) -> String {
    tid.to_ascii_uppercase()
}

/// Drop everything that is not a hex digit, uppercase the rest and keep at
/// most `max_len` characters.
///
/// Meant for raw keystrokes and pasted text, so it accepts anything.
pub fn sanitize_hex_input(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_uppercase())
        .take(max_len)
        .collect()
}

/// Successor of a hex digit in `0..9A..F`, wrapping `F` to `0`.
///
/// Returns `None` if `c` is not a hex digit. The result is always uppercase.
pub fn next_hex_digit(c: char) -> Option<char> {
    let digit = c.to_digit(16)?;
    Some(HEX_DIGITS[((digit + 1) % 16) as usize] as char)
}

/// Update title ID for a base: the base prefix followed by `800`.
pub fn derive_update_id(base: &str) -> Result<String, TidError> {
    Ok(base.parse::<BaseTid>()?.update_id())
}

/// The 12-digit prefix and the type digit every DLC of `base` starts with.
pub fn derive_dlc_prefix_and_type_char(base: &str) -> Result<(String, char), TidError> {
    let base: BaseTid = base.parse()?;
    Ok((base.prefix().to_string(), base.dlc_type_char()))
}

/// Build a DLC title ID from a base and a (possibly partial) suffix.
///
/// The suffix is sanitized to hex, keeps at most its last three digits and
/// is left-padded with zeros, so `"1"` becomes `001`.
pub fn compose_dlc_id(base: &str, suffix: &str) -> Result<String, TidError> {
    Ok(base.parse::<BaseTid>()?.dlc_id(suffix))
}

/// Numeric value of the last three hex digits of a title ID.
pub fn dlc_suffix(tid: &str) -> Option<u16> {
    let tail = tid.get(tid.len().checked_sub(DLC_SUFFIX_LEN)?..)?;
    u16::from_str_radix(tail, 16).ok()
}

/// Smallest unused DLC suffix (starting at `001`), as three uppercase hex digits.
///
/// Ids whose last three characters are not hex are ignored.
pub fn next_free_dlc_suffix<S: AsRef<str>>(existing_ids: &[S]) -> Result<String, TidError> {
    let taken: HashSet<u16> = existing_ids
        .iter()
        .filter_map(|id| dlc_suffix(id.as_ref()))
        .collect();

    (1..=MAX_DLC_SUFFIX)
        .find(|n| !taken.contains(n))
        .map(|n| format!("{:03X}", n))
        .ok_or(TidError::SuffixSpaceExhausted)
}

/// Whether `candidate` is a well-formed DLC id belonging to `base`.
///
/// Always `false` when `base` itself is not a valid base title ID.
pub fn is_valid_dlc_id(base: &str, candidate: &str) -> bool {
    base.parse::<BaseTid>()
        .is_ok_and(|base| base.is_dlc_id(candidate))
}

/// Whether `candidate` is exactly the update id derived from `base`.
pub fn is_valid_update_id(base: &str, candidate: &str) -> bool {
    base.parse::<BaseTid>()
        .is_ok_and(|base| base.is_update_id(candidate))
}

/// A validated base title ID, stored uppercase.
///
/// Holding one of these means derivation cannot fail, so the typed API
/// returns plain values where the string-level functions return `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseTid {
    id: String,
    dlc_type: char,
}

impl BaseTid {
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// The 12 digits shared with every update and DLC of this title.
    pub fn prefix(&self) -> &str {
        &self.id[..PREFIX_LEN]
    }

    /// Digit 13 of every DLC id of this title.
    pub fn dlc_type_char(&self) -> char {
        self.dlc_type
    }

    pub fn update_id(&self) -> String {
        format!("{}{}", self.prefix(), UPDATE_SUFFIX)
    }

    pub fn dlc_id(&self, suffix: &str) -> String {
        let digits = sanitize_hex_input(suffix, usize::MAX);
        let tail = &digits[digits.len().saturating_sub(DLC_SUFFIX_LEN)..];
        format!(
            "{}{}{:0>width$}",
            self.prefix(),
            self.dlc_type,
            tail,
            width = DLC_SUFFIX_LEN
        )
    }

    pub fn is_dlc_id(&self, candidate: &str) -> bool {
        validate(candidate, false)
            && candidate[..PREFIX_LEN].eq_ignore_ascii_case(self.prefix())
            && candidate[PREFIX_LEN..]
                .chars()
                .next()
                .is_some_and(|c| c.eq_ignore_ascii_case(&self.dlc_type))
    }

    pub fn is_update_id(&self, candidate: &str) -> bool {
        validate(candidate, false) && candidate.eq_ignore_ascii_case(&self.update_id())
    }
}

impl FromStr for BaseTid {
    type Err = TidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !validate(s, true) {
            return Err(TidError::invalid_base(s));
        }
        let id = format(s);
        let dlc_type = id[PREFIX_LEN..]
            .chars()
            .next()
            .and_then(next_hex_digit)
            .ok_or_else(|| TidError::invalid_base(s))?;
        Ok(Self { id, dlc_type })
    }
}

impl fmt::Display for BaseTid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl AsRef<str> for BaseTid {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
#[path = "tests/tid_tests.rs"]
mod tests;

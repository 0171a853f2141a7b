//! Version number normalization.
//!
//! Versions are non-negative integers kept as decimal strings. Update
//! versions move in steps of [`BASE_INCREMENT`] (the low 16 bits are the
//! build counter, which patches always leave at zero).

/// Step between consecutive update versions.
pub const BASE_INCREMENT: u64 = 65536;

/// Lenient parse of a version typed by a user or read from a file.
///
/// Surrounding whitespace and a leading `+` are accepted, then the leading
/// run of decimal digits is used and anything after it is ignored
/// (`"12abc"` is 12). Returns `None` when there are no leading digits, for
/// negative values, and when the number does not fit in a `u64`.
pub fn parse_version(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// Normalize a version string.
///
/// Unparseable or negative input becomes `"0"`. With `force_multiple` the
/// value is rounded up to the next multiple of [`BASE_INCREMENT`]
/// (`"1"` → `"65536"`); values that are already aligned are unchanged.
pub fn normalize(raw: &str, force_multiple: bool) -> String {
    let value = match parse_version(raw) {
        Some(v) => v,
        None => return "0".to_string(),
    };

    if !force_multiple {
        return value.to_string();
    }

    align_up(value)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "0".to_string())
}

/// The version one step after `current`.
///
/// Adds [`BASE_INCREMENT`] without aligning first, so `"100"` becomes
/// `"65636"`. Unparseable input counts as 0.
pub fn next_version(current: &str) -> String {
    parse_version(current)
        .unwrap_or(0)
        .saturating_add(BASE_INCREMENT)
        .to_string()
}

/// Strict check: the whole (trimmed) string must be a decimal integer, and
/// with `force_multiple` it must also be a multiple of [`BASE_INCREMENT`].
pub fn is_valid(raw: &str, force_multiple: bool) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match trimmed.parse::<u64>() {
        Ok(v) => !force_multiple || v.is_multiple_of(BASE_INCREMENT),
        Err(_) => false,
    }
}

/// Round up to the next multiple of [`BASE_INCREMENT`], `None` on overflow.
fn align_up(value: u64) -> Option<u64> {
    let rem = value % BASE_INCREMENT;
    if rem == 0 {
        Some(value)
    } else {
        value.checked_add(BASE_INCREMENT - rem)
    }
}

#[cfg(test)]
#[path = "tests/version_tests.rs"]
mod tests;

use thiserror::Error;

/// Errors raised by title ID derivation.
///
/// Validation itself never fails loudly (it answers `bool`); only the
/// functions that build a new identifier from a base report an error, so
/// callers can tell "no valid base yet" apart from a real result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TidError {
    /// The base title ID is not 16 hex digits ending with `000`
    #[error("Invalid base title ID '{0}': must be 16 hexadecimal characters ending with 000")]
    InvalidBase(String),

    /// Every DLC suffix from 001 to FFF is already taken
    #[error("No free DLC suffix left: 001-FFF are all in use")]
    SuffixSpaceExhausted,
}

impl TidError {
    pub fn invalid_base(tid: impl Into<String>) -> Self {
        Self::InvalidBase(tid.into())
    }
}

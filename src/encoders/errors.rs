use thiserror::Error;

use crate::core::Code;

/// Errors that can occur while compressing or decompressing.
#[derive(Error, Debug)]
pub enum Lz78Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before the code-width header was complete.
    #[error("malformed header: expected {expected} bytes, found {found}")]
    MalformedHeader { expected: usize, found: usize },

    /// The header names a code width the token framing cannot carry.
    #[error("invalid code width {0}: must be between 1 and 8 bytes")]
    InvalidCodeWidth(u32),

    /// A token referenced a code the decoder never registered.
    #[error("unregistered code {code} (table holds codes 0..{registered})")]
    UnknownCode { code: Code, registered: usize },

    #[error("code {code} registered out of sequence (expected {expected})")]
    CodeOutOfSequence { code: Code, expected: Code },

    /// A code does not fit the width fixed by the header.
    #[error("code {code} does not fit in {width} byte(s)")]
    CodeOverflow { code: Code, width: usize },
}

pub type Result<T> = std::result::Result<T, Lz78Error>;

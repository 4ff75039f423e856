//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use lz78::prelude::*;
//!
//! let compressed = compress(b"Hello, Hello, Hello").unwrap();
//! let (width, tokens) = read_tokens(&compressed).unwrap();
//! assert_eq!(width, 1);
//! assert!(!tokens.is_empty());
//! ```

// Core compression
pub use crate::{compress, compress_stream, decompress, decompress_stream};

// Dictionaries
pub use crate::{PhraseTable, PhraseTrie};

// Streaming and framing
pub use crate::{StreamingDecoder, StreamingEncoder, Token, read_tokens};

// Config
pub use crate::{Direction, Lz78Config};

// Errors
pub use crate::Lz78Error;

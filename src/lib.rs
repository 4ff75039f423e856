//! LZ78 dictionary compression.
//!
//! The encoder grows a phrase dictionary (a prefix trie) while scanning its
//! input and emits one `(code, literal)` token per new phrase. The decoder
//! replays the same growth rule with a code-indexed table to rebuild the
//! original bytes.
//!
//! # Example
//!
//! ```
//! let data = b"abracadabra abracadabra";
//! let compressed = lz78::compress(data).unwrap();
//! assert_eq!(lz78::decompress(&compressed).unwrap(), data);
//! ```

mod core;
mod encoders;
pub mod prelude;

use std::io::{Cursor, Read, Seek, Write};

pub use crate::core::Code;
pub use crate::core::config::{Direction, ExtensionSettings, Lz78Config, Settings};
pub use crate::core::phrase_table::PhraseTable;
pub use crate::core::phrase_trie::{NodeId, PhraseTrie};
pub use encoders::errors::{Lz78Error, Result};
pub use encoders::streaming::{DecodeSummary, EncodeSummary, StreamingDecoder, StreamingEncoder};
pub use encoders::token::{
    HEADER_SIZE, MAX_CODE_WIDTH, Token, TokenReader, TokenWriter, code_width_for, read_header,
    read_tokens, write_header,
};

/// Compresses `data` into a header followed by LZ78 tokens.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress_stream(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Reconstructs the bytes of a stream produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress_stream(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Compresses from a seekable reader into a writer.
///
/// The reader is read twice and rewound to its starting position in between.
pub fn compress_stream<R: Read + Seek, W: Write>(
    reader: &mut R,
    writer: W,
) -> Result<EncodeSummary> {
    StreamingEncoder::new(writer).encode(reader)
}

/// Decompresses from a reader into a writer in a single pass.
pub fn decompress_stream<R: Read, W: Write>(reader: &mut R, writer: W) -> Result<DecodeSummary> {
    StreamingDecoder::new(writer).decode(reader)
}

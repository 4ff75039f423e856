use serde::Serialize;
use std::io::{BufReader, Read, Write};
use tracing::{debug, info, warn};

use crate::core::Code;
use crate::core::phrase_table::PhraseTable;
use crate::encoders::errors::Result;
use crate::encoders::token::{TokenReader, read_header};

/// Figures reported after a decompression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodeSummary {
    /// Bytes per code, as read from the header
    pub code_width: usize,
    /// Tokens decoded
    pub tokens: u64,
    /// Bytes written to the output
    pub output_bytes: u64,
    /// Bytes of an incomplete final token that were ignored
    pub trailing_bytes: usize,
}

/// LZ78 decoder writing reconstructed bytes to `W`.
///
/// Reads the header once, then one token at a time: the token's code is
/// resolved to a phrase, the phrase and literal are written out, and the
/// extended phrase is registered under the next sequential code.
pub struct StreamingDecoder<W: Write> {
    writer: W,
}

impl<W: Write> StreamingDecoder<W> {
    /// Creates a new streaming decoder.
    ///
    /// # Arguments
    ///
    /// * `writer` - The destination for decompressed output
    pub fn new(writer: W) -> Self {
        StreamingDecoder { writer }
    }

    /// Decompresses a complete stream from the reader.
    pub fn decode<R: Read>(&mut self, reader: &mut R) -> Result<DecodeSummary> {
        let mut reader = BufReader::new(reader);
        let code_width = read_header(&mut reader)?;
        debug!(code_width, "header read");

        let mut tokens = TokenReader::new(reader, code_width);
        let mut table = PhraseTable::new();
        let mut next_code: Code = 1;
        let mut output_bytes = 0u64;

        while let Some(token) = tokens.read_token()? {
            let mut phrase = table.resolve(token.code)?.to_vec();
            phrase.push(token.literal);
            self.writer.write_all(&phrase)?;
            output_bytes += phrase.len() as u64;

            table.register(next_code, phrase)?;
            next_code += 1;
        }
        self.writer.flush()?;

        let trailing_bytes = tokens.trailing_bytes();
        if trailing_bytes > 0 {
            warn!(trailing_bytes, "ignoring incomplete final token");
        }

        let summary = DecodeSummary {
            code_width,
            tokens: next_code - 1,
            output_bytes,
            trailing_bytes,
        };
        info!(
            tokens = summary.tokens,
            output_bytes = summary.output_bytes,
            "decompressed"
        );
        Ok(summary)
    }

    /// Consumes the decoder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

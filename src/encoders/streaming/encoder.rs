use serde::Serialize;
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use tracing::{debug, info, warn};

use crate::core::Code;
use crate::core::phrase_trie::PhraseTrie;
use crate::encoders::errors::Result;
use crate::encoders::token::{HEADER_SIZE, Token, TokenWriter, code_width_for, write_header};

/// Figures reported after a compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeSummary {
    /// Bytes consumed from the input
    pub input_bytes: u64,
    /// Phrases the dictionary ended up holding
    pub entries: u64,
    /// Bytes per code, as written in the header
    pub code_width: usize,
    /// Tokens emitted, including a final flush token
    pub tokens: u64,
    /// Bytes written, header included
    pub output_bytes: u64,
}

/// LZ78 encoder writing a compressed stream to `W`.
///
/// Encoding takes two passes over the input. The first replays the
/// dictionary growth without emitting anything, only to learn how many
/// phrases there will be and therefore how wide each code must be. The
/// reader is then rewound to where it started and the second pass emits the
/// header followed by the tokens.
pub struct StreamingEncoder<W: Write> {
    writer: W,
}

impl<W: Write> StreamingEncoder<W> {
    /// Creates a new streaming encoder.
    ///
    /// # Arguments
    ///
    /// * `writer` - The destination for compressed output
    pub fn new(writer: W) -> Self {
        StreamingEncoder { writer }
    }

    /// Compresses everything from the reader's current position to its end.
    pub fn encode<R: Read + Seek>(&mut self, reader: &mut R) -> Result<EncodeSummary> {
        let start = reader.stream_position()?;

        let (input_bytes, entries) = prescan(&mut *reader)?;
        // A token only carries codes assigned before its own insert, so the
        // newest code never appears in the stream.
        let code_width = code_width_for((entries as Code).saturating_sub(1));
        debug!(input_bytes, entries, code_width, "pre-scan finished");

        reader.seek(SeekFrom::Start(start))?;
        write_header(&mut self.writer, code_width)?;
        let (emitted_bytes, tokens) = self.emit(&mut *reader, code_width)?;
        self.writer.flush()?;

        if emitted_bytes != input_bytes {
            warn!(
                pre_scan = input_bytes,
                emitted = emitted_bytes,
                "input changed between passes"
            );
        }

        let summary = EncodeSummary {
            input_bytes: emitted_bytes,
            entries: entries as u64,
            code_width,
            tokens,
            output_bytes: HEADER_SIZE as u64 + tokens * (code_width as u64 + 1),
        };
        info!(
            input_bytes = summary.input_bytes,
            output_bytes = summary.output_bytes,
            tokens = summary.tokens,
            "compressed"
        );
        Ok(summary)
    }

    /// Consumes the encoder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit<R: Read>(&mut self, reader: R, code_width: usize) -> Result<(u64, u64)> {
        let mut trie = PhraseTrie::new();
        let mut tokens = TokenWriter::new(&mut self.writer, code_width);
        let mut consumed = 0u64;

        // `node` is the pending phrase; `prefix` and `last` are its parent and
        // final byte, kept for the flush token.
        let mut node = PhraseTrie::ROOT;
        let mut prefix = PhraseTrie::ROOT;
        let mut last = 0u8;

        for byte in BufReader::new(reader).bytes() {
            let byte = byte?;
            consumed += 1;
            match trie.step(node, byte) {
                Some(next) => {
                    prefix = node;
                    node = next;
                    last = byte;
                }
                None => {
                    tokens.write_token(Token::new(trie.code_at(node), byte))?;
                    trie.insert_child(node, byte);
                    node = PhraseTrie::ROOT;
                }
            }
        }

        if node != PhraseTrie::ROOT {
            tokens.write_token(Token::new(trie.code_at(prefix), last))?;
        }

        Ok((consumed, tokens.tokens_written()))
    }
}

/// Replays dictionary growth over the whole input; returns (bytes, entries).
fn prescan<R: Read>(reader: R) -> Result<(u64, usize)> {
    let mut trie = PhraseTrie::new();
    let mut node = PhraseTrie::ROOT;
    let mut consumed = 0u64;

    for byte in BufReader::new(reader).bytes() {
        let byte = byte?;
        consumed += 1;
        node = match trie.step(node, byte) {
            Some(next) => next,
            None => {
                trie.insert_child(node, byte);
                PhraseTrie::ROOT
            }
        };
    }

    Ok((consumed, trie.entry_count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::errors::Lz78Error;
    use std::io::Cursor;

    fn encode_bytes(data: &[u8]) -> (Vec<u8>, EncodeSummary) {
        let mut encoder = StreamingEncoder::new(Vec::new());
        let summary = encoder.encode(&mut Cursor::new(data)).unwrap();
        (encoder.into_inner(), summary)
    }

    #[test]
    fn test_repeated_byte_token_stream() {
        let (out, summary) = encode_bytes(b"aaaa");
        assert_eq!(out, vec![1, 0, 0, 0, 0, b'a', 1, b'a', 0, b'a']);
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.tokens, 3);
        assert_eq!(summary.input_bytes, 4);
        assert_eq!(summary.output_bytes, out.len() as u64);
    }

    #[test]
    fn test_empty_input_writes_header_only() {
        let (out, summary) = encode_bytes(b"");
        assert_eq!(out, vec![1, 0, 0, 0]);
        assert_eq!(summary.tokens, 0);
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.code_width, 1);
    }

    #[test]
    fn test_single_byte() {
        let (out, summary) = encode_bytes(b"x");
        assert_eq!(out, vec![1, 0, 0, 0, 0, b'x']);
        assert_eq!(summary.tokens, 1);
    }

    #[test]
    fn test_flush_uses_prefix_of_pending_phrase() {
        // a | b | ab | ab... ends with pending "ab": flush emits (code of "a", 'b').
        let (out, _) = encode_bytes(b"ababab");
        let body = &out[HEADER_SIZE..];
        let tokens: Vec<(u8, u8)> = body.chunks(2).map(|c| (c[0], c[1])).collect();
        assert_eq!(tokens, vec![(0, b'a'), (0, b'b'), (1, b'b'), (1, b'b')]);
    }

    #[test]
    fn test_wide_codes_when_dictionary_outgrows_a_byte() {
        // Every 2-byte pair (i, j) is distinct, so the dictionary grows past 255.
        let data: Vec<u8> = (0..=255u8).flat_map(|i| [i, i.wrapping_mul(7)]).collect();
        let (out, summary) = encode_bytes(&data);
        assert!(summary.entries > 255);
        assert_eq!(summary.code_width, 2);
        assert_eq!(&out[..HEADER_SIZE], &[2, 0, 0, 0]);
        assert_eq!(summary.output_bytes, out.len() as u64);
    }

    #[test]
    fn test_width_stays_narrow_at_exactly_256_entries() {
        // 256 fresh single-byte phrases: codes 1..=256 are assigned but every
        // token carries code 0, and the highest code that could appear is 255.
        let data: Vec<u8> = (0..=255u8).collect();
        let (out, summary) = encode_bytes(&data);
        assert_eq!(summary.entries, 256);
        assert_eq!(summary.code_width, 1);
        assert_eq!(&out[..HEADER_SIZE], &[1, 0, 0, 0]);
        assert_eq!(out.len(), HEADER_SIZE + 256 * 2);
    }

    #[test]
    fn test_width_grows_at_257_entries() {
        // The pair "\0\0" becomes entry 257, so code 256 may be referenced.
        let mut data: Vec<u8> = (0..=255u8).collect();
        data.extend_from_slice(&[0, 0]);
        let (_, summary) = encode_bytes(&data);
        assert_eq!(summary.entries, 257);
        assert_eq!(summary.code_width, 2);
    }

    #[test]
    fn test_encodes_from_current_position() {
        let mut cursor = Cursor::new(b"skip:aaaa".to_vec());
        cursor.set_position(5);
        let mut encoder = StreamingEncoder::new(Vec::new());
        let summary = encoder.encode(&mut cursor).unwrap();
        assert_eq!(summary.input_bytes, 4);
        assert_eq!(
            encoder.into_inner(),
            vec![1, 0, 0, 0, 0, b'a', 1, b'a', 0, b'a']
        );
    }

    /// Reader that yields different bytes on the second pass.
    struct ShiftingReader {
        passes: Vec<Vec<u8>>,
        pass: usize,
        pos: usize,
    }

    impl Read for ShiftingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let data = &self.passes[self.pass];
            let n = buf.len().min(data.len() - self.pos);
            buf[..n].copy_from_slice(&data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    impl Seek for ShiftingReader {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            if let SeekFrom::Start(0) = pos {
                if self.pos > 0 {
                    self.pass = (self.pass + 1).min(self.passes.len() - 1);
                }
                self.pos = 0;
            }
            Ok(self.pos as u64)
        }
    }

    #[test]
    fn test_input_growing_between_passes_overflows() {
        let small = vec![b'a'; 8];
        let large: Vec<u8> = (0..=255u8).flat_map(|i| [i, i.wrapping_mul(7)]).collect();
        let mut reader = ShiftingReader {
            passes: vec![small, large],
            pass: 0,
            pos: 0,
        };
        let mut encoder = StreamingEncoder::new(Vec::new());
        let err = encoder.encode(&mut reader).unwrap_err();
        assert!(matches!(err, Lz78Error::CodeOverflow { width: 1, .. }));
    }
}

//! Compressed stream framing.
//!
//! ```text
//! offset  size  field
//! 0       4     code width `w` in bytes (u32, little-endian)
//! 4..     w+1   repeating tokens: `w`-byte little-endian code, 1 literal byte
//! ```

use serde::Serialize;
use std::io::{ErrorKind, Read, Write};

use super::errors::{Lz78Error, Result};
use crate::core::Code;

/// Size of the code-width header in bytes.
pub const HEADER_SIZE: usize = 4;

/// Widest code the framing supports, in bytes.
pub const MAX_CODE_WIDTH: usize = 8;

/// One (code, literal) pair of the compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Code of the longest known prefix (0 for the empty phrase)
    pub code: Code,
    /// Byte that follows the prefix
    pub literal: u8,
}

impl Token {
    pub fn new(code: Code, literal: u8) -> Self {
        Token { code, literal }
    }
}

/// Minimum number of whole bytes needed to store `max_code`, never less than 1.
///
/// # Example
///
/// ```
/// use lz78::code_width_for;
///
/// assert_eq!(code_width_for(0), 1);
/// assert_eq!(code_width_for(255), 1);
/// assert_eq!(code_width_for(256), 2);
/// ```
pub fn code_width_for(max_code: Code) -> usize {
    let bits = Code::BITS - max_code.leading_zeros();
    (bits.div_ceil(8) as usize).max(1)
}

/// Writes the 4-byte code-width header.
pub fn write_header<W: Write>(writer: &mut W, code_width: usize) -> Result<()> {
    let width = check_width(code_width as u64)?;
    writer.write_all(&(width as u32).to_le_bytes())?;
    Ok(())
}

/// Reads and validates the 4-byte code-width header.
pub fn read_header<R: Read>(reader: &mut R) -> Result<usize> {
    let mut buf = [0u8; HEADER_SIZE];
    let found = read_full(reader, &mut buf)?;
    if found < HEADER_SIZE {
        return Err(Lz78Error::MalformedHeader {
            expected: HEADER_SIZE,
            found,
        });
    }
    check_width(u32::from_le_bytes(buf) as u64)
}

fn check_width(width: u64) -> Result<usize> {
    match usize::try_from(width) {
        Ok(w) if (1..=MAX_CODE_WIDTH).contains(&w) => Ok(w),
        _ => Err(Lz78Error::InvalidCodeWidth(
            u32::try_from(width).unwrap_or(u32::MAX),
        )),
    }
}

/// Reads until `buf` is full or the reader is exhausted; returns the bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Writes tokens with a fixed code width.
pub struct TokenWriter<W: Write> {
    writer: W,
    code_width: usize,
    written: u64,
}

impl<W: Write> TokenWriter<W> {
    /// Creates a token writer. The header is not written here.
    pub fn new(writer: W, code_width: usize) -> Self {
        TokenWriter {
            writer,
            code_width,
            written: 0,
        }
    }

    /// Writes one token; fails if its code does not fit the width.
    pub fn write_token(&mut self, token: Token) -> Result<()> {
        let width = self.code_width;
        if width < MAX_CODE_WIDTH && token.code >> (8 * width) != 0 {
            return Err(Lz78Error::CodeOverflow {
                code: token.code,
                width,
            });
        }

        let mut frame = [0u8; MAX_CODE_WIDTH + 1];
        frame[..width].copy_from_slice(&token.code.to_le_bytes()[..width]);
        frame[width] = token.literal;
        self.writer.write_all(&frame[..=width])?;
        self.written += 1;
        Ok(())
    }

    /// Tokens written so far.
    pub fn tokens_written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Reads tokens with a fixed code width until the input runs out.
///
/// A partial token at the very end is not an error: reading stops and the
/// leftover byte count is kept in [`trailing_bytes`](TokenReader::trailing_bytes).
pub struct TokenReader<R: Read> {
    reader: R,
    code_width: usize,
    trailing: usize,
    done: bool,
}

impl<R: Read> TokenReader<R> {
    /// Creates a token reader positioned just after the header.
    pub fn new(reader: R, code_width: usize) -> Self {
        TokenReader {
            reader,
            code_width,
            trailing: 0,
            done: false,
        }
    }

    /// Reads the next token, or `None` at end of stream.
    pub fn read_token(&mut self) -> Result<Option<Token>> {
        if self.done {
            return Ok(None);
        }

        let width = self.code_width;
        let mut frame = [0u8; MAX_CODE_WIDTH + 1];
        let n = read_full(&mut self.reader, &mut frame[..=width])?;
        if n <= width {
            self.done = true;
            self.trailing = n;
            return Ok(None);
        }

        let mut code = [0u8; 8];
        code[..width].copy_from_slice(&frame[..width]);
        Ok(Some(Token::new(Code::from_le_bytes(code), frame[width])))
    }

    /// Bytes of an incomplete final token that were discarded.
    pub fn trailing_bytes(&self) -> usize {
        self.trailing
    }

    pub fn code_width(&self) -> usize {
        self.code_width
    }
}

impl<R: Read> Iterator for TokenReader<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_token().transpose()
    }
}

/// Splits a whole compressed buffer into its code width and tokens.
///
/// # Example
///
/// ```
/// use lz78::{Token, compress, read_tokens};
///
/// let compressed = compress(b"aaaa").unwrap();
/// let (width, tokens) = read_tokens(&compressed).unwrap();
/// assert_eq!(width, 1);
/// assert_eq!(
///     tokens,
///     vec![Token::new(0, b'a'), Token::new(1, b'a'), Token::new(0, b'a')]
/// );
/// ```
pub fn read_tokens(mut data: &[u8]) -> Result<(usize, Vec<Token>)> {
    let width = read_header(&mut data)?;
    let tokens = TokenReader::new(data, width).collect::<Result<Vec<_>>>()?;
    Ok((width, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_width_boundaries() {
        assert_eq!(code_width_for(0), 1);
        assert_eq!(code_width_for(1), 1);
        assert_eq!(code_width_for(255), 1);
        assert_eq!(code_width_for(256), 2);
        assert_eq!(code_width_for(65_535), 2);
        assert_eq!(code_width_for(65_536), 3);
        assert_eq!(code_width_for(u32::MAX as Code), 4);
        assert_eq!(code_width_for(Code::MAX), 8);
    }

    #[test]
    fn test_header_layout_is_little_endian_u32() {
        let mut out = Vec::new();
        write_header(&mut out, 3).unwrap();
        assert_eq!(out, vec![3, 0, 0, 0]);
        assert_eq!(read_header(&mut out.as_slice()).unwrap(), 3);
    }

    #[test]
    fn test_short_header_is_malformed() {
        let err = read_header(&mut &[1u8, 0][..]).unwrap_err();
        assert!(matches!(
            err,
            Lz78Error::MalformedHeader {
                expected: 4,
                found: 2
            }
        ));
        assert!(read_header(&mut &[0u8; 0][..]).is_err());
    }

    #[test]
    fn test_header_width_out_of_range() {
        assert!(matches!(
            read_header(&mut &[0u8, 0, 0, 0][..]),
            Err(Lz78Error::InvalidCodeWidth(0))
        ));
        assert!(matches!(
            read_header(&mut &[9u8, 0, 0, 0][..]),
            Err(Lz78Error::InvalidCodeWidth(9))
        ));
        assert!(write_header(&mut Vec::new(), 0).is_err());
    }

    #[test]
    fn test_token_frame_layout() {
        let mut writer = TokenWriter::new(Vec::new(), 2);
        writer.write_token(Token::new(0x0102, b'z')).unwrap();
        writer.write_token(Token::new(0, 0x00)).unwrap();
        assert_eq!(writer.tokens_written(), 2);
        assert_eq!(writer.into_inner(), vec![0x02, 0x01, b'z', 0, 0, 0]);
    }

    #[test]
    fn test_code_overflow_is_rejected() {
        let mut writer = TokenWriter::new(Vec::new(), 1);
        writer.write_token(Token::new(255, b'a')).unwrap();
        let err = writer.write_token(Token::new(256, b'a')).unwrap_err();
        assert!(matches!(err, Lz78Error::CodeOverflow { code: 256, width: 1 }));
        assert_eq!(writer.tokens_written(), 1);
    }

    #[test]
    fn test_reader_stops_cleanly_on_partial_token() {
        // Two full 3-byte tokens followed by a lone code byte.
        let data = [5u8, 0, b'a', 7, 0, b'b', 9];
        let mut reader = TokenReader::new(&data[..], 2);
        assert_eq!(reader.read_token().unwrap(), Some(Token::new(5, b'a')));
        assert_eq!(reader.read_token().unwrap(), Some(Token::new(7, b'b')));
        assert_eq!(reader.read_token().unwrap(), None);
        assert_eq!(reader.read_token().unwrap(), None);
        assert_eq!(reader.trailing_bytes(), 1);
    }

    #[test]
    fn test_reader_iterator_on_exact_end() {
        let data = [1u8, b'x', 2, b'y'];
        let tokens: Vec<Token> = TokenReader::new(&data[..], 1)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(tokens, vec![Token::new(1, b'x'), Token::new(2, b'y')]);
    }

    #[test]
    fn test_full_width_codes() {
        let mut writer = TokenWriter::new(Vec::new(), 8);
        writer.write_token(Token::new(Code::MAX, 0xAB)).unwrap();
        let bytes = writer.into_inner();
        let mut reader = TokenReader::new(bytes.as_slice(), 8);
        assert_eq!(
            reader.read_token().unwrap(),
            Some(Token::new(Code::MAX, 0xAB))
        );
    }
}

use super::Code;
use crate::encoders::errors::{Lz78Error, Result};

/// Decoder-side phrase dictionary.
///
/// Codes are dense and arrive in order, so the table is a plain vector
/// indexed by code. Code 0 is bound to the empty phrase at construction.
#[derive(Debug, Clone)]
pub struct PhraseTable {
    phrases: Vec<Vec<u8>>,
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseTable {
    pub fn new() -> Self {
        PhraseTable {
            phrases: vec![Vec::new()],
        }
    }

    /// The code the next [`register`](PhraseTable::register) call must use.
    pub fn next_code(&self) -> Code {
        self.phrases.len() as Code
    }

    /// Binds `code` to `phrase`.
    ///
    /// Codes must be registered as 1, 2, 3, … with no gaps or repeats.
    pub fn register(&mut self, code: Code, phrase: Vec<u8>) -> Result<()> {
        let expected = self.next_code();
        if code != expected {
            return Err(Lz78Error::CodeOutOfSequence { code, expected });
        }
        self.phrases.push(phrase);
        Ok(())
    }

    /// Returns the phrase bound to `code`.
    pub fn resolve(&self, code: Code) -> Result<&[u8]> {
        usize::try_from(code)
            .ok()
            .and_then(|index| self.phrases.get(index))
            .map(Vec::as_slice)
            .ok_or(Lz78Error::UnknownCode {
                code,
                registered: self.phrases.len(),
            })
    }

    /// Number of registered phrases, not counting the empty phrase.
    pub fn len(&self) -> usize {
        self.phrases.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sequential byte access over a hub memory image. The bytecode decoders pull
/// one byte at a time and never seek; a cursor belongs to exactly one decoding
/// sequence at a time.
pub trait ByteSource {
    /// Read the byte under the cursor and advance past it.
    fn read_byte(&mut self) -> Result<u8, DecodeError>;
    /// Offset of the next byte to be read.
    fn position(&self) -> usize;
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("byte stream exhausted at offset {offset:#06x}")]
    StreamExhausted { offset: usize },
}

/// Cursor over an in-memory image slice.
#[derive(Debug, Clone)]
pub struct MemoryCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> MemoryCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Start the cursor at `pos` instead of the beginning of the slice.
    pub fn at(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }
}

impl ByteSource for MemoryCursor<'_> {
    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        match self.bytes.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                Ok(b)
            }
            None => Err(DecodeError::StreamExhausted { offset: self.pos }),
        }
    }

    fn position(&self) -> usize {
        self.pos
    }
}

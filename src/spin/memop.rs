//! Register memory-operation bytecode decoding.
//!
//! One byte names a register (low nibble, biased into the $1E0 window), a
//! table selector (bit 4: hardware special register vs. generic memory slot)
//! and an action code. Reserved action codes still decode, classified as
//! unknown.

use serde::Serialize;

use crate::registers;
use crate::stream::{ByteSource, DecodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemoryAction {
    Push,
    Pop,
    Effect,
    /// Reserved/unassigned action code in the current ISA revision.
    Unknown(u8),
}

impl MemoryAction {
    fn from_code(code: u8) -> Self {
        match code {
            4 => MemoryAction::Push,
            5 => MemoryAction::Pop,
            6 => MemoryAction::Effect,
            c => MemoryAction::Unknown(c),
        }
    }
}

/// One decoded register memory-operation byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedMemoryOperation {
    opcode: u8,
}

impl ParsedMemoryOperation {
    /// Consume one byte from the stream and decode it.
    pub fn parse(stream: &mut impl ByteSource) -> Result<Self, DecodeError> {
        Ok(Self::from_byte(stream.read_byte()?))
    }

    pub fn from_byte(opcode: u8) -> Self {
        Self { opcode }
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Index into the selected register table (low nibble).
    pub fn register_index(&self) -> u8 {
        self.opcode & 0x0F
    }

    /// Bit 4: the hardware special-register table rather than the slot table.
    pub fn uses_hardware_register(&self) -> bool {
        self.opcode & 0x10 != 0
    }

    /// Synthesized 9-bit cog address: the low five bits biased into the $1E0
    /// window, landing in $1F0..$1FF when the hardware selector is set.
    pub fn address(&self) -> u16 {
        0x1E0 | (self.opcode & 0x1F) as u16
    }

    pub fn action(&self) -> MemoryAction {
        MemoryAction::from_code((self.opcode >> 5) & 0x0F)
    }

    pub fn register_name(&self) -> &'static str {
        if self.uses_hardware_register() {
            registers::hardware(self.register_index()).name
        } else {
            registers::SPIN_REGISTERS[self.register_index() as usize]
        }
    }
}

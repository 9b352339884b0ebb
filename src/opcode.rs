//! Opcode field projection and assembly decoding.
//!
//! A PASM opcode is a fixed 32-bit word; every accessor is a pure projection
//! of it. `DecodedInstruction` resolves the table variant eagerly at
//! construction, so two decodes of the same word always agree.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::bits::field;
use crate::conditions;
use crate::instructions::{self, Instruction, SubInstruction};

bitflags! {
    /// The ZCRI nibble (bits 25:22): effect and addressing flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Zcri: u8 {
        /// Write the Z flag.
        const WZ = 0b1000;
        /// Write the C flag.
        const WC = 0b0100;
        /// Write the result back to DEST.
        const WR = 0b0010;
        /// SRC is a 9-bit literal.
        const IMM = 0b0001;
    }
}

/// An immutable 32-bit PASM opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opcode(pub u32);

impl Opcode {
    /// Instruction table index (bits 31:26).
    pub fn instr(self) -> u8 {
        field(self.0, 26, 6) as u8
    }

    /// Effect/addressing flags (bits 25:22).
    pub fn zcri(self) -> Zcri {
        Zcri::from_bits_truncate(field(self.0, 22, 4) as u8)
    }

    /// Condition code (bits 21:18).
    pub fn con(self) -> u8 {
        field(self.0, 18, 4) as u8
    }

    /// Destination register/address (bits 17:9).
    pub fn dest(self) -> u16 {
        field(self.0, 9, 9) as u16
    }

    /// Source register/address or literal (bits 8:0).
    pub fn src(self) -> u16 {
        field(self.0, 0, 9) as u16
    }
}

/// One decoded PASM instruction: the opcode plus its resolved table variant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DecodedInstruction {
    opcode: Opcode,
    instruction: &'static Instruction,
    variant: &'static SubInstruction,
}

impl DecodedInstruction {
    pub fn decode(raw: u32) -> Self {
        let opcode = Opcode(raw);
        let instruction = instructions::lookup(opcode.instr());
        let variant = instruction.resolve(opcode.zcri(), opcode.src());
        Self { opcode, instruction, variant }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn instruction(&self) -> &'static Instruction {
        self.instruction
    }

    pub fn variant(&self) -> &'static SubInstruction {
        self.variant
    }

    /// Synonym spellings of the condition, canonical form first.
    pub fn condition_names(&self) -> &'static [&'static str] {
        conditions::lookup(self.opcode.con())
    }

    /// Z flag is actually written: bit set and variant honors it.
    pub fn write_z(&self) -> bool {
        self.opcode.zcri().contains(Zcri::WZ) && self.variant.wz
    }

    /// C flag is actually written.
    pub fn write_c(&self) -> bool {
        self.opcode.zcri().contains(Zcri::WC) && self.variant.wc
    }

    /// Result is actually written back to DEST.
    pub fn write_result(&self) -> bool {
        self.opcode.zcri().contains(Zcri::WR) && self.variant.wr
    }

    /// A normally-writing variant had its write suppressed (compare-only form).
    pub fn no_result(&self) -> bool {
        !self.opcode.zcri().contains(Zcri::WR) && self.variant.wr
    }

    /// SRC holds a literal value rather than a register address.
    pub fn immediate(&self) -> bool {
        self.opcode.zcri().contains(Zcri::IMM)
    }
}

/// Decode one raw 32-bit opcode. Total: every bit pattern decodes.
pub fn decode_assembly_opcode(raw: u32) -> DecodedInstruction {
    DecodedInstruction::decode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_pure_projections() {
        // SUB $1A0, #1 with WZ+WR, IF_ALWAYS
        let raw = (0x21u32 << 26) | (0b1011 << 22) | (0xF << 18) | (0x1A0 << 9) | 1;
        let op = Opcode(raw);
        assert_eq!(op.instr(), 0x21);
        assert_eq!(op.zcri(), Zcri::WZ | Zcri::WR | Zcri::IMM);
        assert_eq!(op.con(), 0xF);
        assert_eq!(op.dest(), 0x1A0);
        assert_eq!(op.src(), 1);
    }

    #[test]
    fn all_ones_projects_cleanly() {
        let op = Opcode(u32::MAX);
        assert_eq!(op.instr(), 0x3F);
        assert_eq!(op.zcri(), Zcri::all());
        assert_eq!(op.dest(), 0x1FF);
        assert_eq!(op.src(), 0x1FF);
    }
}

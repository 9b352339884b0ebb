//! The 64-entry PASM instruction table and its dispatch resolver.
//!
//! An INSTR value names a family of up to nine textual variants; which one
//! applies depends on the ZCRI flags and, for hub operations, the low bits of
//! the SRC field. The table is static and never mutated at runtime.

use serde::Serialize;

use crate::opcode::Zcri;

/// How a table entry picks among its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dispatch {
    /// Exactly one variant.
    Normal,
    /// Two variants, selected by the write-result flag (set -> index 0).
    Wr,
    /// Up to nine variants, selected by `src & 0b111`.
    Hub,
    /// Four variants: JMP / RET / JMPRET / CALL, see [`Instruction::resolve`].
    Jump,
}

/// One textual interpretation of an opcode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubInstruction {
    pub name: &'static str,
    /// DEST field holds an operand.
    pub dest: bool,
    /// SRC field holds an operand.
    pub source: bool,
    /// Variant honors the write-Z flag at all.
    pub wz: bool,
    /// Variant honors the write-C flag at all.
    pub wc: bool,
    /// Result write-back is controlled by the write-result flag (as opposed
    /// to being fixed for the variant).
    pub wr: bool,
    /// SRC denotes a literal when the immediate-value flag is set.
    pub imm: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Instruction {
    pub dispatch: Dispatch,
    pub variants: &'static [SubInstruction],
}

const fn v(
    name: &'static str,
    dest: bool,
    source: bool,
    wz: bool,
    wc: bool,
    wr: bool,
    imm: bool,
) -> SubInstruction {
    SubInstruction { name, dest, source, wz, wc, wr, imm }
}

/// Common shape: D and S operands, all ZCRI bits meaningful.
const fn full(name: &'static str) -> SubInstruction {
    v(name, true, true, true, true, true, true)
}

/// Hub operation selected through SRC; S is consumed by the selection.
const fn hub(name: &'static str) -> SubInstruction {
    v(name, true, false, true, true, true, false)
}

const fn normal(variant: &'static [SubInstruction; 1]) -> Instruction {
    Instruction { dispatch: Dispatch::Normal, variants: variant }
}

const fn wr(pair: &'static [SubInstruction; 2]) -> Instruction {
    Instruction { dispatch: Dispatch::Wr, variants: pair }
}

/// PASM instruction table, indexed by INSTR (bits 31:26).
pub const INSTRUCTIONS: [Instruction; 64] = [
    // 0x00..0x03: hub memory and hub control
    wr(&[full("RDBYTE"), full("WRBYTE")]),
    wr(&[full("RDWORD"), full("WRWORD")]),
    wr(&[full("RDLONG"), full("WRLONG")]),
    Instruction {
        dispatch: Dispatch::Hub,
        variants: &[
            hub("CLKSET"),
            hub("COGID"),
            hub("COGINIT"),
            hub("COGSTOP"),
            hub("LOCKNEW"),
            hub("LOCKRET"),
            hub("LOCKSET"),
            hub("LOCKCLR"),
            // Defined in the table data but unreachable through `src & 0b111`;
            // kept to match the chip's documented table exactly.
            full("HUBOP"),
        ],
    },
    // 0x04..0x07: encodings reserved on current silicon, names still defined
    normal(&[full("MUL")]),
    normal(&[full("MULS")]),
    normal(&[full("ENC")]),
    normal(&[full("ONES")]),
    // 0x08..0x0F: shifts and rotates
    normal(&[full("ROR")]),
    normal(&[full("ROL")]),
    normal(&[full("SHR")]),
    normal(&[full("SHL")]),
    normal(&[full("RCR")]),
    normal(&[full("RCL")]),
    normal(&[full("SAR")]),
    normal(&[full("REV")]),
    // 0x10..0x16: limits and field moves
    normal(&[full("MINS")]),
    normal(&[full("MAXS")]),
    normal(&[full("MIN")]),
    normal(&[full("MAX")]),
    normal(&[full("MOVS")]),
    normal(&[full("MOVD")]),
    normal(&[full("MOVI")]),
    // 0x17: the jump/call family
    Instruction {
        dispatch: Dispatch::Jump,
        variants: &[
            v("JMP", false, true, true, true, false, true),
            v("RET", false, false, true, true, false, true),
            v("JMPRET", true, true, true, true, true, true),
            v("CALL", false, true, true, true, true, true),
        ],
    },
    // 0x18..0x1F: logic
    wr(&[full("AND"), full("TEST")]),
    wr(&[full("ANDN"), full("TESTN")]),
    normal(&[full("OR")]),
    normal(&[full("XOR")]),
    normal(&[full("MUXC")]),
    normal(&[full("MUXNC")]),
    normal(&[full("MUXZ")]),
    normal(&[full("MUXNZ")]),
    // 0x20..0x27: add/subtract families
    normal(&[full("ADD")]),
    wr(&[full("SUB"), full("CMP")]),
    normal(&[full("ADDABS")]),
    normal(&[full("SUBABS")]),
    normal(&[full("SUMC")]),
    normal(&[full("SUMNC")]),
    normal(&[full("SUMZ")]),
    normal(&[full("SUMNZ")]),
    // 0x28..0x2F: moves and negates
    normal(&[full("MOV")]),
    normal(&[full("NEG")]),
    normal(&[full("ABS")]),
    normal(&[full("ABSNEG")]),
    normal(&[full("NEGC")]),
    normal(&[full("NEGNC")]),
    normal(&[full("NEGZ")]),
    normal(&[full("NEGNZ")]),
    // 0x30..0x38: signed/extended arithmetic
    normal(&[full("CMPS")]),
    normal(&[full("CMPSX")]),
    normal(&[full("ADDX")]),
    wr(&[full("SUBX"), full("CMPX")]),
    normal(&[full("ADDS")]),
    normal(&[full("SUBS")]),
    normal(&[full("ADDSX")]),
    normal(&[full("SUBSX")]),
    normal(&[full("CMPSUB")]),
    // 0x39..0x3B: decrement/test jumps
    normal(&[full("DJNZ")]),
    normal(&[v("TJNZ", true, true, true, true, false, true)]),
    normal(&[v("TJZ", true, true, true, true, false, true)]),
    // 0x3C..0x3F: waits
    normal(&[v("WAITPEQ", true, true, false, false, false, true)]),
    normal(&[v("WAITPNE", true, true, false, false, false, true)]),
    normal(&[full("WAITCNT")]),
    normal(&[v("WAITVID", true, true, false, false, false, true)]),
];

impl Instruction {
    /// Pick the variant selected by the opcode's auxiliary fields.
    ///
    /// The Jump rule is an ISA encoding quirk, preserved exactly: with the
    /// write-result bit clear the entry decodes as JMP, except that an
    /// all-zero SRC decodes as RET; with it set, the immediate bit picks
    /// JMPRET or CALL.
    pub fn resolve(&'static self, zcri: Zcri, src: u16) -> &'static SubInstruction {
        match self.dispatch {
            Dispatch::Normal => &self.variants[0],
            Dispatch::Wr => {
                if zcri.contains(Zcri::WR) {
                    &self.variants[0]
                } else {
                    &self.variants[1]
                }
            }
            Dispatch::Hub => &self.variants[(src & 0b111) as usize],
            Dispatch::Jump => {
                let n = (zcri.bits() & 0b11) as usize;
                if n <= 1 {
                    if src == 0 {
                        &self.variants[1]
                    } else {
                        &self.variants[0]
                    }
                } else {
                    &self.variants[n]
                }
            }
        }
    }
}

/// Table entry for an INSTR value. Only the low 6 bits participate.
pub fn lookup(instr: u8) -> &'static Instruction {
    &INSTRUCTIONS[(instr & 0x3F) as usize]
}

//! Assignment and math-operator bytecode decoding.
//!
//! One byte encodes either a math operator (bit 6 set: the low five bits
//! index a 32-entry operator table directly) or a read-modify-write
//! assignment family (bit 6 clear: bits 5:3 pick one of eight families, and
//! the family's kind decides which auxiliary bit selects the final variant).
//! Each resolved variant names the operand-unpacking rule the caller must
//! invoke next to consume trailing bytes, if any.

use serde::Serialize;

use crate::stream::{ByteSource, DecodeError};

/// Trailing-operand rule attached to a resolved variant. `Effect` means the
/// next byte is itself an assignment bytecode to be parsed recursively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArgumentMode {
    None,
    Effect,
    SignedOffset,
    SignedPackedOffset,
    PackedOffset,
    PackedLiteral,
    WordLiteral,
    NearLongLiteral,
    LongLiteral,
}

/// Variant-selection rule for an assignment family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentKind {
    /// Bit 1 selects variant 0 or 1.
    WriteRepeat,
    /// Bit 2 selects variant 0 or 1.
    Normal,
    /// The 2-bit size field (bits 2:1) selects among up to four variants.
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubAssignment {
    pub name: &'static str,
    pub argument: ArgumentMode,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Assignment {
    pub kind: AssignmentKind,
    pub variants: &'static [SubAssignment],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MathOp {
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn sa(name: &'static str) -> SubAssignment {
    SubAssignment { name, argument: ArgumentMode::None }
}

/// The eight assignment families, indexed by bits 5:3 of the bytecode.
pub const ASSIGNMENTS: [Assignment; 8] = [
    Assignment {
        kind: AssignmentKind::WriteRepeat,
        variants: &[
            sa("COPY"),
            SubAssignment { name: "REPEAT_COMPARE", argument: ArgumentMode::SignedOffset },
        ],
    },
    Assignment {
        kind: AssignmentKind::Normal,
        variants: &[sa("RANDOM_FORWARD"), sa("RANDOM_REVERSE")],
    },
    Assignment {
        kind: AssignmentKind::Normal,
        variants: &[sa("SIGN_EXTEND_BYTE"), sa("SIGN_EXTEND_WORD")],
    },
    Assignment {
        kind: AssignmentKind::Normal,
        variants: &[sa("POST_CLEAR"), sa("POST_SET")],
    },
    Assignment {
        kind: AssignmentKind::Size,
        variants: &[
            sa("PRE_INCREMENT_BITS"),
            sa("PRE_INCREMENT_BYTE"),
            sa("PRE_INCREMENT_WORD"),
            sa("PRE_INCREMENT_LONG"),
        ],
    },
    Assignment {
        kind: AssignmentKind::Size,
        variants: &[
            sa("POST_INCREMENT_BITS"),
            sa("POST_INCREMENT_BYTE"),
            sa("POST_INCREMENT_WORD"),
            sa("POST_INCREMENT_LONG"),
        ],
    },
    Assignment {
        kind: AssignmentKind::Size,
        variants: &[
            sa("PRE_DECREMENT_BITS"),
            sa("PRE_DECREMENT_BYTE"),
            sa("PRE_DECREMENT_WORD"),
            sa("PRE_DECREMENT_LONG"),
        ],
    },
    Assignment {
        kind: AssignmentKind::Size,
        variants: &[
            sa("POST_DECREMENT_BITS"),
            sa("POST_DECREMENT_BYTE"),
            sa("POST_DECREMENT_WORD"),
            sa("POST_DECREMENT_LONG"),
        ],
    },
];

const fn m(name: &'static str, symbol: &'static str) -> MathOp {
    MathOp { name, symbol }
}

/// The 32 math operators, indexed by bits 4:0 of a math bytecode.
pub const MATH_OPS: [MathOp; 32] = [
    m("ROTATE_RIGHT", "->"),
    m("ROTATE_LEFT", "<-"),
    m("SHIFT_RIGHT", ">>"),
    m("SHIFT_LEFT", "<<"),
    m("LIMIT_MINIMUM", "#>"),
    m("LIMIT_MAXIMUM", "<#"),
    m("NEGATE", "-"),
    m("COMPLEMENT", "!"),
    m("BIT_AND", "&"),
    m("ABSOLUTE_VALUE", "||"),
    m("BIT_OR", "|"),
    m("BIT_XOR", "^"),
    m("ADD", "+"),
    m("SUBTRACT", "-"),
    m("SAR", "~>"),
    m("BIT_REVERSE", "><"),
    m("LOGICAL_AND", "AND"),
    m("ENCODE", ">|"),
    m("LOGICAL_OR", "OR"),
    m("DECODE", "|<"),
    m("MULTIPLY", "*"),
    m("MULTIPLY_HI", "**"),
    m("DIVIDE", "/"),
    m("MODULO", "//"),
    m("SQUARE_ROOT", "^^"),
    m("LESS", "<"),
    m("GREATER", ">"),
    m("NOT_EQUAL", "<>"),
    m("EQUAL", "=="),
    m("LESS_EQUAL", "=<"),
    m("GREATER_EQUAL", "=>"),
    m("LOGICAL_NOT", "NOT"),
];

/// The operator entry a bytecode resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolvedAssignment {
    Math(&'static MathOp),
    Modify(&'static SubAssignment),
}

/// One decoded assignment/operator bytecode. The variant is resolved eagerly
/// from the byte's fields, so repeated queries always agree.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParsedAssignment {
    opcode: u8,
    resolved: ResolvedAssignment,
}

impl ParsedAssignment {
    /// Consume one byte from the stream and decode it.
    pub fn parse(stream: &mut impl ByteSource) -> Result<Self, DecodeError> {
        Ok(Self::from_byte(stream.read_byte()?))
    }

    pub fn from_byte(opcode: u8) -> Self {
        let resolved = if opcode & 0x40 != 0 {
            ResolvedAssignment::Math(&MATH_OPS[(opcode & 0x1F) as usize])
        } else {
            let family = &ASSIGNMENTS[((opcode >> 3) & 0b111) as usize];
            let index = match family.kind {
                AssignmentKind::WriteRepeat => (opcode >> 1 & 1) as usize,
                AssignmentKind::Normal => (opcode >> 2 & 1) as usize,
                AssignmentKind::Size => ((opcode & 0x06) >> 1) as usize,
            };
            ResolvedAssignment::Modify(&family.variants[index])
        };
        Self { opcode, resolved }
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Result is pushed onto the interpreter stack.
    pub fn push(&self) -> bool {
        self.opcode & 0x80 != 0
    }

    /// Byte encodes a math operator rather than an assignment family.
    pub fn math(&self) -> bool {
        self.opcode & 0x40 != 0
    }

    /// Operand-swap bit; meaningful for math operators only.
    pub fn swap(&self) -> bool {
        self.opcode & 0x20 != 0
    }

    /// Assignment-family selector (bits 5:3); meaningful when `math` is clear.
    pub fn family(&self) -> u8 {
        (self.opcode >> 3) & 0b111
    }

    /// Math-operator selector (bits 4:0); meaningful when `math` is set.
    pub fn math_index(&self) -> u8 {
        self.opcode & 0x1F
    }

    pub fn bit1(&self) -> bool {
        self.opcode & 0x02 != 0
    }

    pub fn bit2(&self) -> bool {
        self.opcode & 0x04 != 0
    }

    /// The 2-bit size field (bits 2:1).
    pub fn size(&self) -> u8 {
        (self.opcode & 0x06) >> 1
    }

    pub fn resolved(&self) -> ResolvedAssignment {
        self.resolved
    }

    /// Display name of the resolved operator entry.
    pub fn name(&self) -> &'static str {
        match self.resolved {
            ResolvedAssignment::Math(op) => op.name,
            ResolvedAssignment::Modify(sub) => sub.name,
        }
    }

    /// Unpacking rule the caller must invoke next for trailing operand bytes.
    pub fn argument(&self) -> ArgumentMode {
        match self.resolved {
            ResolvedAssignment::Math(_) => ArgumentMode::None,
            ResolvedAssignment::Modify(sub) => sub.argument,
        }
    }
}

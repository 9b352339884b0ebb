pub mod bits;
pub mod conditions;
pub mod disasm;
pub mod instructions;
pub mod opcode;
pub mod registers;
pub mod stream;

pub mod spin {
    pub mod assign;
    pub mod memop;
    pub mod operands;
}

pub use opcode::{decode_assembly_opcode, DecodedInstruction, Opcode, Zcri};
pub use stream::{ByteSource, DecodeError, MemoryCursor};

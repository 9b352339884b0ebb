//! Register name tables.
//!
//! The assembly ISA maps sixteen special-purpose hardware registers into the
//! top of each cog's address space ($1F0..$1FF). Spin register bytecodes can
//! also target sixteen generic memory-slot registers that carry no read/write
//! distinction.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Register {
    pub name: &'static str,
    pub readable: bool,
    pub writable: bool,
}

/// First cog address of the special-register window.
pub const HW_REGISTER_BASE: u16 = 0x1F0;
/// Number of special registers in the window.
pub const HW_REGISTER_COUNT: u16 = 16;

const fn r(name: &'static str) -> Register {
    Register { name, readable: true, writable: false }
}

const fn rw(name: &'static str) -> Register {
    Register { name, readable: true, writable: true }
}

pub const HW_REGISTERS: [Register; 16] = [
    r("PAR"),
    r("CNT"),
    r("INA"),
    r("INB"),
    rw("OUTA"),
    rw("OUTB"),
    rw("DIRA"),
    rw("DIRB"),
    rw("CTRA"),
    rw("CTRB"),
    rw("FRQA"),
    rw("FRQB"),
    rw("PHSA"),
    rw("PHSB"),
    rw("VCFG"),
    rw("VSCL"),
];

/// Spin memory-slot register names, indexed by the low nibble of a register
/// memory-operation byte.
pub const SPIN_REGISTERS: [&str; 16] = [
    "MEM_0", "MEM_1", "MEM_2", "MEM_3", "MEM_4", "MEM_5", "MEM_6", "MEM_7",
    "MEM_8", "MEM_9", "MEM_A", "MEM_B", "MEM_C", "MEM_D", "MEM_E", "MEM_F",
];

/// Special register by window index (0..16).
pub fn hardware(index: u8) -> &'static Register {
    &HW_REGISTERS[(index & 0x0F) as usize]
}

/// Special register by cog address, `None` outside the $1F0..$1FF window.
pub fn hardware_lookup(address: u16) -> Option<&'static Register> {
    if (HW_REGISTER_BASE..HW_REGISTER_BASE + HW_REGISTER_COUNT).contains(&address) {
        Some(&HW_REGISTERS[(address - HW_REGISTER_BASE) as usize])
    } else {
        None
    }
}

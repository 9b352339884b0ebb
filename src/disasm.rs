//! Text rendering of decoded records, in the style of Propeller listings.

use crate::opcode::DecodedInstruction;
use crate::registers;
use crate::spin::assign::{ParsedAssignment, ResolvedAssignment};
use crate::spin::memop::{MemoryAction, ParsedMemoryOperation};

/// Format one decoded PASM instruction. The never condition renders as NOP,
/// the always condition renders with no prefix.
pub fn fmt_instruction(d: &DecodedInstruction) -> String {
    if d.opcode().con() == 0 {
        return "NOP".to_string();
    }

    let mut out = String::new();
    let cond = d.condition_names()[0];
    if !cond.is_empty() {
        out.push_str(cond);
        out.push(' ');
    }
    out.push_str(d.variant().name);

    let mut first_operand = true;
    if d.variant().dest {
        out.push(' ');
        out.push_str(&reg_or_addr(d.opcode().dest()));
        first_operand = false;
    }
    if d.variant().source {
        out.push_str(if first_operand { " " } else { ", " });
        if d.variant().imm && d.immediate() {
            out.push_str(&format!("#{}", d.opcode().src()));
        } else {
            out.push_str(&reg_or_addr(d.opcode().src()));
        }
    }

    let mut effects = Vec::new();
    if d.write_z() {
        effects.push("WZ");
    }
    if d.write_c() {
        effects.push("WC");
    }
    if d.no_result() {
        effects.push("NR");
    }
    if !effects.is_empty() {
        out.push(' ');
        out.push_str(&effects.join(", "));
    }
    out
}

fn reg_or_addr(addr: u16) -> String {
    match registers::hardware_lookup(addr) {
        Some(reg) => reg.name.to_string(),
        None => format!("${addr:03X}"),
    }
}

/// Format one decoded assignment/operator bytecode.
pub fn fmt_assignment(a: &ParsedAssignment) -> String {
    let mut out = String::new();
    if a.push() {
        out.push_str("PUSH ");
    }
    match a.resolved() {
        ResolvedAssignment::Math(op) => {
            out.push_str(op.name);
            if a.swap() {
                out.push_str(" SWAP");
            }
        }
        ResolvedAssignment::Modify(sub) => out.push_str(sub.name),
    }
    out
}

/// Format one decoded register memory-operation byte.
pub fn fmt_memory_operation(op: &ParsedMemoryOperation) -> String {
    let action = match op.action() {
        MemoryAction::Push => "PUSH".to_string(),
        MemoryAction::Pop => "POP".to_string(),
        MemoryAction::Effect => "EFFECT".to_string(),
        MemoryAction::Unknown(code) => format!("UNKNOWN_{code}"),
    };
    format!("{action} {} (${:03X})", op.register_name(), op.address())
}

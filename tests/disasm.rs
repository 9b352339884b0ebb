use pretty_assertions::assert_eq;

use propeller_rs::decode_assembly_opcode;
use propeller_rs::disasm::{fmt_assignment, fmt_instruction, fmt_memory_operation};
use propeller_rs::spin::assign::ParsedAssignment;
use propeller_rs::spin::memop::ParsedMemoryOperation;

fn enc(instr: u32, zcri: u32, con: u32, dest: u32, src: u32) -> u32 {
    ((instr & 0x3F) << 26)
        | ((zcri & 0xF) << 22)
        | ((con & 0xF) << 18)
        | ((dest & 0x1FF) << 9)
        | (src & 0x1FF)
}

#[test]
fn unconditional_add_with_effects() {
    // ADD $1A0, #1 WZ (WR set, so no NR annotation)
    let d = decode_assembly_opcode(enc(0x20, 0b1011, 0xF, 0x1A0, 1));
    assert_eq!(fmt_instruction(&d), "ADD $1A0, #1 WZ");
}

#[test]
fn condition_prefix_uses_canonical_synonym() {
    let d = decode_assembly_opcode(enc(0x20, 0b0011, 0x5, 0x1A0, 1));
    assert_eq!(fmt_instruction(&d), "IF_NZ ADD $1A0, #1");
}

#[test]
fn never_condition_renders_as_nop() {
    let d = decode_assembly_opcode(enc(0x20, 0b0011, 0x0, 0x1A0, 1));
    assert_eq!(fmt_instruction(&d), "NOP");
}

#[test]
fn compare_form_annotates_suppressed_write() {
    let d = decode_assembly_opcode(enc(0x21, 0b1100, 0xF, 2, 3));
    assert_eq!(fmt_instruction(&d), "CMP $002, $003 WZ, WC, NR");
}

#[test]
fn special_register_names_substituted_in_window() {
    let d = decode_assembly_opcode(enc(0x02, 0b0010, 0xF, 0x1F4, 0x1F0));
    assert_eq!(fmt_instruction(&d), "RDLONG OUTA, PAR");
}

#[test]
fn ret_renders_bare() {
    let d = decode_assembly_opcode(enc(0x17, 0b0001, 0xF, 0, 0));
    assert_eq!(fmt_instruction(&d), "RET");
}

#[test]
fn hub_variant_shows_dest_only() {
    let d = decode_assembly_opcode(enc(0x03, 0b0011, 0xF, 0x008, 1));
    assert_eq!(fmt_instruction(&d), "COGID $008");
}

#[test]
fn assignment_and_memop_lines() {
    assert_eq!(fmt_assignment(&ParsedAssignment::from_byte(0xEC)), "PUSH ADD SWAP");
    assert_eq!(fmt_assignment(&ParsedAssignment::from_byte(0x02)), "REPEAT_COMPARE");
    assert_eq!(
        fmt_memory_operation(&ParsedMemoryOperation::from_byte(0x91)),
        "PUSH CNT ($1F1)"
    );
    assert_eq!(
        fmt_memory_operation(&ParsedMemoryOperation::from_byte(0xA0)),
        "POP MEM_0 ($1E0)"
    );
}

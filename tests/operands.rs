use pretty_assertions::assert_eq;

use propeller_rs::spin::operands::{
    long_literal, near_long_literal, packed_literal, packed_offset, signed_offset,
    signed_packed_offset, word_literal, INVALID_PACKED_LITERAL,
};
use propeller_rs::{ByteSource, DecodeError, MemoryCursor};

#[test]
fn signed_offset_single_byte() {
    let mut cur = MemoryCursor::new(&[0x05]);
    let op = signed_offset(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (5, 1));

    // bit 6 set, high bit clear: 7-bit two's complement
    let mut cur = MemoryCursor::new(&[0x7F]);
    let op = signed_offset(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (-1, 1));
}

#[test]
fn signed_offset_two_bytes() {
    let mut cur = MemoryCursor::new(&[0x81, 0x00]);
    let op = signed_offset(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (256, 2));

    // 15-bit value with bit 14 set sign-extends negative
    let mut cur = MemoryCursor::new(&[0xFF, 0xFF]);
    let op = signed_offset(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (-1, 2));
}

#[test]
fn signed_packed_offset_folds_bit_six() {
    // 0x45: bit 6 set, duplicated into bit 7 -> 0xC5 as i8 = -59
    let mut cur = MemoryCursor::new(&[0x45]);
    let op = signed_packed_offset(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (-59, 1));

    // bit 6 clear stays positive
    let mut cur = MemoryCursor::new(&[0x25]);
    let op = signed_packed_offset(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (0x25, 1));

    // high bit set: folded first byte combines with a second into an i16
    let mut cur = MemoryCursor::new(&[0xC1, 0x02]);
    let op = signed_packed_offset(&mut cur).unwrap();
    // folded = 0xC1 & 0x7F | 0x80 = 0xC1 -> 0xC102 as i16
    assert_eq!((op.value, op.consumed), (0xC102u16 as i16 as i32, 2));
}

#[test]
fn packed_offset_unsigned_forms() {
    let mut cur = MemoryCursor::new(&[0x7F]);
    let op = packed_offset(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (0x7F, 1));

    let mut cur = MemoryCursor::new(&[0x81, 0x00]);
    let op = packed_offset(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (0x0100, 2));
}

#[test]
fn packed_literal_exponential_forms() {
    let mut cur = MemoryCursor::new(&[0x00, 0x20, 0x40, 0x25]);
    assert_eq!(packed_literal(&mut cur).unwrap().value, 2);
    assert_eq!(packed_literal(&mut cur).unwrap().value, 1);
    assert_eq!(packed_literal(&mut cur).unwrap().value, !2u32);
    // 2 << 5 = 64, minus 1 = 63
    assert_eq!(packed_literal(&mut cur).unwrap().value, 63);
}

#[test]
fn packed_literal_invalid_byte_substitutes_sentinel() {
    let mut cur = MemoryCursor::new(&[0x85, 0xFF]);
    let op = packed_literal(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (INVALID_PACKED_LITERAL, 1));
    // Recovery consumed exactly one byte
    assert_eq!(cur.position(), 1);
}

#[test]
fn fixed_width_literals_are_big_endian() {
    let mut cur = MemoryCursor::new(&[0x01, 0x02]);
    assert_eq!(word_literal(&mut cur).unwrap().value, 0x0102);

    let mut cur = MemoryCursor::new(&[0x01, 0x02, 0x03]);
    let op = near_long_literal(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (0x010203, 3));

    let mut cur = MemoryCursor::new(&[0x01, 0x02, 0x03, 0x04]);
    let op = long_literal(&mut cur).unwrap();
    assert_eq!((op.value, op.consumed), (0x01020304, 4));
}

#[test]
fn exhaustion_propagates_from_every_unpacker() {
    let empty: &[u8] = &[];
    let exhausted = Some(DecodeError::StreamExhausted { offset: 0 });
    assert_eq!(signed_offset(&mut MemoryCursor::new(empty)).err(), exhausted);
    assert_eq!(signed_packed_offset(&mut MemoryCursor::new(empty)).err(), exhausted);
    assert_eq!(packed_offset(&mut MemoryCursor::new(empty)).err(), exhausted);
    assert_eq!(packed_literal(&mut MemoryCursor::new(empty)).err(), exhausted);
    assert_eq!(word_literal(&mut MemoryCursor::new(empty)).err(), exhausted);
    assert_eq!(long_literal(&mut MemoryCursor::new(empty)).err(), exhausted);
}

#[test]
fn exhaustion_mid_operand_is_not_recovered() {
    // Two-byte form announced, second byte missing
    let mut cur = MemoryCursor::new(&[0x81]);
    assert_eq!(
        signed_offset(&mut cur),
        Err(DecodeError::StreamExhausted { offset: 1 })
    );

    let mut cur = MemoryCursor::new(&[0x01, 0x02, 0x03]);
    assert_eq!(
        long_literal(&mut cur),
        Err(DecodeError::StreamExhausted { offset: 3 })
    );
}

//! Variable-length Spin operand unpackers.
//!
//! Each function consumes one or more bytes from a [`ByteSource`] and returns
//! the decoded integer together with the number of bytes consumed. They are
//! pure transformations of the consumed bytes; exhaustion is always propagated
//! to the caller, never papered over.

use serde::Serialize;
use tracing::warn;

use crate::bits::sign_extend;
use crate::stream::{ByteSource, DecodeError};

/// Sentinel substituted for a malformed packed-literal byte (>= 0x80). The
/// source format documents this recovery without resolving it further, so the
/// substitution is kept as-is.
pub const INVALID_PACKED_LITERAL: u32 = 0x5555_5555;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignedOperand {
    pub value: i32,
    pub consumed: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnsignedOperand {
    pub value: u32,
    pub consumed: u8,
}

/// Signed branch offset: one byte sign-extended from bit 6, or, when the high
/// bit of the first byte is set, a 15-bit big-endian pair sign-extended from
/// bit 14.
pub fn signed_offset(stream: &mut impl ByteSource) -> Result<SignedOperand, DecodeError> {
    let first = stream.read_byte()?;
    if first & 0x80 == 0 {
        Ok(SignedOperand { value: sign_extend(first as u32, 7), consumed: 1 })
    } else {
        let second = stream.read_byte()?;
        let raw = (((first & 0x7F) as u32) << 8) | second as u32;
        Ok(SignedOperand { value: sign_extend(raw, 15), consumed: 2 })
    }
}

/// Signed packed offset: the first byte's bit 6 is duplicated into bit 7 and
/// the result read as a signed 8-bit value, or, when the original high bit is
/// set, combined with a second byte into a signed 16-bit value.
pub fn signed_packed_offset(stream: &mut impl ByteSource) -> Result<SignedOperand, DecodeError> {
    let first = stream.read_byte()?;
    let folded = (first & 0x7F) | ((first << 1) & 0x80);
    if first & 0x80 == 0 {
        Ok(SignedOperand { value: folded as i8 as i32, consumed: 1 })
    } else {
        let second = stream.read_byte()?;
        let raw = ((folded as u16) << 8) | second as u16;
        Ok(SignedOperand { value: raw as i16 as i32, consumed: 2 })
    }
}

/// Unsigned offset: low 7 bits of one byte, or a 15-bit big-endian pair when
/// the first byte's high bit is set.
pub fn packed_offset(stream: &mut impl ByteSource) -> Result<UnsignedOperand, DecodeError> {
    let first = stream.read_byte()?;
    if first & 0x80 == 0 {
        Ok(UnsignedOperand { value: (first & 0x7F) as u32, consumed: 1 })
    } else {
        let second = stream.read_byte()?;
        let value = (((first & 0x7F) as u32) << 8) | second as u32;
        Ok(UnsignedOperand { value, consumed: 2 })
    }
}

/// Exponential literal packing: `2 << exp`, minus one if bit 5 is set,
/// complemented if bit 6 is set. Compactly encodes power-of-two masks and
/// their complements. A byte >= 0x80 is invalid; the documented recovery is
/// to substitute [`INVALID_PACKED_LITERAL`] rather than fail.
pub fn packed_literal(stream: &mut impl ByteSource) -> Result<UnsignedOperand, DecodeError> {
    let byte = stream.read_byte()?;
    if byte >= 0x80 {
        warn!("invalid packed literal {byte:#04x}, substituting sentinel");
        return Ok(UnsignedOperand { value: INVALID_PACKED_LITERAL, consumed: 1 });
    }
    let mut value = 2u32 << (byte & 0x1F);
    if byte & 0x20 != 0 {
        value = value.wrapping_sub(1);
    }
    if byte & 0x40 != 0 {
        value = !value;
    }
    Ok(UnsignedOperand { value, consumed: 1 })
}

fn fixed_literal(stream: &mut impl ByteSource, count: u8) -> Result<UnsignedOperand, DecodeError> {
    let mut value = 0u32;
    for _ in 0..count {
        value = (value << 8) | stream.read_byte()? as u32;
    }
    Ok(UnsignedOperand { value, consumed: count })
}

/// Two bytes, big-endian.
pub fn word_literal(stream: &mut impl ByteSource) -> Result<UnsignedOperand, DecodeError> {
    fixed_literal(stream, 2)
}

/// Three bytes, big-endian.
pub fn near_long_literal(stream: &mut impl ByteSource) -> Result<UnsignedOperand, DecodeError> {
    fixed_literal(stream, 3)
}

/// Four bytes, big-endian.
pub fn long_literal(stream: &mut impl ByteSource) -> Result<UnsignedOperand, DecodeError> {
    fixed_literal(stream, 4)
}

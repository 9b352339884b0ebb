/// Extract `width` bits of `value` starting at bit `offset` (LSB = 0).
#[inline]
pub const fn field(value: u32, offset: u32, width: u32) -> u32 {
    (value >> offset) & ((1 << width) - 1)
}

/// Sign-extend the low `bits` bits of `value` to a full i32.
#[inline]
pub const fn sign_extend(value: u32, bits: u32) -> i32 {
    let s = 32 - bits;
    ((value << s) as i32) >> s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_projects_ranges() {
        assert_eq!(field(0xFFFF_FFFF, 26, 6), 0x3F);
        assert_eq!(field(0x0000_0200, 9, 9), 1);
        assert_eq!(field(0x1234_5678, 0, 9), 0x278);
    }

    #[test]
    fn sign_extend_narrow_values() {
        assert_eq!(sign_extend(0x7F, 7), -1);
        assert_eq!(sign_extend(0x05, 7), 5);
        assert_eq!(sign_extend(0x0100, 15), 256);
    }
}

//! Condition-code table for the CON field (bits 21:18).
//!
//! The ISA accepts several mnemonic spellings for most flag combinations;
//! each entry lists them with the canonical display form at index 0. The
//! IF_ALWAYS entry's canonical form is blank because listings omit the
//! prefix entirely for unconditional instructions.

/// Synonym spellings for one 4-bit condition value, canonical form first.
pub const CONDITIONS: [&[&str]; 16] = [
    &["IF_NEVER"],
    &["IF_NC_AND_NZ", "IF_NZ_AND_NC", "IF_A"],
    &["IF_NC_AND_Z", "IF_Z_AND_NC"],
    &["IF_NC", "IF_AE"],
    &["IF_C_AND_NZ", "IF_NZ_AND_C"],
    &["IF_NZ", "IF_NE"],
    &["IF_C_NE_Z", "IF_Z_NE_C"],
    &["IF_NC_OR_NZ", "IF_NZ_OR_NC"],
    &["IF_C_AND_Z", "IF_Z_AND_C"],
    &["IF_C_EQ_Z", "IF_Z_EQ_C"],
    &["IF_Z", "IF_E"],
    &["IF_NC_OR_Z", "IF_Z_OR_NC"],
    &["IF_C", "IF_B"],
    &["IF_C_OR_NZ", "IF_NZ_OR_C"],
    &["IF_C_OR_Z", "IF_Z_OR_C", "IF_BE"],
    &["", "IF_ALWAYS"],
];

/// Synonym list for a CON value. Only the low 4 bits participate.
pub fn lookup(con: u8) -> &'static [&'static str] {
    CONDITIONS[(con & 0x0F) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_condition_has_a_spelling() {
        for con in 0..16u8 {
            assert!(!lookup(con).is_empty(), "CON={con} has no synonyms");
        }
    }

    #[test]
    fn degenerate_extremes() {
        let never: Vec<_> = lookup(0).iter().filter(|s| !s.is_empty()).collect();
        assert_eq!(never, ["IF_NEVER"].iter().collect::<Vec<_>>());
        let always: Vec<_> = lookup(15).iter().filter(|s| !s.is_empty()).collect();
        assert_eq!(always, ["IF_ALWAYS"].iter().collect::<Vec<_>>());
    }

    #[test]
    fn interior_entries_carry_synonyms() {
        for con in 1..15u8 {
            let n = lookup(con).len();
            assert!((2..=3).contains(&n), "CON={con} has {n} spellings");
        }
    }
}

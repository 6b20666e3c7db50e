// src/core/symbols.rs
//! Canonical phonetic key tables.
//!
//! Every table is an ordered slice. Order is significant: when two keys of a
//! category can both match at the same position, the one listed first wins,
//! so longer keys always precede their prefixes.

use crate::core::types::Category;

/// Virama (hal kirima), appended to a consonant that carries no vowel.
pub const VIRAMA: &str = "\u{0DCA}";

/// Zero-width joiner.
pub const ZWJ: &str = "\u{200D}";

/// Rakaransha: virama + ZWJ + ra.
pub const MEDIAL_R_MARK: &str = "\u{0DCA}\u{200D}\u{0DBB}";

/// The Latin letter that introduces a medial r between consonant and vowel.
pub const MEDIAL_R_KEY: &str = "r";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VowelEntry {
    pub key: &'static str,
    /// Independent vowel letter.
    pub pure: &'static str,
    /// Dependent vowel sign attached after a consonant. Empty for the
    /// inherent `a`.
    pub suffix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolEntry {
    pub key: &'static str,
    pub glyph: &'static str,
}

const fn v(key: &'static str, pure: &'static str, suffix: &'static str) -> VowelEntry {
    VowelEntry { key, pure, suffix }
}

const fn s(key: &'static str, glyph: &'static str) -> SymbolEntry {
    SymbolEntry { key, glyph }
}

pub static VOWELS: &[VowelEntry] = &[
    v("uu", "ඌ", "ූ"),
    v("oo", "ඕ", "ෝ"),
    v("oe", "ඕ", "ෝ"),
    v("aa", "ආ", "ා"),
    v("AA", "ඈ", "ෑ"),
    v("Aa", "ඈ", "ෑ"),
    v("ae", "ඈ", "ෑ"),
    v("ii", "ඊ", "ී"),
    v("ie", "ඊ", "ී"),
    v("ee", "ඒ", "ේ"),
    v("ea", "ඒ", "ේ"),
    v("ei", "ඒ", "ේ"),
    v("au", "ඖ", "ෞ"),
    v("O", "ඖ", "ෞ"),
    v("a", "අ", ""),
    v("A", "ඇ", "ැ"),
    v("i", "ඉ", "ි"),
    v("e", "එ", "ෙ"),
    v("u", "උ", "ු"),
    v("U", "උ", "ු"),
    v("o", "ඔ", "ො"),
    v("E", "ඓ", "ෛ"),
    v("I", "ඓ", "ෛ"),
];

pub static NON_JOINING: &[SymbolEntry] = &[
    s("RR", "ඎ"),
    s("z", "ර්\u{200D}"),
    s("x", "ං"),
    s("H", "ඃ"),
    s("R", "ඍ"),
];

pub static CONSONANTS: &[SymbolEntry] = &[
    s("nndh", "ඳ"),
    s("nnd", "ඬ"),
    s("nng", "ඟ"),
    s("mmb", "ඹ"),
    s("GN", "ඥ"),
    s("KN", "ඤ"),
    s("Lu", "ළු"),
    s("Th", "ථ"),
    s("Dh", "ධ"),
    s("gh", "ඝ"),
    s("Ch", "ඡ"),
    s("ph", "ඵ"),
    s("kh", "ඛ"),
    s("bh", "භ"),
    s("Sh", "ෂ"),
    s("sh", "ශ"),
    s("dh", "ද"),
    s("ch", "ච"),
    s("th", "ත"),
    s("N", "ණ"),
    s("L", "ළ"),
    s("K", "ඛ"),
    s("G", "ඝ"),
    s("T", "ඨ"),
    s("D", "ඪ"),
    s("P", "ඵ"),
    s("B", "භ"),
    s("C", "ඡ"),
    s("X", "ඞ"),
    s("J", "ඣ"),
    s("t", "ට"),
    s("k", "ක"),
    s("d", "ඩ"),
    s("n", "න"),
    s("p", "ප"),
    s("b", "බ"),
    s("m", "ම"),
    s("M", "ම"),
    s("Y", "ය"),
    s("y", "ය"),
    s("j", "ජ"),
    s("l", "ල"),
    s("v", "ව"),
    s("w", "ව"),
    s("V", "ව"),
    s("W", "ව"),
    s("s", "ස"),
    s("S", "ස"),
    s("h", "හ"),
    s("f", "ෆ"),
    s("F", "ෆ"),
    s("g", "ග"),
    s("c", "ච"),
    s("r", "ර"),
];

/// Suffixes that fuse with a preceding consonant into a vocalic-r ligature.
pub static SPECIAL_LIGATURES: &[SymbolEntry] = &[s("ruu", "ෲ"), s("ru", "ෘ")];

/// The keys of one category's table, in table order.
pub fn keys(category: Category) -> Vec<&'static str> {
    match category {
        Category::Vowel => VOWELS.iter().map(|e| e.key).collect(),
        Category::Consonant => CONSONANTS.iter().map(|e| e.key).collect(),
        Category::NonJoining => NON_JOINING.iter().map(|e| e.key).collect(),
        Category::SpecialLigature => SPECIAL_LIGATURES.iter().map(|e| e.key).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique(keys: &[&str]) {
        let mut seen = HashSet::new();
        for k in keys {
            assert!(seen.insert(*k), "duplicate key {k:?}");
        }
    }

    /// A key listed after one of its own prefixes could never win a match.
    fn assert_longer_before_prefix(keys: &[&str]) {
        for (i, short) in keys.iter().enumerate() {
            for long in &keys[i + 1..] {
                assert!(
                    !(long.len() > short.len() && long.starts_with(short)),
                    "{long:?} is shadowed by earlier prefix {short:?}"
                );
            }
        }
    }

    #[test]
    fn test_tables_are_deduplicated_and_ordered() {
        for category in Category::ALL {
            let keys = keys(category);
            assert_unique(&keys);
            assert_longer_before_prefix(&keys);
        }
    }

    #[test]
    fn test_keys_are_short_ascii() {
        for key in Category::ALL.into_iter().flat_map(keys) {
            assert!((1..=4).contains(&key.len()));
            assert!(key.is_ascii());
        }
    }

    #[test]
    fn test_medial_r_mark_code_points() {
        let cps: Vec<u32> = MEDIAL_R_MARK.chars().map(u32::from).collect();
        assert_eq!(cps, vec![0x0DCA, 0x200D, 0x0DBB]);
        assert_eq!(MEDIAL_R_MARK, format!("{VIRAMA}{ZWJ}ර"));
    }

    #[test]
    fn test_keys_follow_table_order() {
        assert_eq!(keys(Category::SpecialLigature), vec!["ruu", "ru"]);
        assert_eq!(keys(Category::Vowel).len(), VOWELS.len());
        assert_eq!(keys(Category::Consonant)[0], CONSONANTS[0].key);
        assert!(keys(Category::Consonant).contains(&MEDIAL_R_KEY));
    }
}

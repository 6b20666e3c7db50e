// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key codes the session reacts to. Values follow the DOM `keyCode` numbering
/// that host widgets report.
pub mod key {
    pub const BACKSPACE: u32 = 8;
    pub const ENTER: u32 = 13;
    /// The chord modifier (Ctrl). Not configurable.
    pub const MODIFIER: u32 = 17;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_DOWN: u32 = 40;
    /// Default language-switch shortcut (`Q`).
    pub const DEFAULT_SHORTCUT: u32 = 81;
    pub const PRINTABLE_FIRST: u32 = 32;
    pub const PRINTABLE_LAST: u32 = 126;
}

/// True for codes that may feed the pending phonetic buffer.
pub fn is_printable(code: u32) -> bool {
    (key::PRINTABLE_FIRST..=key::PRINTABLE_LAST).contains(&code)
        && !(key::ARROW_LEFT..=key::ARROW_DOWN).contains(&code)
}

/// Whether typed keys are transliterated (Sinhala) or passed through (English).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LanguageMode {
    #[serde(rename = "si")]
    Phonetic,
    #[default]
    #[serde(rename = "en")]
    Literal,
}

impl LanguageMode {
    pub fn toggled(self) -> Self {
        match self {
            LanguageMode::Phonetic => LanguageMode::Literal,
            LanguageMode::Literal => LanguageMode::Phonetic,
        }
    }

    /// The short code stored in preferences and spoken by the line protocol.
    pub fn code(self) -> &'static str {
        match self {
            LanguageMode::Phonetic => "si",
            LanguageMode::Literal => "en",
        }
    }
}

impl fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language code {0:?} (expected \"si\" or \"en\")")]
pub struct UnknownLanguage(pub String);

impl FromStr for LanguageMode {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "si" => Ok(LanguageMode::Phonetic),
            "en" => Ok(LanguageMode::Literal),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// The role a phonetic key plays in the symbol tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Vowel,
    Consonant,
    NonJoining,
    SpecialLigature,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Vowel,
        Category::Consonant,
        Category::NonJoining,
        Category::SpecialLigature,
    ];

    /// Position of the category in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A selected range inside the host field, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns `text` with the selected characters removed. Offsets are
    /// clamped to the text and may be given in either order.
    pub fn remove_from(&self, text: &str) -> String {
        let len = text.chars().count();
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        let (lo, hi) = (lo.min(len), hi.min(len));
        text.chars()
            .enumerate()
            .filter(|(i, _)| *i < lo || *i >= hi)
            .map(|(_, c)| c)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_range_excludes_arrows() {
        assert!(is_printable(32));
        assert!(is_printable(u32::from('a')));
        assert!(is_printable(126));
        assert!(!is_printable(31));
        assert!(!is_printable(127));
        for code in 37..=40 {
            assert!(!is_printable(code), "arrow code {code} must be ignored");
        }
    }

    #[test]
    fn test_language_codes() {
        assert_eq!("si".parse::<LanguageMode>(), Ok(LanguageMode::Phonetic));
        assert_eq!("en".parse::<LanguageMode>(), Ok(LanguageMode::Literal));
        assert!("fr".parse::<LanguageMode>().is_err());
        assert_eq!(LanguageMode::Phonetic.toggled(), LanguageMode::Literal);
        assert_eq!(LanguageMode::Phonetic.to_string(), "si");
    }

    #[test]
    fn test_category_index_matches_all() {
        for (i, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_selection_removal_is_char_based() {
        let sel = Selection::new(1, 3);
        // අ ම ් ම ා -> drop "ම්"
        assert_eq!(sel.remove_from("අම්මා"), "අමා");
    }

    #[test]
    fn test_selection_clamps_and_normalises() {
        assert_eq!(Selection::new(4, 2).remove_from("abcdef"), "abef");
        assert_eq!(Selection::new(3, 99).remove_from("abcdef"), "abc");
        assert_eq!(Selection::new(10, 12).remove_from("abc"), "abc");
    }
}

// src/core/converter.rs
use crate::core::symbols::{
    self, CONSONANTS, MEDIAL_R_KEY, MEDIAL_R_MARK, NON_JOINING, SPECIAL_LIGATURES, VIRAMA, VOWELS,
};
use crate::core::trie::{EntryId, KeyTrie};
use crate::core::types::Category;
use std::sync::OnceLock;
use tracing::debug;

/// The substitution passes, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    NonJoining,
    SpecialLigature,
    MedialR,
    ConsonantVowel,
    ConsonantVirama,
    PureVowel,
}

impl Pass {
    pub const ORDER: [Pass; 6] = [
        Pass::NonJoining,
        Pass::SpecialLigature,
        Pass::MedialR,
        Pass::ConsonantVowel,
        Pass::ConsonantVirama,
        Pass::PureVowel,
    ];
}

/// One global replacement. It can only fire if every key in `needs`
/// occurs somewhere in the input.
#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    replacement: String,
    needs: Vec<(Category, EntryId)>,
}

impl Rule {
    fn new(pattern: String, replacement: String, needs: Vec<(Category, EntryId)>) -> Self {
        Self { pattern, replacement, needs }
    }
}

/// Latin phonetic to Sinhala converter.
///
/// Each pass of `Pass::ORDER` is a sweep of global replacements over the
/// whole text, one per key combination, in table order. A later sweep sees
/// the output of the earlier ones. Replacements never produce Latin text, so
/// a rule whose keys are absent from the input is skipped without searching.
pub struct TransliterationEngine {
    tries: [KeyTrie; 4],
    passes: Vec<(Pass, Vec<Rule>)>,
}

impl TransliterationEngine {
    pub fn new() -> Self {
        let tries = Category::ALL.map(|category| KeyTrie::from_keys(symbols::keys(category)));
        let passes: Vec<(Pass, Vec<Rule>)> =
            Pass::ORDER.into_iter().map(|pass| (pass, build_rules(pass))).collect();
        debug!(
            vowels = VOWELS.len(),
            consonants = CONSONANTS.len(),
            non_joining = NON_JOINING.len(),
            ligatures = SPECIAL_LIGATURES.len(),
            rules = passes.iter().map(|(_, rules)| rules.len()).sum::<usize>(),
            "transliteration tables built"
        );
        Self { tries, passes }
    }

    /// Get or initialize the shared instance.
    pub fn global() -> &'static TransliterationEngine {
        static INSTANCE: OnceLock<TransliterationEngine> = OnceLock::new();
        INSTANCE.get_or_init(TransliterationEngine::new)
    }

    fn trie(&self, category: Category) -> &KeyTrie {
        &self.tries[category.index()]
    }

    /// Transliterates a full phonetic string. Total: anything that matches no
    /// key is copied through.
    pub fn transliterate(&self, input: &str) -> String {
        self.run(input, |_, _| {})
    }

    /// The text after each pass, in pass order.
    pub fn trace(&self, input: &str) -> Vec<(Pass, String)> {
        let mut steps = Vec::with_capacity(Pass::ORDER.len());
        self.run(input, |pass, text| steps.push((pass, text.to_string())));
        steps
    }

    fn run(&self, input: &str, mut on_pass: impl FnMut(Pass, &str)) -> String {
        let present = Category::ALL.map(|category| self.trie(category).occurrences(input));
        let mut text = input.to_string();
        for (pass, rules) in &self.passes {
            for rule in rules {
                let possible =
                    rule.needs.iter().all(|&(category, id)| present[category.index()][id]);
                if possible && text.contains(&rule.pattern) {
                    text = text.replace(&rule.pattern, &rule.replacement);
                }
            }
            on_pass(*pass, &text);
        }
        text
    }
}

impl Default for TransliterationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn build_rules(pass: Pass) -> Vec<Rule> {
    use Category::*;
    let mut rules = Vec::new();
    match pass {
        Pass::NonJoining => {
            for (id, nj) in NON_JOINING.iter().enumerate() {
                let (key, glyph) = (nj.key.to_string(), nj.glyph.to_string());
                rules.push(Rule::new(key, glyph, vec![(NonJoining, id)]));
            }
        }
        Pass::SpecialLigature => {
            for (lid, lig) in SPECIAL_LIGATURES.iter().enumerate() {
                for (cid, c) in CONSONANTS.iter().enumerate() {
                    rules.push(Rule::new(
                        format!("{}{}", c.key, lig.key),
                        format!("{}{}", c.glyph, lig.glyph),
                        vec![(Consonant, cid), (SpecialLigature, lid)],
                    ));
                }
            }
        }
        Pass::MedialR => {
            for (cid, c) in CONSONANTS.iter().enumerate() {
                for (vid, v) in VOWELS.iter().enumerate() {
                    rules.push(Rule::new(
                        format!("{}{}{}", c.key, MEDIAL_R_KEY, v.key),
                        format!("{}{}{}", c.glyph, MEDIAL_R_MARK, v.suffix),
                        vec![(Consonant, cid), (Vowel, vid)],
                    ));
                }
                rules.push(Rule::new(
                    format!("{}{}", c.key, MEDIAL_R_KEY),
                    format!("{}{}", c.glyph, MEDIAL_R_MARK),
                    vec![(Consonant, cid)],
                ));
            }
        }
        Pass::ConsonantVowel => {
            for (cid, c) in CONSONANTS.iter().enumerate() {
                for (vid, v) in VOWELS.iter().enumerate() {
                    rules.push(Rule::new(
                        format!("{}{}", c.key, v.key),
                        format!("{}{}", c.glyph, v.suffix),
                        vec![(Consonant, cid), (Vowel, vid)],
                    ));
                }
            }
        }
        Pass::ConsonantVirama => {
            for (cid, c) in CONSONANTS.iter().enumerate() {
                let glyph = format!("{}{}", c.glyph, VIRAMA);
                rules.push(Rule::new(c.key.to_string(), glyph, vec![(Consonant, cid)]));
            }
        }
        Pass::PureVowel => {
            for (vid, v) in VOWELS.iter().enumerate() {
                let (key, pure) = (v.key.to_string(), v.pure.to_string());
                rules.push(Rule::new(key, pure, vec![(Vowel, vid)]));
            }
        }
    }
    rules
}

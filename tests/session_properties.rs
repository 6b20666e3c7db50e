//! Property tests for the transliterator and the session state machine.

use ime_core::core::session::SessionConfig;
use ime_core::core::symbols::{
    CONSONANTS, MEDIAL_R_KEY, MEDIAL_R_MARK, NON_JOINING, SPECIAL_LIGATURES, VIRAMA, VOWELS,
};
use ime_core::core::types::key;
use ime_core::{LanguageMode, Selection, SessionEvent, SessionState, TransliterationEngine};
use proptest::prelude::*;

fn engine() -> &'static TransliterationEngine {
    TransliterationEngine::global()
}

fn apply_all(mut state: SessionState, events: &[SessionEvent]) -> SessionState {
    let config = SessionConfig::default();
    for event in events {
        state = state.apply(event, &config, engine()).0;
    }
    state
}

fn keystroke(c: char) -> [SessionEvent; 3] {
    let vk = u32::from(c.to_ascii_uppercase());
    [
        SessionEvent::KeyDown { code: vk, selection: None },
        SessionEvent::KeyPress { code: u32::from(c) },
        SessionEvent::KeyUp { code: vk },
    ]
}

/// Plain global replace over the ordered tables, with no shortcuts.
fn cascade(input: &str) -> String {
    let mut text = input.to_string();
    for nj in NON_JOINING {
        text = text.replace(nj.key, nj.glyph);
    }
    for lig in SPECIAL_LIGATURES {
        for c in CONSONANTS {
            let from = format!("{}{}", c.key, lig.key);
            text = text.replace(&from, &format!("{}{}", c.glyph, lig.glyph));
        }
    }
    for c in CONSONANTS {
        for v in VOWELS {
            let from = format!("{}{}{}", c.key, MEDIAL_R_KEY, v.key);
            text = text.replace(&from, &format!("{}{}{}", c.glyph, MEDIAL_R_MARK, v.suffix));
        }
        let from = format!("{}{}", c.key, MEDIAL_R_KEY);
        text = text.replace(&from, &format!("{}{}", c.glyph, MEDIAL_R_MARK));
    }
    for c in CONSONANTS {
        for v in VOWELS {
            let from = format!("{}{}", c.key, v.key);
            text = text.replace(&from, &format!("{}{}", c.glyph, v.suffix));
        }
    }
    for c in CONSONANTS {
        text = text.replace(c.key, &format!("{}{}", c.glyph, VIRAMA));
    }
    for v in VOWELS {
        text = text.replace(v.key, v.pure);
    }
    text
}

fn arb_phonetic() -> impl Strategy<Value = String> {
    // 'q' and 'Q' are left out: their key code is the language shortcut.
    "[a-pr-zA-PR-Z ]{0,16}"
}

proptest! {
    #[test]
    fn unmapped_text_passes_through(s in "[0-9 .,;:!?'\"()\\-]{0,32}") {
        prop_assert_eq!(engine().transliterate(&s), s);
    }

    #[test]
    fn matches_cascading_replace(s in "[aeiouAkrLhsdtnRzxU ]{0,10}") {
        prop_assert_eq!(engine().transliterate(&s), cascade(&s));
    }

    #[test]
    fn transliteration_is_deterministic(s in arb_phonetic()) {
        prop_assert_eq!(engine().transliterate(&s), engine().transliterate(&s));
    }

    #[test]
    fn commit_renders_whole_buffer(prefix in "[0-9 ]{0,4}", typed in arb_phonetic()) {
        let mut state = SessionState::with_text(LanguageMode::Phonetic, &prefix);
        let events: Vec<SessionEvent> = typed.chars().flat_map(keystroke).collect();
        state = apply_all(state, &events);
        prop_assert_eq!(&state.pending, &typed);
        if !typed.is_empty() {
            prop_assert_eq!(state.text, format!("{}{}", prefix, engine().transliterate(&typed)));
        }
    }

    #[test]
    fn backspace_with_selection_removes_exactly_range(
        text in "[a-z]{1,12}",
        pending in arb_phonetic(),
        a in 0usize..12,
        b in 0usize..12,
    ) {
        prop_assume!(a != b);
        let mut state = SessionState::with_text(LanguageMode::Phonetic, &text);
        state.pending = pending;
        let sel = Selection::new(a, b);
        state.on_backspace(Some(sel));

        let (lo, hi) = (a.min(b).min(text.len()), a.max(b).min(text.len()));
        let expected = format!("{}{}", &text[..lo], &text[hi..]);
        prop_assert!(state.pending.is_empty());
        prop_assert_eq!(state.out_of_scope, expected);
    }

    #[test]
    fn held_chord_toggles_once(repeats in 1usize..20) {
        let mut events = vec![SessionEvent::KeyDown { code: key::MODIFIER, selection: None }];
        for _ in 0..repeats {
            events.push(SessionEvent::KeyDown { code: key::DEFAULT_SHORTCUT, selection: None });
        }
        let state = apply_all(SessionState::new(LanguageMode::Phonetic), &events);
        prop_assert_eq!(state.language, LanguageMode::Literal);
    }
}

#[test]
fn test_vowel_and_ligature_runs_match_cascade() {
    for word in ["eae", "krru", "auua", "auue", "auui", "shrruu", "amma", "kaeka", "bhaashaava"] {
        assert_eq!(engine().transliterate(word), cascade(word), "mismatch for {word:?}");
    }
    assert_eq!(engine().transliterate("eae"), "එඈ");
    assert_eq!(engine().transliterate("krru"), "ක්රෘ");
}

#[test]
fn test_two_chords_toggle_twice() {
    let mut events = Vec::new();
    for _ in 0..2 {
        events.push(SessionEvent::KeyDown { code: key::MODIFIER, selection: None });
        events.push(SessionEvent::KeyDown { code: key::DEFAULT_SHORTCUT, selection: None });
        events.push(SessionEvent::KeyUp { code: key::DEFAULT_SHORTCUT });
        events.push(SessionEvent::KeyUp { code: key::MODIFIER });
    }
    let state = apply_all(SessionState::new(LanguageMode::Phonetic), &events);
    assert_eq!(state.language, LanguageMode::Phonetic);
}

#[test]
fn test_end_to_end_apa() {
    let events: Vec<SessionEvent> = "apa".chars().flat_map(keystroke).collect();
    let state = apply_all(SessionState::new(LanguageMode::Phonetic), &events);
    assert_eq!(state.text, engine().transliterate("apa"));
    assert_eq!(state.text, "අප");
}

#[test]
fn test_literal_then_phonetic_appends() {
    let mut events = vec![
        SessionEvent::FieldEdited("hi ".to_string()),
        SessionEvent::SwitchLanguage(LanguageMode::Phonetic),
    ];
    events.extend("mama".chars().flat_map(keystroke));
    let state = apply_all(SessionState::new(LanguageMode::Literal), &events);
    assert_eq!(state.text, "hi මම");
}

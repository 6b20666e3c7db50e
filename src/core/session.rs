// File: src/core/session.rs
use crate::core::chord::ChordState;
use crate::core::converter::TransliterationEngine;
use crate::core::types::{is_printable, key, LanguageMode, Selection};
use tracing::{debug, debug_span};

/// Session options taken from the host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub enable_shortcuts: bool,
    pub shortcut_key: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { enable_shortcuts: true, shortcut_key: key::DEFAULT_SHORTCUT }
    }
}

/// Events a host text field reports to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Raw key code, with the field selection at the time of the press.
    KeyDown { code: u32, selection: Option<Selection> },
    /// Character code of a key that produces text.
    KeyPress { code: u32 },
    /// End of a key cycle; the commit point.
    KeyUp { code: u32 },
    SwitchLanguage(LanguageMode),
    /// Host replaces the field value.
    SetText(String),
    /// Host reports the field value after a native edit.
    FieldEdited(String),
    Reset,
}

/// What the host should do after an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResponse {
    /// New field value to display.
    pub text: Option<String>,
    /// Language mode changed to this value.
    pub language: Option<LanguageMode>,
    /// Field value submitted with Enter.
    pub submitted: Option<String>,
}

impl SessionResponse {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.language.is_none() && self.submitted.is_none()
    }
}

/// The whole state of one input session. Transitions go through `apply`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub language: LanguageMode,
    /// Raw Latin keys typed since the last reset. Never holds Sinhala.
    pub pending: String,
    /// Committed text that is not re-transliterated.
    pub out_of_scope: String,
    /// Current field value as last published or reported by the host.
    pub text: String,
    pub chord: ChordState,
}

impl SessionState {
    pub fn new(language: LanguageMode) -> Self {
        Self { language, ..Self::default() }
    }

    /// Starts a session over an existing field value.
    pub fn with_text(language: LanguageMode, text: &str) -> Self {
        Self {
            language,
            out_of_scope: text.to_string(),
            text: text.to_string(),
            ..Self::default()
        }
    }

    /// Pure transition: consumes the state and returns the next one.
    pub fn apply(
        mut self,
        event: &SessionEvent,
        config: &SessionConfig,
        engine: &TransliterationEngine,
    ) -> (SessionState, SessionResponse) {
        let _span = debug_span!("apply", ?event, language = %self.language).entered();
        let mut resp = SessionResponse::default();

        match event {
            SessionEvent::KeyDown { code, selection } => {
                let code = *code;
                if self.language == LanguageMode::Phonetic {
                    if code == key::BACKSPACE {
                        self.on_backspace(*selection);
                    } else if is_printable(code) {
                        if let Some(sel) = active(*selection) {
                            self.delete_selection(sel);
                        }
                    }
                }

                if code == key::ENTER {
                    resp.submitted = Some(self.on_enter());
                    resp.text = Some(String::new());
                }

                if config.enable_shortcuts && self.chord.on_key_down(code, config.shortcut_key) {
                    let next = self.language.toggled();
                    self.on_language_mode_switch(next);
                    resp.language = Some(next);
                }
            }
            SessionEvent::KeyPress { code } => self.on_printable_key(*code),
            SessionEvent::KeyUp { code } => {
                self.chord.on_key_up(*code, config.shortcut_key);
                if self.language == LanguageMode::Phonetic {
                    resp.text = Some(self.on_commit_point(engine).to_string());
                }
            }
            SessionEvent::SwitchLanguage(mode) => {
                self.on_language_mode_switch(*mode);
                resp.language = Some(*mode);
            }
            SessionEvent::SetText(text) => {
                self.set_text(text);
                resp.text = Some(text.clone());
            }
            SessionEvent::FieldEdited(text) => self.text = text.clone(),
            SessionEvent::Reset => {
                self.reset();
                resp.text = Some(String::new());
            }
        }

        (self, resp)
    }

    /// Feeds a character code into the pending buffer. Ignored outside
    /// Phonetic mode and for non-printable or arrow codes.
    pub fn on_printable_key(&mut self, code: u32) {
        if self.language != LanguageMode::Phonetic || !is_printable(code) {
            return;
        }
        if let Some(c) = char::from_u32(code) {
            self.pending.push(c);
            debug!(pending = %self.pending, "accumulated");
        }
    }

    /// A selection, when present and non-empty, wins over the trailing delete.
    pub fn on_backspace(&mut self, selection: Option<Selection>) {
        self.pending.clear();
        match active(selection) {
            Some(sel) => self.out_of_scope = sel.remove_from(&self.text),
            None => {
                let mut rest = self.text.clone();
                rest.pop();
                self.out_of_scope = rest;
            }
        }
    }

    /// Replace-over-selection: the range leaves the committed text before
    /// the key starts a fresh pending run.
    pub fn on_printable_with_selection(&mut self, code: u32, selection: Option<Selection>) {
        if self.language != LanguageMode::Phonetic {
            return;
        }
        if let Some(sel) = active(selection) {
            self.delete_selection(sel);
        }
        self.on_printable_key(code);
    }

    /// Re-renders the whole pending run after the out-of-scope text. The
    /// pending buffer keeps accumulating.
    pub fn on_commit_point(&mut self, engine: &TransliterationEngine) -> &str {
        let converted = engine.transliterate(&self.pending);
        self.text = format!("{}{}", self.out_of_scope, converted);
        &self.text
    }

    /// Returns the submitted value and clears the session.
    pub fn on_enter(&mut self) -> String {
        let submitted = std::mem::take(&mut self.text);
        self.reset();
        submitted
    }

    pub fn on_language_mode_switch(&mut self, mode: LanguageMode) {
        self.pending.clear();
        match mode {
            LanguageMode::Phonetic => self.out_of_scope = self.text.clone(),
            LanguageMode::Literal => self.out_of_scope.clear(),
        }
        self.language = mode;
        debug!(language = %mode, "language switched");
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.out_of_scope = text.to_string();
        self.pending.clear();
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.out_of_scope.clear();
        self.pending.clear();
    }

    fn delete_selection(&mut self, sel: Selection) {
        self.pending.clear();
        self.out_of_scope = sel.remove_from(&self.text);
    }
}

fn active(selection: Option<Selection>) -> Option<Selection> {
    selection.filter(|s| !s.is_empty())
}

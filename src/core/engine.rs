use crate::config::ImeConfig;
use crate::core::converter::TransliterationEngine;
use crate::core::session::{SessionConfig, SessionEvent, SessionResponse, SessionState};
use crate::core::types::LanguageMode;
use crate::error::ImeError;
use crate::persistence::{FilePreferenceStore, PreferenceStore};
use tracing::{debug, debug_span, info, warn};

// The IME engine binds the shared transliterator to one input session.
pub struct ImeEngine {
    pub transliterator: &'static TransliterationEngine,
    state: SessionState,
    session_config: SessionConfig,
    remember_language: bool,
    store: Option<Box<dyn PreferenceStore>>,
}

impl ImeEngine {
    pub fn new(config: &ImeConfig) -> Self {
        Self {
            transliterator: TransliterationEngine::global(),
            state: SessionState::new(config.default_language),
            session_config: config.session_config(),
            remember_language: config.remember_language,
            store: None,
        }
    }

    /// Attaches a preference store. With `remember_language` set, a stored
    /// language overrides the configured default.
    pub fn with_store(config: &ImeConfig, store: Box<dyn PreferenceStore>) -> Self {
        let mut engine = Self::new(config);
        if config.remember_language {
            match store.load_language() {
                Ok(Some(mode)) => {
                    debug!(language = %mode, "restored language");
                    engine.state.language = mode;
                }
                Ok(None) => {}
                Err(e) => warn!("could not read preferences: {}", e),
            }
        }
        engine.store = Some(store);
        engine
    }

    /// Builds an engine from config, opening the file store when one is
    /// configured.
    pub fn from_config(config: &ImeConfig) -> Result<Self, ImeError> {
        let engine = match &config.preferences_path {
            Some(path) => {
                let store = FilePreferenceStore::open(path)?;
                info!(path = %path.display(), "preferences opened");
                Self::with_store(config, Box::new(store))
            }
            None => Self::new(config),
        };
        Ok(engine)
    }

    pub fn handle(&mut self, event: SessionEvent) -> SessionResponse {
        let _span = debug_span!("handle", ?event).entered();
        let state = std::mem::take(&mut self.state);
        let (next, resp) = state.apply(&event, &self.session_config, self.transliterator);
        self.state = next;

        if let Some(mode) = resp.language {
            self.remember(mode);
        }
        resp
    }

    /// Persistence failures are logged, never surfaced to the keystroke.
    fn remember(&mut self, mode: LanguageMode) {
        if !self.remember_language {
            return;
        }
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.save_language(mode) {
                warn!("failed to save language preference: {}", e);
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn language(&self) -> LanguageMode {
        self.state.language
    }

    pub fn pending(&self) -> &str {
        &self.state.pending
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

impl Default for ImeEngine {
    fn default() -> Self {
        Self::new(&ImeConfig::default())
    }
}

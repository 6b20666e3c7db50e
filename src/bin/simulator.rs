use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use ime_core::core::types::{key, Selection};
use ime_core::trace_init::init_tracing;
use ime_core::{ImeConfig, ImeEngine, LanguageMode, SessionEvent, SessionResponse};
use std::io::{self, stdout, Stdout, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_PATH: &str = "ime.toml";

/// A stand-in for the host text field: it applies native edits the way a
/// browser input would, before the session overwrites the value.
#[derive(Default)]
struct Field {
    text: String,
    selection: Option<Selection>,
}

impl Field {
    fn select_all(&mut self) {
        self.selection = Some(Selection::new(0, self.text.chars().count()));
    }

    fn insert(&mut self, c: char) {
        if let Some(sel) = self.selection.take() {
            self.text = sel.remove_from(&self.text);
        }
        self.text.push(c);
    }

    fn backspace(&mut self) {
        match self.selection.take() {
            Some(sel) if !sel.is_empty() => self.text = sel.remove_from(&self.text),
            _ => {
                self.text.pop();
            }
        }
    }
}

struct Simulator {
    engine: ImeEngine,
    field: Field,
    shortcut_key: u32,
    submitted: Vec<String>,
}

impl Simulator {
    fn send(&mut self, event: SessionEvent) {
        let resp = self.engine.handle(event);
        self.apply(resp);
    }

    fn apply(&mut self, resp: SessionResponse) {
        if let Some(text) = resp.submitted {
            self.submitted.push(text);
        }
        if let Some(text) = resp.text {
            self.field.text = text;
            self.field.selection = None;
        }
    }

    fn literal(&self) -> bool {
        self.engine.language() == LanguageMode::Literal
    }

    fn chord(&mut self) {
        let shortcut = self.shortcut_key;
        for event in [
            SessionEvent::KeyDown { code: key::MODIFIER, selection: None },
            SessionEvent::KeyDown { code: shortcut, selection: None },
            SessionEvent::KeyUp { code: shortcut },
            SessionEvent::KeyUp { code: key::MODIFIER },
        ] {
            self.send(event);
        }
    }

    fn backspace(&mut self) {
        let selection = self.field.selection;
        self.send(SessionEvent::KeyDown { code: key::BACKSPACE, selection });
        self.field.backspace();
        if self.literal() {
            self.send(SessionEvent::FieldEdited(self.field.text.clone()));
        }
        self.send(SessionEvent::KeyUp { code: key::BACKSPACE });
    }

    fn enter(&mut self) {
        self.send(SessionEvent::KeyDown { code: key::ENTER, selection: None });
        self.send(SessionEvent::KeyUp { code: key::ENTER });
    }

    fn type_char(&mut self, c: char) {
        let key_code = u32::from(c.to_ascii_uppercase());
        let selection = self.field.selection;
        self.send(SessionEvent::KeyDown { code: key_code, selection });
        self.field.insert(c);
        self.send(SessionEvent::KeyPress { code: u32::from(c) });
        if self.literal() {
            self.send(SessionEvent::FieldEdited(self.field.text.clone()));
        }
        self.send(SessionEvent::KeyUp { code: key_code });
    }

    /// Returns false when the simulator should exit.
    fn handle_key(&mut self, ev: KeyEvent) -> bool {
        if ev.kind != KeyEventKind::Press {
            return true;
        }
        let ctrl = ev.modifiers.contains(KeyModifiers::CONTROL);
        match ev.code {
            KeyCode::Esc => return false,
            KeyCode::Char(c) if ctrl && u32::from(c.to_ascii_uppercase()) == self.shortcut_key => {
                self.chord()
            }
            KeyCode::Char('a') if ctrl => self.field.select_all(),
            KeyCode::Char(c) if !ctrl && c.is_ascii() && !c.is_ascii_control() => self.type_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Enter => self.enter(),
            _ => {}
        }
        true
    }

    fn render(&self, out: &mut Stdout) -> io::Result<()> {
        let language = match self.engine.language() {
            LanguageMode::Phonetic => "Sinhala (phonetic)",
            LanguageMode::Literal => "English",
        };
        let selection = match self.field.selection {
            Some(sel) => format!("{}..{}", sel.start, sel.end),
            None => "-".to_string(),
        };
        let held: Vec<String> =
            self.engine.state().chord.held().map(|code| code.to_string()).collect();
        let mut lines = vec![
            "Sinhala Phonetic IME Simulator".to_string(),
            "---------------------------------------------------------------".to_string(),
            "Type to enter text. Ctrl+Q switches language, Ctrl+A selects all,".to_string(),
            "Enter submits, Esc quits.".to_string(),
            String::new(),
            format!("Language : {}", language),
            format!("Pending  : [{}]", self.engine.pending()),
            format!("Selection: {}", selection),
            format!("Chord    : [{}]", held.join("+")),
            String::new(),
            format!("> {}", self.field.text),
            String::new(),
        ];
        if !self.submitted.is_empty() {
            lines.push("Submitted:".to_string());
            for (i, text) in self.submitted.iter().enumerate().rev().take(5) {
                lines.push(format!("  {}: {}", i + 1, text));
            }
        }

        execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        for line in lines {
            execute!(out, Print(line), Print("\r\n"))?;
        }
        out.flush()
    }
}

fn run(sim: &mut Simulator, out: &mut Stdout) -> io::Result<()> {
    loop {
        sim.render(out)?;
        if let Event::Key(ev) = event::read()? {
            if !sim.handle_key(ev) {
                return Ok(());
            }
        }
    }
}

fn main() -> io::Result<()> {
    let config = ImeConfig::load_or_default(Path::new(CONFIG_PATH)).unwrap_or_else(|e| {
        eprintln!("[ime] {}; using defaults", e);
        ImeConfig::default()
    });
    let log_path = PathBuf::from("target").join("sinhala_ime_simulator.log");
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    init_tracing(&log_path, config.log_filter.as_deref());
    info!("simulator starting");

    let engine = ImeEngine::from_config(&config).unwrap_or_else(|e| {
        warn!("preferences unavailable: {}", e);
        ImeEngine::new(&config)
    });
    let mut sim = Simulator {
        engine,
        field: Field::default(),
        shortcut_key: config.shortcut_key,
        submitted: Vec::new(),
    };

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    let result = run(&mut sim, &mut out);
    terminal::disable_raw_mode()?;
    execute!(out, Print("\r\n"))?;
    info!("simulator exiting");
    result
}

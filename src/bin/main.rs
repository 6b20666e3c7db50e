use ime_core::core::types::Selection;
use ime_core::trace_init::init_tracing;
use ime_core::{ImeConfig, ImeEngine, LanguageMode, SessionEvent, SessionResponse};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

const DEFAULT_CONFIG_PATH: &str = "ime.toml";

fn get_log_path() -> PathBuf {
    let mut path = PathBuf::from("target");
    path.push("sinhala_ime_rust.log");
    path
}

fn main() -> io::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match ImeConfig::load_or_default(Path::new(&config_path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ime] {}; using defaults", e);
            ImeConfig::default()
        }
    };

    let log_path = get_log_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    init_tracing(&log_path, config.log_filter.as_deref());
    info!("--- Sinhala IME engine starting ---");

    let mut engine = match ImeEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("preferences unavailable: {}", e);
            ImeEngine::new(&config)
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "LANGUAGE {}", engine.language())?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let input = line?;
        debug!("<- {:?}", input);
        let (command, rest) = input.split_once(' ').unwrap_or((input.as_str(), ""));

        if command == "EXIT" {
            info!("received EXIT");
            break;
        }
        match parse_event(command, rest) {
            Some(event) => {
                let resp = engine.handle(event);
                write_response(&resp, &mut stdout)?;
            }
            None => warn!("unknown or malformed command: {:?}", input),
        }
    }
    info!("shutting down");
    Ok(())
}

/// `KEY_DOWN code [start end]`, `KEY_PRESS code`, `KEY_UP code`,
/// `SWITCH si|en`, `SET_TEXT text`, `FIELD text`, `RESET`.
fn parse_event(command: &str, rest: &str) -> Option<SessionEvent> {
    let mut parts = rest.split_whitespace();
    let mut next_u32 = || parts.next().and_then(|s| s.parse::<u32>().ok());

    match command {
        "KEY_DOWN" => {
            let code = next_u32()?;
            let selection = match (next_u32(), next_u32()) {
                (Some(start), Some(end)) => Some(Selection::new(start as usize, end as usize)),
                _ => None,
            };
            Some(SessionEvent::KeyDown { code, selection })
        }
        "KEY_PRESS" => Some(SessionEvent::KeyPress { code: next_u32()? }),
        "KEY_UP" => Some(SessionEvent::KeyUp { code: next_u32()? }),
        "SWITCH" => rest.trim().parse::<LanguageMode>().ok().map(SessionEvent::SwitchLanguage),
        "SET_TEXT" => Some(SessionEvent::SetText(rest.to_string())),
        "FIELD" => Some(SessionEvent::FieldEdited(rest.to_string())),
        "RESET" => Some(SessionEvent::Reset),
        _ => None,
    }
}

/// Text payloads are JSON strings so that spaces and newlines survive.
fn write_response(resp: &SessionResponse, stdout: &mut io::Stdout) -> io::Result<()> {
    if let Some(submitted) = &resp.submitted {
        let cmd = format!("SUBMIT {}", json_string(submitted));
        debug!("-> {:?}", cmd);
        writeln!(stdout, "{}", cmd)?;
    }
    if let Some(text) = &resp.text {
        let cmd = format!("UPDATE_TEXT {}", json_string(text));
        debug!("-> {:?}", cmd);
        writeln!(stdout, "{}", cmd)?;
    }
    if let Some(mode) = resp.language {
        debug!("-> LANGUAGE {}", mode);
        writeln!(stdout, "LANGUAGE {}", mode)?;
    }
    stdout.flush()
}

fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

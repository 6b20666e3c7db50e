// File: src/trace_init.rs
use std::fs::File;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub const DEFAULT_FILTER: &str = "ime_core=debug";

/// Sends tracing output to `log_path` (truncated). Only the first call in a
/// process installs the subscriber. `RUST_LOG` wins over `filter`.
pub fn init_tracing(log_path: &Path, filter: Option<&str>) {
    INIT.call_once(|| {
        let file = match File::create(log_path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("[ime] cannot open log file {}: {}", log_path.display(), e);
                return;
            }
        };
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_env_filter(env_filter)
            .init();
    });
}

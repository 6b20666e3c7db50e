// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod trace_init;

pub use crate::config::ImeConfig;
pub use crate::core::converter::TransliterationEngine;
pub use crate::core::engine::ImeEngine;
pub use crate::core::session::{SessionEvent, SessionResponse, SessionState};
pub use crate::core::types::{LanguageMode, Selection};

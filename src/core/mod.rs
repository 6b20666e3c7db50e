// src/core/mod.rs
pub mod chord;
pub mod converter;
pub mod engine;
pub mod session;
pub mod symbols;
pub mod trie;
pub mod types;

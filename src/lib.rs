// src/lib.rs
// Library interface for scope-scout
pub mod classifier;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod scope;
pub mod source;
pub mod types;
pub mod view;

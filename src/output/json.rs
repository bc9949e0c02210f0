// src/output/json.rs
//! JSON Lines (JSONL) output handler

use crate::output::{lock_writer, SharedWriter, ViewRenderer};
use crate::view::ProgramCard;
use std::io::{self, Write};
use std::sync::Mutex;

/// JSON Lines output handler
///
/// Outputs one JSON object per program card (JSONL/NDJSON format)
pub struct JsonOutput {
    writer: SharedWriter,
}

impl JsonOutput {
    /// Create a new JsonOutput that writes to stdout
    pub fn new() -> Self {
        Self::to_writer(Box::new(io::stdout()))
    }

    /// Create a new JsonOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self::to_writer(Box::new(file))
    }

    pub fn to_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for JsonOutput {
    fn render_loading(&self) -> anyhow::Result<()> {
        // stdout carries data only
        Ok(())
    }

    fn render_error(&self, message: &str) -> anyhow::Result<()> {
        let mut writer = lock_writer(&self.writer)?;
        let json = serde_json::json!({ "error": message });
        writeln!(writer, "{}", json)?;
        Ok(())
    }

    fn render_ready(&self, cards: &[ProgramCard]) -> anyhow::Result<()> {
        let mut writer = lock_writer(&self.writer)?;
        for card in cards {
            let json = serde_json::to_string(card)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        let mut writer = lock_writer(&self.writer)?;
        writer.flush()?;
        Ok(())
    }
}

// src/output/csv.rs
//! CSV output handler, one row per selectable item

use crate::output::{lock_writer, SharedWriter, ViewRenderer};
use crate::view::ProgramCard;
use std::io::{self, Write};
use std::sync::Mutex;

const HEADER: [&str; 5] = ["program", "handle", "kind", "id", "identifier"];

/// CSV output handler
pub struct CsvOutput {
    writer: SharedWriter,
}

impl CsvOutput {
    /// Create a new CsvOutput that writes to stdout
    pub fn new() -> Self {
        Self::to_writer(Box::new(io::stdout()))
    }

    /// Create a new CsvOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self::to_writer(Box::new(file))
    }

    pub fn to_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for CsvOutput {
    fn render_loading(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn render_error(&self, message: &str) -> anyhow::Result<()> {
        let mut writer = lock_writer(&self.writer)?;
        let mut out = ::csv::Writer::from_writer(&mut **writer);
        out.write_record(["error"])?;
        out.write_record([message])?;
        out.flush()?;
        Ok(())
    }

    fn render_ready(&self, cards: &[ProgramCard]) -> anyhow::Result<()> {
        let mut writer = lock_writer(&self.writer)?;
        let mut out = ::csv::Writer::from_writer(&mut **writer);

        out.write_record(HEADER)?;
        for card in cards {
            for item in card.items() {
                out.write_record([
                    card.name.as_str(),
                    card.handle.as_str(),
                    item.kind.as_str(),
                    item.id.as_str(),
                    item.label.as_str(),
                ])?;
            }
        }

        out.flush()?;
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        let mut writer = lock_writer(&self.writer)?;
        writer.flush()?;
        Ok(())
    }
}

// src/output/human.rs
//! Human-readable colored terminal output

use crate::output::{lock_writer, SharedWriter, ViewRenderer};
use crate::view::{ProgramCard, SelectableItem, HEADING, LOADING_MESSAGE};
use colored::Colorize;
use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::Mutex;

/// Human-readable output handler with colored terminal output
///
/// Cards and the error message go to `writer`; the loading line goes to
/// `status` (stderr by default) so the data stream only ever holds one state.
pub struct HumanOutput {
    writer: SharedWriter,
    status: SharedWriter,
    use_colors: bool,
}

impl HumanOutput {
    /// Create a new HumanOutput that writes to stdout
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
            status: Mutex::new(Box::new(io::stderr())),
            use_colors: is_terminal::is_terminal(std::io::stdout()),
        }
    }

    /// Create a new HumanOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self::to_writer(Box::new(file), false)
    }

    pub fn to_writer(writer: Box<dyn Write + Send>, use_colors: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            status: Mutex::new(Box::new(io::stderr())),
            use_colors,
        }
    }

    /// Redirect the loading line away from stderr
    pub fn with_status_writer(mut self, status: Box<dyn Write + Send>) -> Self {
        self.status = Mutex::new(status);
        self
    }

    /// Drop control characters from remote text so it cannot emit escape sequences
    fn sanitize(text: &str) -> Cow<'_, str> {
        if text.chars().any(char::is_control) {
            Cow::Owned(text.chars().filter(|c| !c.is_control()).collect())
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Terminal hyperlink (OSC 8); terminals open it in the browser
    fn hyperlink(url: &str) -> String {
        format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, url)
    }

    fn write_group(
        &self,
        writer: &mut dyn Write,
        title: &str,
        items: &[SelectableItem],
    ) -> anyhow::Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        if self.use_colors {
            writeln!(writer, "  {}", title.magenta().bold())?;
            for item in items {
                writeln!(writer, "    {} {}", "[ ]".dimmed(), Self::sanitize(&item.label))?;
            }
        } else {
            writeln!(writer, "  {}", title)?;
            for item in items {
                writeln!(writer, "    [ ] {}", Self::sanitize(&item.label))?;
            }
        }
        Ok(())
    }

    fn write_card(&self, writer: &mut dyn Write, card: &ProgramCard) -> anyhow::Result<()> {
        let name = Self::sanitize(&card.name);
        let url = Self::sanitize(&card.url);
        let handle = Self::sanitize(&card.handle);

        if self.use_colors {
            writeln!(writer, "{}", name.cyan().bold())?;
            writeln!(
                writer,
                "  {} {}",
                Self::hyperlink(&url).green(),
                "(opens in browser)".dimmed()
            )?;
            writeln!(writer, "  {} {}", "Handle:".dimmed(), handle.yellow())?;
            writeln!(writer, "  {} {}", "Max bounty:".dimmed(), card.bounty.green())?;
        } else {
            writeln!(writer, "{}", name)?;
            writeln!(writer, "  {}", url)?;
            writeln!(writer, "  Handle: {}", handle)?;
            writeln!(writer, "  Max bounty: {}", card.bounty)?;
        }

        self.write_group(writer, "Domains", &card.domains)?;
        self.write_group(writer, "URLs", &card.urls)?;
        Ok(())
    }
}

impl Default for HumanOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for HumanOutput {
    fn render_loading(&self) -> anyhow::Result<()> {
        let mut status = lock_writer(&self.status)?;
        writeln!(status, "{}", LOADING_MESSAGE)?;
        status.flush()?;
        Ok(())
    }

    fn render_error(&self, message: &str) -> anyhow::Result<()> {
        let mut writer = lock_writer(&self.writer)?;
        if self.use_colors {
            writeln!(writer, "{}", message.red())?;
        } else {
            writeln!(writer, "{}", message)?;
        }
        Ok(())
    }

    fn render_ready(&self, cards: &[ProgramCard]) -> anyhow::Result<()> {
        let mut writer = lock_writer(&self.writer)?;

        if self.use_colors {
            writeln!(writer, "{}", HEADING.bold().cyan())?;
        } else {
            writeln!(writer, "{}", HEADING)?;
        }

        for card in cards {
            writeln!(writer)?;
            self.write_card(&mut **writer, card)?;
        }
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        let mut writer = lock_writer(&self.writer)?;
        writer.flush()?;
        Ok(())
    }
}

// src/output/mod.rs
//! Rendering of the program list view
//!
//! Every format implements the same three-state contract: a loading
//! indicator, the error message alone, or the program cards.

use crate::view::{LoadState, ProgramCard, ProgramsView};
use anyhow::anyhow;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

pub mod csv;
pub mod human;
pub mod json;
pub mod scope_toml;

/// Trait for renderers of the program list view
pub trait ViewRenderer: Send + Sync {
    /// Render the loading indicator
    fn render_loading(&self) -> anyhow::Result<()>;

    /// Render the error message and nothing else
    fn render_error(&self, message: &str) -> anyhow::Result<()>;

    /// Render the heading and one card per program
    fn render_ready(&self, cards: &[ProgramCard]) -> anyhow::Result<()>;

    /// Flush any buffered output
    fn flush(&self) -> anyhow::Result<()>;
}

/// Render a view in its current state
///
/// Idle and disposed views render nothing.
pub fn render_view(renderer: &dyn ViewRenderer, view: &ProgramsView) -> anyhow::Result<()> {
    if view.is_disposed() {
        return Ok(());
    }

    match view.state() {
        LoadState::Idle => Ok(()),
        LoadState::Loading => renderer.render_loading(),
        LoadState::Error(message) => renderer.render_error(message),
        LoadState::Ready(_) => renderer.render_ready(&view.cards()),
    }?;

    renderer.flush()
}

pub(crate) type SharedWriter = Mutex<Box<dyn Write + Send>>;

pub(crate) fn lock_writer(writer: &SharedWriter) -> anyhow::Result<MutexGuard<'_, Box<dyn Write + Send>>> {
    writer.lock().map_err(|_| anyhow!("output writer lock poisoned"))
}

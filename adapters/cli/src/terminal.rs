//! Text backend that prints scenes to a terminal.

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use sightline_rendering::{Presentation, RenderingBackend};

/// Rendering backend that writes each frame as plain text.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W: Write> {
    writer: W,
}

impl TerminalBackend<Stdout> {
    /// Backend writing to standard output.
    #[must_use]
    pub(crate) fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBackend<W> {
    /// Backend writing to the provided sink.
    #[must_use]
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderingBackend for TerminalBackend<W> {
    fn present(&mut self, presentation: &Presentation) -> Result<()> {
        let scene = &presentation.scene;
        writeln!(
            self.writer,
            "{} ({}x{})",
            presentation.title,
            scene.size(),
            scene.size()
        )
        .context("failed to write frame title")?;
        self.writer
            .write_all(scene.to_ascii().as_bytes())
            .context("failed to write frame")?;
        self.writer.flush().context("failed to flush frame")
    }
}

//! Copying invitation links and letters out of the TUI.

use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use arboard::Clipboard as ArboardClipboard;
use base64::{Engine as _, engine::general_purpose::STANDARD as Base64Standard};
use tracing::warn;

/// Largest OSC 52 sequence most terminals accept.
pub(super) const OSC52_MAX_BYTES: usize = 100_000;

pub(super) trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard(ArboardClipboard);

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.0
            .set_text(text.to_owned())
            .context("failed to write to the system clipboard")
    }
}

/// Clipboard over the terminal's OSC 52 escape, for SSH sessions and headless hosts.
pub(super) struct Osc52Clipboard<W> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub(super) const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let sequence = osc52_sequence(text);
        if sequence.len() > OSC52_MAX_BYTES {
            return Err(anyhow!(
                "{} bytes is too long for the terminal clipboard",
                text.len()
            ));
        }
        self.out
            .write_all(sequence.as_bytes())
            .context("failed to send the OSC 52 sequence")?;
        self.out.flush().context("failed to flush the OSC 52 sequence")
    }
}

pub(super) fn osc52_sequence(text: &str) -> String {
    let encoded = Base64Standard.encode(text);
    format!("\x1b]52;c;{encoded}\x07")
}

/// Copies through `primary` until it fails once, then through `fallback`.
pub(super) struct FallbackClipboard<P, F> {
    primary: Option<P>,
    fallback: F,
}

impl<P: ClipboardSink, F: ClipboardSink> FallbackClipboard<P, F> {
    pub(super) const fn new(primary: Option<P>, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: ClipboardSink, F: ClipboardSink> ClipboardSink for FallbackClipboard<P, F> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if let Some(primary) = self.primary.as_mut() {
            match primary.set_text(text) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!("clipboard failed: {err:#}; switching to OSC 52");
                    self.primary = None;
                }
            }
        }
        self.fallback.set_text(text)
    }
}

pub(super) fn default_clipboard() -> Box<dyn ClipboardSink> {
    let system = ArboardClipboard::new()
        .map(SystemClipboard)
        .inspect_err(|err| warn!("system clipboard unavailable: {err}; falling back to OSC 52"))
        .ok();
    Box::new(FallbackClipboard::new(system, Osc52Clipboard::new(io::stdout())))
}

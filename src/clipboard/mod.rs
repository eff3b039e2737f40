//! OS clipboard access and the token watcher built on top of it

use anyhow::{Context, Result};
use arboard::Clipboard;

pub mod watcher;

pub use watcher::{watch, WatchState};

/// Plain-text clipboard capability
pub trait ClipboardAccess {
    fn read_text(&mut self) -> Result<String>;
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard
///
/// The handle is kept for the whole run: on X11 and Wayland the written
/// text is only served while it is alive.
pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = Clipboard::new().context("Failed to access system clipboard")?;
        Ok(Self { inner })
    }
}

impl ClipboardAccess for SystemClipboard {
    fn read_text(&mut self) -> Result<String> {
        self.inner
            .get_text()
            .context("Failed to read text from clipboard")
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .context("Failed to write text to clipboard")
    }
}

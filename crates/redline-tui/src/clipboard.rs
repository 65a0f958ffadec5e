use anyhow::{Context, Result};

/// Destination for the "copy" action of the result dialog.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard.
///
/// The handle is opened on first use and kept for the lifetime of the
/// value: on X11 the copied text is only served while its owner lives.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("Failed to access clipboard")?,
        };
        let result = clipboard
            .set_text(text.to_owned())
            .context("Failed to copy to clipboard");
        self.inner = Some(clipboard);
        result
    }
}

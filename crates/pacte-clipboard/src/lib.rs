pub mod system;

pub use system::SystemClipboard;

use pacte_core::PacteError;
use std::cell::RefCell;

/// Text clipboard access.
pub trait Clipboard {
    /// Current clipboard text. Fails with [`PacteError::EmptyClipboard`] when
    /// there is nothing usable, [`PacteError::ClipboardUnavailable`] when the
    /// clipboard cannot be reached.
    fn get_text(&self) -> Result<String, PacteError>;

    fn set_text(&self, text: &str) -> Result<(), PacteError>;
}

/// In-process clipboard, for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: RefCell<Option<String>>,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: RefCell::new(Some(text.into())),
            unavailable: false,
        }
    }

    /// A clipboard whose every access fails.
    pub fn unavailable() -> Self {
        Self {
            content: RefCell::new(None),
            unavailable: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.content.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&self) -> Result<String, PacteError> {
        if self.unavailable {
            return Err(PacteError::ClipboardUnavailable("clipboard is offline".into()));
        }
        match self.content.borrow().as_deref() {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(PacteError::EmptyClipboard),
        }
    }

    fn set_text(&self, text: &str) -> Result<(), PacteError> {
        if self.unavailable {
            return Err(PacteError::ClipboardUnavailable("clipboard is offline".into()));
        }
        *self.content.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_round_trip() {
        let cb = MemoryClipboard::new();
        cb.set_text("hello").unwrap();
        assert_eq!(cb.get_text().unwrap(), "hello");
        assert_eq!(cb.contents().as_deref(), Some("hello"));
    }

    #[test]
    fn empty_clipboard_is_reported() {
        assert!(matches!(
            MemoryClipboard::new().get_text(),
            Err(PacteError::EmptyClipboard)
        ));
        assert!(matches!(
            MemoryClipboard::with_text("").get_text(),
            Err(PacteError::EmptyClipboard)
        ));
    }

    #[test]
    fn unavailable_clipboard_fails_both_ways() {
        let cb = MemoryClipboard::unavailable();
        assert!(matches!(cb.get_text(), Err(PacteError::ClipboardUnavailable(_))));
        assert!(matches!(cb.set_text("x"), Err(PacteError::ClipboardUnavailable(_))));
    }
}

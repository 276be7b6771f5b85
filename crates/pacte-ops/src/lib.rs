//! The clipboard/file workflows behind each `pacte` command.
//!
//! Every workflow takes its collaborators through a [`Context`], so the CLI
//! wires in the real filesystem and clipboard while tests use a
//! `MemoryClipboard` and a temp directory.

pub mod append;
pub mod copy;
pub mod paste;
pub mod undo;

pub use append::{append, AppendOptions, AppendReport};
pub use copy::{copy, looks_binary, CopyOptions, CopyReport, BINARY_SNIFF_LEN};
pub use paste::{paste, PasteOptions, PasteReport};
pub use undo::{
    recent_operations, reverse, undo, MostRecent, Reversal, Selector, UndoOutcome,
    UNDO_LIST_LIMIT,
};

use pacte_clipboard::Clipboard;
use pacte_core::Config;
use pacte_history::HistoryStore;
use pacte_store::FileStorage;

/// Collaborators shared by the workflows.
pub struct Context<'a> {
    pub fs: &'a dyn FileStorage,
    pub clipboard: &'a dyn Clipboard,
    pub history: &'a HistoryStore,
    pub config: &'a Config,
}

/// Result of a workflow that may stop at a confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

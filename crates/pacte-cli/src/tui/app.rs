use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pacte_core::Operation;

use crate::display::format_timestamp;

/// State of the undo selector.
pub struct App {
    pub operations: Vec<Operation>,
    pub datetime_format: String,
    pub selected: usize,
    pub should_quit: bool,
    chosen: Option<usize>,
}

impl App {
    pub fn new(operations: Vec<Operation>, datetime_format: String) -> Self {
        Self {
            operations,
            datetime_format,
            selected: 0,
            should_quit: false,
            chosen: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.operations.len().saturating_sub(1),
            KeyCode::Enter => {
                if !self.operations.is_empty() {
                    self.chosen = Some(self.selected);
                }
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn move_down(&mut self) {
        if self.selected + 1 < self.operations.len() {
            self.selected += 1;
        }
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn time_label(&self, op: &Operation) -> String {
        format_timestamp(&op.timestamp, &self.datetime_format)
    }

    /// The operation picked with Enter; `None` if the user backed out.
    pub fn into_selection(mut self) -> Option<Operation> {
        let idx = self.chosen?;
        (idx < self.operations.len()).then(|| self.operations.swap_remove(idx))
    }
}

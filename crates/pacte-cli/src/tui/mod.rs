mod app;
mod ui;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use pacte_core::Operation;
use pacte_ops::Selector;

use app::App;

/// Full-screen table for picking the operation to undo.
pub struct TuiSelector {
    datetime_format: String,
    error: Option<std::io::Error>,
}

impl TuiSelector {
    pub fn new(datetime_format: &str) -> Self {
        Self {
            datetime_format: datetime_format.to_string(),
            error: None,
        }
    }

    /// Terminal failure from the last `select`, which then reported a cancel.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }
}

impl Selector for TuiSelector {
    fn select(&mut self, operations: &[Operation]) -> Option<Operation> {
        let app = App::new(operations.to_vec(), self.datetime_format.clone());
        let result = ratatui::try_init().and_then(|mut terminal| {
            let result = run(&mut terminal, app);
            ratatui::restore();
            result
        });

        match result {
            Ok(selection) => selection,
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

fn run(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> std::io::Result<Option<Operation>> {
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(app.into_selection())
}

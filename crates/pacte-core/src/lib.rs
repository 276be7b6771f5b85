pub mod config;
pub mod error;
pub mod types;
pub mod util;

pub use config::{Config, UndoTuiConfig};
pub use error::{exit_code, FileError, HistoryError, PacteError};
pub use types::*;

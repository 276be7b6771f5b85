use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes, one per failure category.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const GENERIC: u8 = 1;
    pub const CLIPBOARD: u8 = 2;
    pub const FILE: u8 = 3;
    pub const HISTORY: u8 = 4;
    pub const CANCELLED: u8 = 5;
}

/// Root error for every pacte operation.
#[derive(Debug, Error)]
pub enum PacteError {
    #[error("failed to access clipboard: {0}")]
    ClipboardUnavailable(String),

    #[error("clipboard is empty")]
    EmptyClipboard,

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PacteError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PacteError::ClipboardUnavailable(_) | PacteError::EmptyClipboard => {
                exit_code::CLIPBOARD
            }
            PacteError::File(_) => exit_code::FILE,
            PacteError::History(_) => exit_code::HISTORY,
            PacteError::Config(_) => exit_code::GENERIC,
        }
    }
}

/// File-level failures: missing files, undecodable content, I/O.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to decode {} as {encoding} (may be binary)", path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("text for {} cannot be represented in {encoding}", path.display())]
    Encode {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FileError::NotFound { .. })
    }
}

/// History persistence and bookkeeping failures.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file is corrupted ({}): {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to {action} history ({}): {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("operation not found: {id}")]
    NotFound { id: String },

    #[error("invalid operation record: {0}")]
    InvalidRecord(String),

    /// The file-level reversal happened but the record is still in history.
    #[error(
        "'{}' was reverted but operation {id} could not be removed from history: {source}",
        target.display()
    )]
    Stale {
        id: String,
        target: PathBuf,
        #[source]
        source: Box<HistoryError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_category() {
        assert_eq!(PacteError::EmptyClipboard.exit_code(), exit_code::CLIPBOARD);
        assert_eq!(
            PacteError::ClipboardUnavailable("no tool".into()).exit_code(),
            exit_code::CLIPBOARD
        );
        let file = FileError::NotFound {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(PacteError::from(file).exit_code(), exit_code::FILE);
        let hist = HistoryError::NotFound { id: "op_x".into() };
        assert_eq!(PacteError::from(hist).exit_code(), exit_code::HISTORY);
        assert_eq!(PacteError::Config("bad".into()).exit_code(), exit_code::GENERIC);
    }

    #[test]
    fn file_error_messages_name_the_path() {
        let err = FileError::NotFound {
            path: PathBuf::from("/tmp/missing.txt"),
        };
        assert_eq!(err.to_string(), "file does not exist: /tmp/missing.txt");
        assert!(err.is_not_found());
    }

    #[test]
    fn decode_error_names_the_encoding() {
        let err = FileError::Decode {
            path: PathBuf::from("/tmp/a.bin"),
            encoding: "Shift_JIS",
        };
        assert_eq!(
            err.to_string(),
            "failed to decode /tmp/a.bin as Shift_JIS (may be binary)"
        );
    }

    #[test]
    fn stale_error_keeps_cause() {
        let err = HistoryError::Stale {
            id: "op_1".into(),
            target: PathBuf::from("/tmp/a.txt"),
            source: Box::new(HistoryError::NotFound { id: "op_1".into() }),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/a.txt"));
        assert!(msg.contains("operation not found"));
    }
}

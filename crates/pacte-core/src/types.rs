use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Schema version written into every history document.
pub const SCHEMA_VERSION: &str = "1.0";

/// Operation ID format: `op_<ulid>`
pub type OperationId = String;

/// The kind of file mutation an operation performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Clipboard content overwrote (or created) the target.
    Paste,
    /// Clipboard content was appended to the target.
    Append,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Paste => "paste",
            OperationKind::Append => "append",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paste" => Ok(OperationKind::Paste),
            "append" => Ok(OperationKind::Append),
            _ => Err(format!("invalid operation type: {s}. Expected: paste, append")),
        }
    }
}

/// One completed, undoable mutation (one element of `history.json`).
///
/// `backup_path == None` means the operation created the target from
/// nothing; undoing it deletes the file. Otherwise the prior bytes live at
/// `backup_path` and undo restores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: OperationId,
    pub timestamp: String,
    #[serde(rename = "operation_type")]
    pub kind: OperationKind,
    pub target_path: PathBuf,
    #[serde(default, deserialize_with = "empty_path_as_none")]
    pub backup_path: Option<PathBuf>,
    pub content_preview: String,
}

impl Operation {
    /// File name of the target, for compact display.
    pub fn target_file_name(&self) -> String {
        self.target_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.target_path.display().to_string())
    }
}

/// The persisted history document.
///
/// Documents written by older builds may lack `version` or `operations`;
/// both fall back to their defaults instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDocument {
    #[serde(default = "default_version")]
    pub version: String,
    /// Oldest first.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Default for HistoryDocument {
    fn default() -> Self {
        Self {
            version: default_version(),
            operations: Vec::new(),
        }
    }
}

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn empty_path_as_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(PathBuf::from))
}

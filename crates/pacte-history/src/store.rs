use crate::retention::{evict_overflow, BackupReclaimer, EvictionSink};
use pacte_core::util::{absolutize, new_operation_id, now_rfc3339, truncate_preview};
use pacte_core::{Config, HistoryDocument, HistoryError, Operation, OperationKind};
use pacte_store::LocalFs;
use std::path::{Path, PathBuf};

/// The persisted operation history (`<dir>/history.json`).
///
/// Every call reads the document, changes it, and rewrites it in full.
/// There is no cross-process locking; two processes mutating the same
/// history concurrently can lose an update.
pub struct HistoryStore {
    path: PathBuf,
    max_history: usize,
    preview_length: usize,
    sink: Box<dyn EvictionSink>,
}

impl HistoryStore {
    /// Open (creating the directory if needed) the history in `dir`.
    /// Evicted records have their backups reclaimed from the local filesystem.
    /// `max_history` must be at least 1.
    pub fn open(
        dir: impl Into<PathBuf>,
        max_history: usize,
        preview_length: usize,
    ) -> Result<Self, HistoryError> {
        if max_history == 0 {
            return Err(HistoryError::InvalidRecord(
                "max_history must be at least 1".into(),
            ));
        }
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| HistoryError::Io {
            action: "create directory for",
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            path: pacte_store::history_file(&dir),
            max_history,
            preview_length,
            sink: Box::new(BackupReclaimer::new(LocalFs)),
        })
    }

    pub fn from_config(dir: impl Into<PathBuf>, config: &Config) -> Result<Self, HistoryError> {
        Self::open(dir, config.max_history, config.preview_length)
    }

    /// Replace the eviction sink.
    pub fn with_sink(mut self, sink: Box<dyn EvictionSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a completed paste/append. Paths are stored absolute and the
    /// preview is truncated. Records beyond `max_history` are evicted oldest
    /// first and handed to the eviction sink once the history is saved.
    pub fn append(
        &self,
        kind: OperationKind,
        target: &Path,
        backup: Option<&Path>,
        content: &str,
    ) -> Result<Operation, HistoryError> {
        let target_path =
            absolutize(target).map_err(|e| HistoryError::InvalidRecord(e.to_string()))?;
        let backup_path = backup
            .map(absolutize)
            .transpose()
            .map_err(|e| HistoryError::InvalidRecord(e.to_string()))?;

        let operation = Operation {
            id: new_operation_id(),
            timestamp: now_rfc3339(),
            kind,
            target_path,
            backup_path,
            content_preview: truncate_preview(content, self.preview_length),
        };

        let mut doc = self.load()?;
        doc.operations.push(operation.clone());
        let evicted = evict_overflow(&mut doc.operations, self.max_history);
        self.save(&doc)?;

        for op in &evicted {
            self.sink.on_evicted(op);
        }
        tracing::debug!(
            id = %operation.id,
            kind = %operation.kind,
            target = %operation.target_path.display(),
            evicted = evicted.len(),
            "recorded operation"
        );
        Ok(operation)
    }

    /// Operations newest first, at most `limit` of them when given.
    pub fn list(&self, limit: Option<usize>) -> Result<Vec<Operation>, HistoryError> {
        let doc = self.load()?;
        let newest_first = doc.operations.into_iter().rev();
        Ok(match limit {
            Some(n) => newest_first.take(n).collect(),
            None => newest_first.collect(),
        })
    }

    /// The most recent operation, if any.
    pub fn latest(&self) -> Result<Option<Operation>, HistoryError> {
        Ok(self.load()?.operations.pop())
    }

    pub fn len(&self) -> Result<usize, HistoryError> {
        Ok(self.load()?.operations.len())
    }

    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len()? == 0)
    }

    /// Remove the record with `id` and return it. Backup files are left
    /// untouched; an unknown id leaves the history unchanged.
    pub fn remove(&self, id: &str) -> Result<Operation, HistoryError> {
        let mut doc = self.load()?;
        let idx = doc
            .operations
            .iter()
            .position(|op| op.id == id)
            .ok_or_else(|| HistoryError::NotFound { id: id.to_string() })?;
        let removed = doc.operations.remove(idx);
        self.save(&doc)?;
        tracing::debug!(id, "removed operation from history");
        Ok(removed)
    }

    /// Load the document. A missing file is an empty history.
    fn load(&self) -> Result<HistoryDocument, HistoryError> {
        if !self.path.exists() {
            return Ok(HistoryDocument::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| HistoryError::Io {
            action: "read",
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| HistoryError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, doc: &HistoryDocument) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(doc).map_err(HistoryError::Serialize)?;
        pacte_store::write_atomic(&self.path, json.as_bytes()).map_err(|source| {
            HistoryError::Io {
                action: "write",
                path: self.path.clone(),
                source,
            }
        })
    }
}

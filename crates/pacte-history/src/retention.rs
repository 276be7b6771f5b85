//! Retention cap and reclamation of evicted backups.
//!
//! The store only decides *which* records fall off the front; what happens to
//! their backup files is up to the [`EvictionSink`] it was built with.

use pacte_core::Operation;
use pacte_store::FileStorage;

/// Drop the oldest records until at most `max` remain. Returns the dropped
/// records, oldest first.
pub fn evict_overflow(operations: &mut Vec<Operation>, max: usize) -> Vec<Operation> {
    let excess = operations.len().saturating_sub(max);
    operations.drain(..excess).collect()
}

/// Receives every record evicted by the retention cap, after the trimmed
/// history has been persisted. Infallible: cleanup is best-effort.
pub trait EvictionSink {
    fn on_evicted(&self, op: &Operation);
}

/// Deletes the backup file of each evicted record.
///
/// Failures are logged and swallowed; a leftover backup is an orphaned file,
/// not a broken history.
pub struct BackupReclaimer<S> {
    storage: S,
}

impl<S: FileStorage> BackupReclaimer<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: FileStorage> EvictionSink for BackupReclaimer<S> {
    fn on_evicted(&self, op: &Operation) {
        let Some(backup) = &op.backup_path else {
            return;
        };
        if !self.storage.exists(backup) {
            return;
        }
        match self.storage.delete(backup) {
            Ok(()) => tracing::debug!(
                id = %op.id,
                backup = %backup.display(),
                "reclaimed backup of evicted operation"
            ),
            Err(e) => tracing::warn!(
                id = %op.id,
                backup = %backup.display(),
                error = %e,
                "failed to delete backup of evicted operation"
            ),
        }
    }
}

/// Sink that leaves evicted backups alone.
pub struct KeepBackups;

impl EvictionSink for KeepBackups {
    fn on_evicted(&self, _op: &Operation) {}
}

//! Reversing a recorded paste/append.
//!
//! An undo picks one operation, reverses its effect on the file, and only
//! then drops its record:
//!
//! - a record with a backup is restored from it (the backup is consumed);
//! - a record without one means the operation created the file, so the file
//!   is deleted.
//!
//! If the reversal fails the record stays so the undo can be retried. If the
//! reversal succeeds but the record cannot be dropped, the error is
//! [`HistoryError::Stale`]: the file is back to its old state while history
//! still lists the operation.

use pacte_core::{FileError, HistoryError, Operation, PacteError};
use pacte_history::HistoryStore;
use pacte_store::{delete_file, restore_from_backup, FileStorage};

/// How many recent operations are offered for undo.
pub const UNDO_LIST_LIMIT: usize = 50;

/// Chooses which operation to undo. `operations` is newest first and never
/// empty; `None` means the user backed out.
pub trait Selector {
    fn select(&mut self, operations: &[Operation]) -> Option<Operation>;
}

/// Picks the newest operation without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostRecent;

impl Selector for MostRecent {
    fn select(&mut self, operations: &[Operation]) -> Option<Operation> {
        operations.first().cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reversal {
    /// The target got its pre-operation bytes back.
    Restored,
    /// The target was created by the operation and has been removed.
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    NothingToUndo,
    Cancelled,
    Undone {
        operation: Operation,
        reversal: Reversal,
    },
}

/// The operations an undo can choose from, newest first.
pub fn recent_operations(history: &HistoryStore) -> Result<Vec<Operation>, HistoryError> {
    history.list(Some(UNDO_LIST_LIMIT))
}

/// Undo the file-level effect of `op`. History is not touched.
pub fn reverse(fs: &dyn FileStorage, op: &Operation) -> Result<Reversal, FileError> {
    match &op.backup_path {
        Some(backup) => {
            restore_from_backup(fs, backup, &op.target_path)?;
            Ok(Reversal::Restored)
        }
        None => {
            delete_file(fs, &op.target_path)?;
            Ok(Reversal::Deleted)
        }
    }
}

/// Select, reverse and forget one operation.
pub fn undo(
    fs: &dyn FileStorage,
    history: &HistoryStore,
    selector: &mut dyn Selector,
) -> Result<UndoOutcome, PacteError> {
    let operations = recent_operations(history)?;
    if operations.is_empty() {
        return Ok(UndoOutcome::NothingToUndo);
    }
    let Some(operation) = selector.select(&operations) else {
        return Ok(UndoOutcome::Cancelled);
    };

    let reversal = reverse(fs, &operation)?;

    history
        .remove(&operation.id)
        .map_err(|source| HistoryError::Stale {
            id: operation.id.clone(),
            target: operation.target_path.clone(),
            source: Box::new(source),
        })?;

    tracing::info!(
        id = %operation.id,
        kind = %operation.kind,
        target = %operation.target_path.display(),
        ?reversal,
        "undid operation"
    );
    Ok(UndoOutcome::Undone {
        operation,
        reversal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacte_core::OperationKind;
    use pacte_store::{create_backup, LocalFs};
    use std::path::Path;

    fn store(dir: &Path) -> HistoryStore {
        HistoryStore::open(dir.join("store"), 50, 50).unwrap()
    }

    struct Pick(usize);

    impl Selector for Pick {
        fn select(&mut self, operations: &[Operation]) -> Option<Operation> {
            operations.get(self.0).cloned()
        }
    }

    struct Cancel;

    impl Selector for Cancel {
        fn select(&mut self, _operations: &[Operation]) -> Option<Operation> {
            None
        }
    }

    #[test]
    fn empty_history_is_nothing_to_undo() {
        let tmp = tempfile::tempdir().unwrap();
        let history = store(tmp.path());
        let outcome = undo(&LocalFs, &history, &mut MostRecent).unwrap();
        assert_eq!(outcome, UndoOutcome::NothingToUndo);
        assert!(!history.path().exists());
    }

    #[test]
    fn cancelled_selection_changes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let history = store(tmp.path());
        let target = tmp.path().join("a.txt");
        std::fs::write(&target, "x").unwrap();
        history.append(OperationKind::Paste, &target, None, "x").unwrap();

        assert_eq!(undo(&LocalFs, &history, &mut Cancel).unwrap(), UndoOutcome::Cancelled);
        assert!(target.exists());
        assert_eq!(history.len().unwrap(), 1);
    }

    #[test]
    fn record_without_backup_deletes_target() {
        let tmp = tempfile::tempdir().unwrap();
        let history = store(tmp.path());
        let target = tmp.path().join("new.txt");
        std::fs::write(&target, "created").unwrap();
        let op = history.append(OperationKind::Paste, &target, None, "created").unwrap();

        let outcome = undo(&LocalFs, &history, &mut MostRecent).unwrap();
        assert_eq!(
            outcome,
            UndoOutcome::Undone {
                operation: op,
                reversal: Reversal::Deleted
            }
        );
        assert!(!target.exists());
        assert!(history.is_empty().unwrap());
    }

    #[test]
    fn record_with_backup_restores_and_consumes_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let history = store(tmp.path());
        let target = tmp.path().join("notes.txt");
        std::fs::write(&target, "original").unwrap();
        let backup = create_backup(&LocalFs, &target).unwrap();
        std::fs::write(&target, "pasted").unwrap();
        history
            .append(OperationKind::Paste, &target, Some(&backup), "pasted")
            .unwrap();

        let outcome = undo(&LocalFs, &history, &mut MostRecent).unwrap();
        assert!(matches!(
            outcome,
            UndoOutcome::Undone {
                reversal: Reversal::Restored,
                ..
            }
        ));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "original");
        assert!(!backup.exists());
        assert!(history.is_empty().unwrap());
    }

    #[test]
    fn selector_can_pick_an_older_operation() {
        let tmp = tempfile::tempdir().unwrap();
        let history = store(tmp.path());
        let older = tmp.path().join("older.txt");
        let newer = tmp.path().join("newer.txt");
        std::fs::write(&older, "o").unwrap();
        std::fs::write(&newer, "n").unwrap();
        let old_op = history.append(OperationKind::Append, &older, None, "o").unwrap();
        let new_op = history.append(OperationKind::Append, &newer, None, "n").unwrap();

        undo(&LocalFs, &history, &mut Pick(1)).unwrap();
        assert!(!older.exists());
        assert!(newer.exists());
        let left: Vec<_> = history.list(None).unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(left, vec![new_op.id]);
        assert_ne!(left[0], old_op.id);
    }

    #[test]
    fn missing_backup_fails_and_keeps_record() {
        let tmp = tempfile::tempdir().unwrap();
        let history = store(tmp.path());
        let target = tmp.path().join("notes.txt");
        std::fs::write(&target, "current").unwrap();
        history
            .append(OperationKind::Paste, &target, Some(&tmp.path().join("gone.bak")), "c")
            .unwrap();

        let err = undo(&LocalFs, &history, &mut MostRecent).unwrap_err();
        assert!(matches!(err, PacteError::File(FileError::NotFound { .. })));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "current");
        assert_eq!(history.len().unwrap(), 1);
    }

    #[test]
    fn already_deleted_target_fails_and_keeps_record() {
        let tmp = tempfile::tempdir().unwrap();
        let history = store(tmp.path());
        let target = tmp.path().join("vanished.txt");
        history.append(OperationKind::Paste, &target, None, "c").unwrap();

        let err = undo(&LocalFs, &history, &mut MostRecent).unwrap_err();
        assert!(matches!(err, PacteError::File(FileError::NotFound { .. })));
        assert_eq!(history.len().unwrap(), 1);
    }

    #[test]
    fn unremovable_record_is_reported_stale() {
        let tmp = tempfile::tempdir().unwrap();
        let history = store(tmp.path());
        let target = tmp.path().join("a.txt");
        std::fs::write(&target, "x").unwrap();
        history.append(OperationKind::Paste, &target, None, "x").unwrap();

        // The selector hands back a record the store no longer knows.
        struct Ghost;
        impl Selector for Ghost {
            fn select(&mut self, operations: &[Operation]) -> Option<Operation> {
                let mut op = operations[0].clone();
                op.id = "op_ghost".into();
                Some(op)
            }
        }

        let err = undo(&LocalFs, &history, &mut Ghost).unwrap_err();
        let PacteError::History(HistoryError::Stale { id, source, .. }) = err else {
            panic!("expected a stale history error");
        };
        assert_eq!(id, "op_ghost");
        assert!(matches!(*source, HistoryError::NotFound { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn offered_list_is_capped() {
        let tmp = tempfile::tempdir().unwrap();
        let history = HistoryStore::open(tmp.path().join("store"), 80, 50).unwrap();
        for n in 0..60 {
            history
                .append(OperationKind::Append, &tmp.path().join(format!("{n}")), None, "c")
                .unwrap();
        }
        assert_eq!(recent_operations(&history).unwrap().len(), UNDO_LIST_LIMIT);
    }
}

use crate::prompt::NumberedSelector;
use crate::runtime::Runtime;
use crate::Status;
use pacte_core::Operation;
use pacte_history::HistoryStore;
use pacte_ops::{recent_operations, undo, MostRecent, Reversal, UndoOutcome};
use pacte_store::LocalFs;
use std::path::Path;

pub fn execute(cwd: &Path, last: bool, list: bool) -> anyhow::Result<Status> {
    let rt = Runtime::load(cwd)?;

    if list {
        print_list(&recent_operations(&rt.history)?);
        return Ok(Status::Done);
    }

    let outcome = if last {
        undo(&LocalFs, &rt.history, &mut MostRecent)?
    } else {
        undo_interactively(&rt.history, &rt.config.undo_tui.datetime_format)?
    };

    match outcome {
        UndoOutcome::NothingToUndo => {
            println!("No operations found in history");
            Ok(Status::Done)
        }
        UndoOutcome::Cancelled => Ok(Status::Cancelled),
        UndoOutcome::Undone {
            operation,
            reversal,
        } => {
            match reversal {
                Reversal::Restored => println!(
                    "> Restored '{}' from backup",
                    operation.target_path.display()
                ),
                Reversal::Deleted => println!("> Deleted '{}'", operation.target_path.display()),
            }
            println!("> Operation removed from history");
            Ok(Status::Done)
        }
    }
}

fn print_list(operations: &[Operation]) {
    if operations.is_empty() {
        println!("No operations found in history");
        return;
    }
    println!("Operation History:\n");
    for (i, op) in operations.iter().enumerate() {
        println!("{}", list_line(i + 1, op));
    }
}

fn list_line(n: usize, op: &Operation) -> String {
    format!(
        "{n}. [{}] {} - {}",
        op.kind,
        op.target_path.display(),
        op.content_preview
    )
}

/// Full-screen selector on a terminal, numbered prompt otherwise.
fn undo_interactively(history: &HistoryStore, datetime_format: &str) -> anyhow::Result<UndoOutcome> {
    #[cfg(feature = "tui")]
    {
        use std::io::IsTerminal;

        if std::io::stdout().is_terminal() {
            let mut selector = crate::tui::TuiSelector::new(datetime_format);
            let outcome = undo(&LocalFs, history, &mut selector)?;
            if let Some(e) = selector.take_error() {
                return Err(e.into());
            }
            return Ok(outcome);
        }
    }

    let mut selector = NumberedSelector::new(datetime_format);
    Ok(undo(&LocalFs, history, &mut selector)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacte_core::OperationKind;
    use std::path::PathBuf;

    #[test]
    fn list_line_format() {
        let op = Operation {
            id: "op_1".into(),
            timestamp: "2026-06-15T12:00:00Z".into(),
            kind: OperationKind::Append,
            target_path: PathBuf::from("/work/log.txt"),
            backup_path: None,
            content_preview: "hello...".into(),
        };
        assert_eq!(list_line(2, &op), "2. [append] /work/log.txt - hello...");
    }
}

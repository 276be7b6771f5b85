use crate::display::file_label;
use crate::prompt;
use crate::runtime::Runtime;
use crate::Status;
use pacte_core::util::format_file_size;
use pacte_ops::{paste, Outcome, PasteOptions};
use std::path::Path;

pub fn execute(cwd: &Path, file: &Path, opts: PasteOptions) -> anyhow::Result<Status> {
    let rt = Runtime::load(cwd)?;

    let report = match paste(&rt.context(), file, opts, &mut prompt::confirm)? {
        Outcome::Cancelled => return Ok(Status::Cancelled),
        Outcome::Done(report) => report,
    };

    if let Some(backup) = &report.backup {
        println!("> Backed up to '{}'", file_label(backup));
    }
    if let Some(dir) = &report.created_dir {
        println!("> Created directory '{}'", dir.display());
    }
    if report.created_file {
        println!("> Created file '{}'", file.display());
    }
    println!(
        "> Pasted clipboard content to '{}' ({})",
        file.display(),
        format_file_size(report.size)
    );
    if report.operation.is_none() {
        println!("{NOT_RECORDED}");
    }
    Ok(Status::Done)
}

/// Shown when a change to an existing file has no backup to undo from.
pub const NOT_RECORDED: &str =
    "> Not recorded in history: no backup was taken, so this can't be undone";


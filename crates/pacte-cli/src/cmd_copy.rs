use crate::prompt;
use crate::runtime::Runtime;
use crate::Status;
use pacte_core::util::format_file_size;
use pacte_ops::{copy, CopyOptions, Outcome};
use std::path::Path;

pub fn execute(cwd: &Path, file: &Path, opts: CopyOptions) -> anyhow::Result<Status> {
    let rt = Runtime::load(cwd)?;

    let mut confirm = |question: &str| {
        eprintln!("Warning: file may not copy correctly.");
        prompt::confirm(question)
    };
    let report = match copy(&rt.context(), file, opts, &mut confirm)? {
        Outcome::Cancelled => return Ok(Status::Cancelled),
        Outcome::Done(report) => report,
    };

    println!(
        "> Copied '{}' to clipboard ({})",
        file.display(),
        format_file_size(report.size)
    );
    Ok(Status::Done)
}

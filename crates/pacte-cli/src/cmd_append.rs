use crate::cmd_paste::NOT_RECORDED;
use crate::display::file_label;
use crate::runtime::Runtime;
use crate::Status;
use pacte_core::util::format_file_size;
use pacte_ops::{append, AppendOptions};
use std::path::Path;

pub fn execute(cwd: &Path, file: &Path, opts: AppendOptions) -> anyhow::Result<Status> {
    let rt = Runtime::load(cwd)?;
    let report = append(&rt.context(), file, opts)?;

    if let Some(backup) = &report.backup {
        println!("> Backed up to '{}'", file_label(backup));
    }
    if report.created_file {
        println!("> Created file '{}'", file.display());
    }
    println!(
        "> Appended clipboard content to '{}' ({})",
        file.display(),
        format_file_size(report.size)
    );
    if report.operation.is_none() {
        println!("{NOT_RECORDED}");
    }
    Ok(Status::Done)
}

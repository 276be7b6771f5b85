use crate::Context;
use pacte_core::{Operation, OperationKind, PacteError};
use pacte_store::{create_backup, encoding};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct AppendOptions {
    /// Don't separate the new text from existing content with a newline.
    pub no_newline: bool,
    pub no_backup: bool,
}

#[derive(Debug, Clone)]
pub struct AppendReport {
    /// `None` when an existing file was extended without a backup.
    pub operation: Option<Operation>,
    pub backup: Option<PathBuf>,
    pub created_file: bool,
    /// Size of the whole file after the append.
    pub size: u64,
}

/// Append the clipboard text to `target`, creating it if missing.
///
/// A `\n` separator goes in front of the text only when the file already
/// has content.
pub fn append(
    ctx: &Context<'_>,
    target: &Path,
    opts: AppendOptions,
) -> Result<AppendReport, PacteError> {
    let content = ctx.clipboard.get_text()?;
    let existed = ctx.fs.exists(target);
    let has_content = existed && ctx.fs.size(target)? > 0;
    let text = if has_content && !opts.no_newline {
        format!("\n{content}")
    } else {
        content.clone()
    };
    let bytes = encoding::encode(&text, ctx.config.encoding(), target)?;

    let backup = if existed && ctx.config.backup_on_append && !opts.no_backup {
        Some(create_backup(ctx.fs, target)?)
    } else {
        None
    };

    ctx.fs.append_bytes(target, &bytes)?;
    let size = ctx.fs.size(target)?;
    let operation = if existed && backup.is_none() {
        tracing::debug!(target = %target.display(), "append without backup is not recorded");
        None
    } else {
        Some(
            ctx.history
                .append(OperationKind::Append, target, backup.as_deref(), &content)?,
        )
    };

    tracing::debug!(target = %target.display(), bytes = size, "appended clipboard");
    Ok(AppendReport {
        operation,
        backup,
        created_file: !existed,
        size,
    })
}

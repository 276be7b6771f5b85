use crate::{Context, Outcome};
use pacte_core::{FileError, Operation, OperationKind, PacteError};
use pacte_store::{create_backup, encoding};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct PasteOptions {
    pub no_backup: bool,
    /// Overwrite an existing file without asking.
    pub force: bool,
    /// Fail instead of creating a missing file.
    pub no_create: bool,
}

#[derive(Debug, Clone)]
pub struct PasteReport {
    /// `None` when an existing file was overwritten without a backup; undo
    /// could only delete it, so nothing is recorded.
    pub operation: Option<Operation>,
    pub backup: Option<PathBuf>,
    pub created_dir: Option<PathBuf>,
    pub created_file: bool,
    pub size: u64,
}

/// Write the clipboard text to `target`, replacing its content.
///
/// `confirm` is asked before an existing file is overwritten (unless
/// `force`); declining returns [`Outcome::Cancelled`] with nothing touched.
pub fn paste(
    ctx: &Context<'_>,
    target: &Path,
    opts: PasteOptions,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<Outcome<PasteReport>, PacteError> {
    let existed = ctx.fs.exists(target);
    if !existed && opts.no_create {
        return Err(FileError::NotFound {
            path: target.to_path_buf(),
        }
        .into());
    }
    if existed
        && !opts.force
        && !confirm(&format!("File '{}' already exists. Overwrite?", target.display()))
    {
        return Ok(Outcome::Cancelled);
    }

    let content = ctx.clipboard.get_text()?;
    let bytes = encoding::encode(&content, ctx.config.encoding(), target)?;

    let backup = if existed && ctx.config.backup_on_paste && !opts.no_backup {
        Some(create_backup(ctx.fs, target)?)
    } else {
        None
    };

    let created_dir = match target.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) if !ctx.fs.exists(parent) => {
            ctx.fs.create_dir_all(parent)?;
            Some(parent.to_path_buf())
        }
        _ => None,
    };

    ctx.fs.write_bytes(target, &bytes)?;
    let size = ctx.fs.size(target)?;
    let operation = if existed && backup.is_none() {
        tracing::debug!(target = %target.display(), "overwrite without backup is not recorded");
        None
    } else {
        Some(
            ctx.history
                .append(OperationKind::Paste, target, backup.as_deref(), &content)?,
        )
    };

    tracing::debug!(
        target = %target.display(),
        bytes = size,
        backup = backup.is_some(),
        "pasted clipboard"
    );
    Ok(Outcome::Done(PasteReport {
        operation,
        backup,
        created_dir,
        created_file: !existed,
        size,
    }))
}

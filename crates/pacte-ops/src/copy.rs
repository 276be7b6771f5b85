use crate::{Context, Outcome};
use pacte_core::{FileError, PacteError};
use pacte_store::{encoding, Encoding, FileStorage};
use std::path::Path;

/// Bytes inspected when deciding whether a file is text.
pub const BINARY_SNIFF_LEN: usize = 8192;

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    /// Copy a file that looks binary without asking.
    pub force: bool,
    /// Overrides the configured `default_encoding`.
    pub encoding: Option<&'static Encoding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub size: u64,
    pub looked_binary: bool,
}

/// True when the first [`BINARY_SNIFF_LEN`] bytes do not decode in `enc`. A
/// multi-byte character cut off by the sniff window does not count.
pub fn looks_binary(
    fs: &dyn FileStorage,
    path: &Path,
    enc: &'static Encoding,
) -> Result<bool, FileError> {
    let prefix = fs.read_prefix(path, BINARY_SNIFF_LEN)?;
    Ok(!encoding::is_clean_prefix(&prefix, enc))
}

/// Put the text of `source` on the clipboard.
pub fn copy(
    ctx: &Context<'_>,
    source: &Path,
    opts: CopyOptions,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<Outcome<CopyReport>, PacteError> {
    if !ctx.fs.exists(source) {
        return Err(FileError::NotFound {
            path: source.to_path_buf(),
        }
        .into());
    }

    let enc = opts.encoding.unwrap_or_else(|| ctx.config.encoding());
    let looked_binary = looks_binary(ctx.fs, source, enc)?;
    if looked_binary && !opts.force && !confirm("File appears to be binary. Continue?") {
        return Ok(Outcome::Cancelled);
    }

    let text = ctx.fs.read_text(source, enc)?;
    ctx.clipboard.set_text(&text)?;
    let size = ctx.fs.size(source)?;
    tracing::debug!(source = %source.display(), bytes = size, "copied file to clipboard");

    Ok(Outcome::Done(CopyReport {
        size,
        looked_binary,
    }))
}

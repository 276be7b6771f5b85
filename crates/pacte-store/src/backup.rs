//! Timestamped sibling backups and the restore protocol.
//!
//! A backup of `notes.txt` is `notes.txt.<YYYYMMDD_HHMMSS.ffffff>.bak` in the
//! same directory, holding the exact bytes the file had before a mutation.
//! Restoring writes those bytes back over the target and only then removes
//! the backup, so a failed write never loses the last copy.

use crate::fs::FileStorage;
use pacte_core::util::backup_timestamp;
use pacte_core::FileError;
use std::path::{Path, PathBuf};

pub const BACKUP_SUFFIX: &str = "bak";

/// Sibling backup path for `path` with the given stamp.
pub fn backup_path_for(path: &Path, stamp: &str) -> Option<PathBuf> {
    let name = path.file_name()?;
    let mut backup_name = name.to_os_string();
    backup_name.push(format!(".{stamp}.{BACKUP_SUFFIX}"));
    Some(path.with_file_name(backup_name))
}

/// Copy `path` to a new timestamped sibling and return the backup path.
pub fn create_backup(fs: &dyn FileStorage, path: &Path) -> Result<PathBuf, FileError> {
    if !fs.exists(path) {
        return Err(FileError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let no_name = || {
        FileError::io(
            "back up",
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    };

    // Two backups of one file within the same microsecond would collide;
    // the clock moves on, so regenerate until the name is free.
    let mut backup = backup_path_for(path, &backup_timestamp()).ok_or_else(no_name)?;
    while fs.exists(&backup) {
        backup = backup_path_for(path, &backup_timestamp()).ok_or_else(no_name)?;
    }

    let bytes = fs.read_bytes(path)?;
    fs.write_bytes(&backup, &bytes)?;
    tracing::debug!(
        target = %path.display(),
        backup = %backup.display(),
        bytes = bytes.len(),
        "created backup"
    );
    Ok(backup)
}

/// Overwrite `target` with the bytes of `backup`, then delete `backup`.
///
/// The backup is deleted only after the write succeeded.
pub fn restore_from_backup(
    fs: &dyn FileStorage,
    backup: &Path,
    target: &Path,
) -> Result<(), FileError> {
    if !fs.exists(backup) {
        return Err(FileError::NotFound {
            path: backup.to_path_buf(),
        });
    }
    let bytes = fs.read_bytes(backup)?;
    fs.write_bytes(target, &bytes)?;
    fs.delete(backup)?;
    tracing::debug!(
        target = %target.display(),
        backup = %backup.display(),
        "restored from backup"
    );
    Ok(())
}

/// Remove a file that an operation created from nothing.
pub fn delete_file(fs: &dyn FileStorage, path: &Path) -> Result<(), FileError> {
    if !fs.exists(path) {
        return Err(FileError::NotFound {
            path: path.to_path_buf(),
        });
    }
    fs.delete(path)
}

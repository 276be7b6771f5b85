pub mod backup;
pub mod encoding;
pub mod fs;

pub use backup::{backup_path_for, create_backup, delete_file, restore_from_backup, BACKUP_SUFFIX};
pub use encoding::Encoding;
pub use fs::{FileStorage, LocalFs};

use std::fs as stdfs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable overriding the per-user store root.
pub const HOME_ENV: &str = "PACTE_HOME";

/// File name of the history document inside the store root.
pub const HISTORY_FILE_NAME: &str = "history.json";

/// Return the per-user store root.
/// `$PACTE_HOME` if set, else `<data_dir>/pacte` (e.g. `~/.local/share/pacte`,
/// `%APPDATA%\pacte`), falling back to `~/.pacte`.
pub fn store_root() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(home);
        return std::path::absolute(&path).unwrap_or(path);
    }
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("pacte")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".pacte")
    } else {
        PathBuf::from(".pacte-store")
    }
}

/// Path of the history document under `root`.
pub fn history_file(root: &Path) -> PathBuf {
    root.join(HISTORY_FILE_NAME)
}

/// Atomic write: write to temp file in same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("no parent dir for {}", path.display()),
        )
    })?;
    stdfs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_root_is_not_empty() {
        let root = store_root();
        assert!(!root.as_os_str().is_empty());
    }

    #[test]
    fn history_file_lives_in_root() {
        let root = Path::new("/data/pacte");
        assert_eq!(history_file(root), PathBuf::from("/data/pacte/history.json"));
    }

    #[test]
    fn write_atomic_creates_file_and_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("history.json");
        write_atomic(&path, b"{}").unwrap();
        assert_eq!(stdfs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn write_atomic_replaces_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("history.json");
        write_atomic(&path, b"first version, longer").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(stdfs::read_to_string(&path).unwrap(), "second");
        // no temp files left behind
        assert_eq!(stdfs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}

use crate::encoding::{self, Encoding};
use pacte_core::FileError;
use std::io::{Read, Write};
use std::path::Path;

/// Raw file primitives the backup protocol and the commands are built on.
///
/// Every failure is a [`FileError`]; a missing file is always reported as
/// [`FileError::NotFound`] rather than a generic I/O error.
pub trait FileStorage {
    fn exists(&self, path: &Path) -> bool;

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FileError>;

    /// Create or truncate `path` and write `data`.
    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), FileError>;

    /// Append `data`, creating the file if needed.
    fn append_bytes(&self, path: &Path, data: &[u8]) -> Result<(), FileError>;

    fn delete(&self, path: &Path) -> Result<(), FileError>;

    fn size(&self, path: &Path) -> Result<u64, FileError>;

    /// Create `dir` and any missing ancestors.
    fn create_dir_all(&self, dir: &Path) -> Result<(), FileError>;

    /// Read at most `limit` bytes from the start of the file.
    fn read_prefix(&self, path: &Path, limit: usize) -> Result<Vec<u8>, FileError> {
        let mut bytes = self.read_bytes(path)?;
        bytes.truncate(limit);
        Ok(bytes)
    }

    fn read_text(&self, path: &Path, enc: &'static Encoding) -> Result<String, FileError> {
        let bytes = self.read_bytes(path)?;
        encoding::decode(&bytes, enc, path)
    }

}

/// [`FileStorage`] over the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

fn map_io(action: &'static str, path: &Path, e: std::io::Error) -> FileError {
    if e.kind() == std::io::ErrorKind::NotFound {
        FileError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        FileError::io(action, path, e)
    }
}

impl FileStorage for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FileError> {
        std::fs::read(path).map_err(|e| map_io("read", path, e))
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), FileError> {
        std::fs::write(path, data).map_err(|e| FileError::io("write", path, e))
    }

    fn append_bytes(&self, path: &Path, data: &[u8]) -> Result<(), FileError> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| FileError::io("open", path, e))?;
        file.write_all(data)
            .map_err(|e| FileError::io("append to", path, e))
    }

    fn delete(&self, path: &Path) -> Result<(), FileError> {
        std::fs::remove_file(path).map_err(|e| map_io("delete", path, e))
    }

    fn size(&self, path: &Path) -> Result<u64, FileError> {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| map_io("stat", path, e))
    }

    fn create_dir_all(&self, dir: &Path) -> Result<(), FileError> {
        std::fs::create_dir_all(dir).map_err(|e| FileError::io("create directory", dir, e))
    }

    fn read_prefix(&self, path: &Path, limit: usize) -> Result<Vec<u8>, FileError> {
        let file = std::fs::File::open(path).map_err(|e| map_io("open", path, e))?;
        let mut buf = Vec::with_capacity(limit);
        file.take(limit as u64)
            .read_to_end(&mut buf)
            .map_err(|e| FileError::io("read", path, e))?;
        Ok(buf)
    }
}

use crate::error::FileError;
use std::path::{Path, PathBuf};

/// Marker appended to a preview that was cut short.
pub const PREVIEW_ELLIPSIS: &str = "...";

const BYTES_PER_KIB: u64 = 1024;
const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Current time as RFC 3339 UTC, e.g. `2026-02-23T05:00:00.123456Z`.
pub fn now_rfc3339() -> String {
    let now = time::OffsetDateTime::now_utc();
    now.format(&time::format_description::well_known::Rfc3339)
        .expect("RFC3339 formatting should not fail")
}

/// Backup file stamp: `YYYYMMDD_HHMMSS.ffffff` in local time (UTC if the
/// local offset cannot be determined).
pub fn backup_timestamp() -> String {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}.{:06}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        now.microsecond()
    )
}

pub fn new_operation_id() -> String {
    format!("op_{}", ulid::Ulid::new().to_string().to_lowercase())
}

/// Cut `content` to at most `max_chars` characters, marking the cut with
/// [`PREVIEW_ELLIPSIS`]. Counts chars, not bytes.
pub fn truncate_preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        None => content.to_string(),
        Some((cut, _)) => format!("{}{PREVIEW_ELLIPSIS}", &content[..cut]),
    }
}

/// Human-readable size: `42 bytes`, `1.5 KiB`, `3.0 MiB`.
pub fn format_file_size(size_bytes: u64) -> String {
    if size_bytes < BYTES_PER_KIB {
        format!("{size_bytes} bytes")
    } else if size_bytes < BYTES_PER_MIB {
        format!("{:.1} KiB", size_bytes as f64 / BYTES_PER_KIB as f64)
    } else {
        format!("{:.1} MiB", size_bytes as f64 / BYTES_PER_MIB as f64)
    }
}

/// Make `path` absolute against the current directory without touching the
/// filesystem (the target may not exist yet).
pub fn absolutize(path: &Path) -> Result<PathBuf, FileError> {
    if path.as_os_str().is_empty() {
        return Err(FileError::io(
            "resolve",
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty path"),
        ));
    }
    std::path::absolute(path).map_err(|e| FileError::io("resolve", path, e))
}

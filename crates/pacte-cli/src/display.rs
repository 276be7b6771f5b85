use chrono::{DateTime, Local};
use pacte_core::Operation;
use std::path::Path;

/// Render an RFC 3339 timestamp in local time with a strftime `format`.
/// Unparseable timestamps are shown as stored.
pub fn format_timestamp(raw: &str, format: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Local).format(format).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Preview text on a single line.
pub fn preview_line(op: &Operation) -> String {
    op.content_preview
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect()
}

/// Final path component for status lines, or the whole path if it has none.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacte_core::OperationKind;
    use std::path::PathBuf;

    #[test]
    fn timestamp_uses_format() {
        assert_eq!(format_timestamp("2026-06-15T12:00:00Z", "%Y"), "2026");
        assert_eq!(
            format_timestamp("2026-06-15T12:00:00.123456Z", "%Y-%m"),
            "2026-06"
        );
    }

    #[test]
    fn unparseable_timestamp_falls_back_to_raw() {
        assert_eq!(format_timestamp("yesterday", "%H:%M"), "yesterday");
        assert_eq!(format_timestamp("", "%H:%M"), "");
    }

    #[test]
    fn preview_is_flattened() {
        let op = Operation {
            id: "op_1".into(),
            timestamp: "2026-06-15T12:00:00Z".into(),
            kind: OperationKind::Paste,
            target_path: PathBuf::from("/tmp/a.txt"),
            backup_path: None,
            content_preview: "line one\nline\ttwo".into(),
        };
        assert_eq!(preview_line(&op), "line one line two");
    }

    #[test]
    fn file_label_is_the_name() {
        assert_eq!(file_label(Path::new("/work/dir/notes.txt")), "notes.txt");
        assert_eq!(file_label(Path::new("/")), "/");
    }
}

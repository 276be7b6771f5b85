//! Clipboard backed by the platform's command-line clipboard tools.

use crate::Clipboard;
use pacte_core::PacteError;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Override the read command, e.g. `PACTE_CLIPBOARD_GET="xsel -bo"`.
pub const GET_CMD_ENV: &str = "PACTE_CLIPBOARD_GET";
/// Override the write command (text is fed on stdin).
pub const SET_CMD_ENV: &str = "PACTE_CLIPBOARD_SET";

/// A pair of argv vectors: one that prints the clipboard, one that reads
/// new clipboard content from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    pub get: Vec<String>,
    pub set: Vec<String>,
}

impl Backend {
    fn new(get: &[&str], set: &[&str]) -> Self {
        Self {
            get: get.iter().map(|s| s.to_string()).collect(),
            set: set.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Candidate backends for this platform, most preferred first.
pub fn platform_backends() -> Vec<Backend> {
    if cfg!(target_os = "macos") {
        vec![Backend::new(&["pbpaste"], &["pbcopy"])]
    } else if cfg!(windows) {
        vec![Backend::new(
            &["powershell", "-NoProfile", "-Command", "Get-Clipboard -Raw"],
            &["clip"],
        )]
    } else {
        let mut backends = Vec::new();
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            backends.push(Backend::new(&["wl-paste", "--no-newline"], &["wl-copy"]));
        }
        backends.push(Backend::new(
            &["xclip", "-selection", "clipboard", "-o"],
            &["xclip", "-selection", "clipboard", "-i"],
        ));
        backends.push(Backend::new(
            &["xsel", "--clipboard", "--output"],
            &["xsel", "--clipboard", "--input"],
        ));
        backends
    }
}

fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{program}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

/// Clipboard reached through external tools (`pbcopy`, `wl-copy`, `xclip`, ...).
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    backend: Option<Backend>,
}

impl SystemClipboard {
    /// Pick the backend: environment overrides first, then the first
    /// platform tool found on `PATH`.
    pub fn detect() -> Self {
        let get = std::env::var(GET_CMD_ENV).ok().map(|s| split_command(&s));
        let set = std::env::var(SET_CMD_ENV).ok().map(|s| split_command(&s));
        if let (Some(get), Some(set)) = (get, set) {
            if !get.is_empty() && !set.is_empty() {
                return Self::with_backend(Backend { get, set });
            }
        }
        let backend = platform_backends()
            .into_iter()
            .find(|b| find_in_path(&b.get[0]).is_some() && find_in_path(&b.set[0]).is_some());
        tracing::debug!(?backend, "detected clipboard backend");
        Self { backend }
    }

    pub fn with_backend(backend: Backend) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    fn require_backend(&self) -> Result<&Backend, PacteError> {
        self.backend.as_ref().ok_or_else(|| {
            PacteError::ClipboardUnavailable(format!(
                "no clipboard tool found (install wl-clipboard, xclip or xsel, \
                 or set {GET_CMD_ENV} and {SET_CMD_ENV})"
            ))
        })
    }
}

/// Phrases clipboard tools print when the selection is simply empty.
const EMPTY_MARKERS: &[&str] = &["nothing is copied", "not available", "no selection"];

impl Clipboard for SystemClipboard {
    fn get_text(&self) -> Result<String, PacteError> {
        let backend = self.require_backend()?;
        let output = Command::new(&backend.get[0])
            .args(&backend.get[1..])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                PacteError::ClipboardUnavailable(format!("failed to run '{}': {e}", backend.get[0]))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let lowered = stderr.to_lowercase();
            if output.stdout.is_empty() && EMPTY_MARKERS.iter().any(|m| lowered.contains(m)) {
                return Err(PacteError::EmptyClipboard);
            }
            return Err(PacteError::ClipboardUnavailable(format!(
                "'{}' exited with {}: {stderr}",
                backend.get[0], output.status
            )));
        }

        let text = String::from_utf8(output.stdout).map_err(|_| {
            PacteError::ClipboardUnavailable("clipboard does not hold UTF-8 text".into())
        })?;
        if text.is_empty() {
            return Err(PacteError::EmptyClipboard);
        }
        Ok(text)
    }

    fn set_text(&self, text: &str) -> Result<(), PacteError> {
        let backend = self.require_backend()?;
        let unavailable = |e: std::io::Error| {
            PacteError::ClipboardUnavailable(format!("failed to run '{}': {e}", backend.set[0]))
        };
        let mut child = Command::new(&backend.set[0])
            .args(&backend.set[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(unavailable)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(unavailable)?;
        }
        let output = child.wait_with_output().map_err(unavailable)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(PacteError::ClipboardUnavailable(format!(
                "'{}' exited with {}: {stderr}",
                backend.set[0], output.status
            )));
        }
        Ok(())
    }
}

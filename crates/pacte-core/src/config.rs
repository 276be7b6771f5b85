use crate::error::PacteError;
use encoding_rs::Encoding;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Project file whose `[tool.pacte]` table can hold the config.
pub const PYPROJECT_FILE_NAME: &str = "pyproject.toml";

/// Config file names searched for, in priority order, in each directory.
/// A `pyproject.toml` ends the search even without a `[tool.pacte]` table.
pub const CONFIG_FILE_NAMES: &[&str] = &["pacte.toml", ".pacte.toml", PYPROJECT_FILE_NAME];

/// Application settings. Every field has a default, so an absent config
/// file (or an empty one) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of operations kept in history.
    pub max_history: usize,
    /// Characters of clipboard content kept as a preview.
    pub preview_length: usize,
    /// Back up an existing file before `paste` overwrites it.
    pub backup_on_paste: bool,
    /// Back up an existing file before `append` extends it.
    pub backup_on_append: bool,
    /// Encoding label (WHATWG names, e.g. `utf-8`, `shift_jis`) for file text.
    pub default_encoding: String,
    pub undo_tui: UndoTuiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_history: 50,
            preview_length: 50,
            backup_on_paste: true,
            backup_on_append: true,
            default_encoding: "utf-8".to_string(),
            undo_tui: UndoTuiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UndoTuiConfig {
    /// strftime-style format for the time column.
    pub datetime_format: String,
}

impl Default for UndoTuiConfig {
    fn default() -> Self {
        Self {
            datetime_format: "%H:%M:%S".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: PyProjectTools,
}

#[derive(Default, Deserialize)]
struct PyProjectTools {
    pacte: Option<Config>,
}

impl Config {
    /// Walk up from `start` and load the first config file found.
    /// Returns defaults when there is none.
    pub fn discover(start: &Path) -> Result<Self, PacteError> {
        match find_config_file(start) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific config file.
    pub fn load(path: &Path) -> Result<Self, PacteError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PacteError::Config(format!("cannot read {}: {e}", path.display())))?;
        let parsed = if path.file_name().is_some_and(|n| n == PYPROJECT_FILE_NAME) {
            Self::from_pyproject_str(&raw)
        } else {
            Self::from_toml_str(&raw)
        };
        let config = parsed
            .map_err(|e| PacteError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(raw).map_err(|e| format!("invalid TOML: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the `[tool.pacte]` table of a `pyproject.toml`. A missing table
    /// yields the defaults.
    pub fn from_pyproject_str(raw: &str) -> Result<Self, String> {
        let project: PyProject = toml::from_str(raw).map_err(|e| format!("invalid TOML: {e}"))?;
        let config = project.tool.pacte.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// The file-text encoding named by `default_encoding`.
    pub fn encoding(&self) -> &'static Encoding {
        Encoding::for_label(self.default_encoding.trim().as_bytes()).unwrap_or(encoding_rs::UTF_8)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_history == 0 {
            return Err("max_history must be at least 1".to_string());
        }
        if self.preview_length == 0 {
            return Err("preview_length must be at least 1".to_string());
        }
        if Encoding::for_label(self.default_encoding.trim().as_bytes()).is_none() {
            return Err(format!("unknown default_encoding: {:?}", self.default_encoding));
        }
        let has_error = chrono::format::StrftimeItems::new(&self.undo_tui.datetime_format)
            .any(|item| matches!(item, chrono::format::Item::Error));
        if has_error {
            return Err(format!(
                "undo_tui.datetime_format is not a valid strftime string: {:?}",
                self.undo_tui.datetime_format
            ));
        }
        Ok(())
    }
}

/// Walk up from `start` looking for a config file. Returns `None` if not found.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut cur = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = cur.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if !cur.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documentation() {
        let c = Config::default();
        assert_eq!(c.max_history, 50);
        assert_eq!(c.preview_length, 50);
        assert!(c.backup_on_paste);
        assert!(c.backup_on_append);
        assert_eq!(c.undo_tui.datetime_format, "%H:%M:%S");
        assert_eq!(c.encoding(), encoding_rs::UTF_8);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let c = Config::from_toml_str(
            "max_history = 10\nbackup_on_append = false\n[undo_tui]\ndatetime_format = \"%Y-%m-%d %H:%M\"\n",
        )
        .unwrap();
        assert_eq!(c.max_history, 10);
        assert!(!c.backup_on_append);
        assert!(c.backup_on_paste);
        assert_eq!(c.preview_length, 50);
        assert_eq!(c.undo_tui.datetime_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Config::from_toml_str("max_history = 0").is_err());
        assert!(Config::from_toml_str("max_history = -3").is_err());
        assert!(Config::from_toml_str("preview_length = 0").is_err());
        assert!(Config::from_toml_str("max_history = \"many\"").is_err());
        assert!(Config::from_toml_str("[undo_tui]\ndatetime_format = \"%Q\"").is_err());
        assert!(Config::from_toml_str("max_history = [").is_err());
        assert!(Config::from_toml_str("default_encoding = \"klingon\"").is_err());
    }

    #[test]
    fn discover_walks_up_to_parent() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("pacte.toml"), "max_history = 7\n").unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let c = Config::discover(&nested).unwrap();
        assert_eq!(c.max_history, 7);
    }

    #[test]
    fn discover_prefers_nearest_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("pacte.toml"), "max_history = 7\n").unwrap();
        let nested = tmp.path().join("inner");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join(".pacte.toml"), "max_history = 3\n").unwrap();

        assert_eq!(Config::discover(&nested).unwrap().max_history, 3);
    }

    #[test]
    fn encoding_label_resolves() {
        let c = Config::from_toml_str("default_encoding = \"Shift_JIS\"").unwrap();
        assert_eq!(c.encoding(), encoding_rs::SHIFT_JIS);
        let c = Config::from_toml_str("default_encoding = \"latin1\"").unwrap();
        assert_eq!(c.encoding(), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn pyproject_tool_table_is_read() {
        let c = Config::from_pyproject_str(
            "[project]\nname = \"demo\"\n\n[tool.black]\nline-length = 88\n\n\
             [tool.pacte]\nmax_history = 5\ndefault_encoding = \"utf-16le\"\n\n\
             [tool.pacte.undo_tui]\ndatetime_format = \"%d %H:%M\"\n",
        )
        .unwrap();
        assert_eq!(c.max_history, 5);
        assert_eq!(c.encoding(), encoding_rs::UTF_16LE);
        assert_eq!(c.undo_tui.datetime_format, "%d %H:%M");
        assert!(c.backup_on_paste);
    }

    #[test]
    fn pyproject_without_table_is_default() {
        assert_eq!(
            Config::from_pyproject_str("[project]\nname = \"demo\"\n").unwrap(),
            Config::default()
        );
        assert!(Config::from_pyproject_str("[tool.pacte]\nmax_history = 0\n").is_err());
    }

    #[test]
    fn discover_reads_pyproject_from_parent() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("pyproject.toml"),
            "[tool.pacte]\npreview_length = 12\n",
        )
        .unwrap();
        let nested = tmp.path().join("src").join("pkg");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover(&nested).unwrap().preview_length, 12);
    }

    #[test]
    fn nearest_pyproject_stops_the_walk() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("pacte.toml"), "max_history = 7\n").unwrap();
        let project = tmp.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("pyproject.toml"), "[project]\nname = \"x\"\n").unwrap();

        assert_eq!(Config::discover(&project).unwrap(), Config::default());
    }

    #[test]
    fn pacte_toml_beats_pyproject_in_same_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("pacte.toml"), "max_history = 7\n").unwrap();
        std::fs::write(tmp.path().join("pyproject.toml"), "[tool.pacte]\nmax_history = 9\n")
            .unwrap();
        assert_eq!(Config::discover(tmp.path()).unwrap().max_history, 7);
    }

    #[test]
    fn discover_reports_broken_file_as_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("pacte.toml"), "max_history = = 1").unwrap();
        let err = Config::discover(tmp.path()).unwrap_err();
        assert!(matches!(err, PacteError::Config(_)));
    }
}

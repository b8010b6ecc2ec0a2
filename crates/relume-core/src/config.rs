//! Application configuration management.
//!
//! This module provides configuration loading and the global verbose flag.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;

use crate::compositor::{DEFAULT_DASH_LENGTH, HIGHLIGHT_COLOR};

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["relume.yml", "relume.yaml"];

/// Loaded configuration together with its source path and any warnings
/// collected along the way.
pub struct AppConfigHandle {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl AppConfigHandle {
    fn with_config(config: AppConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Complete configuration file structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Image opened at startup. A configured path that fails to load is
    /// fatal; without one the user opens an image interactively.
    pub image_path: Option<PathBuf>,

    /// Run length of the drawn/skipped segments in selection outlines.
    pub dash_length: u32,

    /// RGB outline color for selected regions.
    pub highlight: [u8; 3],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            dash_length: DEFAULT_DASH_LENGTH,
            highlight: HIGHLIGHT_COLOR,
        }
    }
}

impl AppConfig {
    fn sanitize(mut self) -> Self {
        if self.dash_length == 0 {
            self.dash_length = DEFAULT_DASH_LENGTH;
        }
        self
    }
}

/// Load configuration from disk, optionally forcing a specific path.
///
/// Falls back to built-in defaults when no candidate parses; a missing
/// config is a warning, never an error.
pub fn load_app_config(custom_path: Option<&Path>) -> AppConfigHandle {
    let mut warnings = Vec::new();
    let candidates = get_config_candidates(custom_path);

    for candidate in candidates {
        if !candidate.exists() || !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    let sanitized = config.sanitize();
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return AppConfigHandle::with_config(sanitized, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No config found; using built-in defaults.".to_string());
    AppConfigHandle::with_config(AppConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("RELUME_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("relume").join(name));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.image_path.is_none());
        assert_eq!(config.dash_length, DEFAULT_DASH_LENGTH);
        assert_eq!(config.highlight, HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = "image_path: images/lenna.tif\ndash_length: 3\nhighlight: [255, 0, 0]\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.image_path.unwrap(), PathBuf::from("images/lenna.tif"));
        assert_eq!(config.dash_length, 3);
        assert_eq!(config.highlight, [255, 0, 0]);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let yaml = "dash_length: 8\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.image_path.is_none());
        assert_eq!(config.dash_length, 8);
        assert_eq!(config.highlight, HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_sanitize_rejects_zero_dash_length() {
        let config = AppConfig {
            dash_length: 0,
            ..Default::default()
        };
        assert_eq!(config.sanitize().dash_length, DEFAULT_DASH_LENGTH);
    }

    #[test]
    fn test_custom_path_is_first_candidate() {
        let custom = PathBuf::from("/tmp/relume-custom.yml");
        let candidates = get_config_candidates(Some(&custom));
        assert_eq!(candidates[0], custom);
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let handle = load_app_config(Some(Path::new("/nonexistent/relume.yml")));
        assert!(handle.source.is_none());
        assert_eq!(handle.config.dash_length, DEFAULT_DASH_LENGTH);
        assert!(!handle.warnings.is_empty());
    }
}

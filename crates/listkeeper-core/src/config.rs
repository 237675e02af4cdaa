use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_QUIET_PERIOD_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
    #[serde(default = "default_theme")]
    pub default_theme: String,
    #[serde(default = "default_visual_style")]
    pub default_visual_style: String,
    /// Upper bound on the size of the stored document, mimicking a
    /// browser-style storage quota. `None` means unlimited.
    #[serde(default)]
    pub max_document_bytes: Option<usize>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_quiet_period_ms() -> u64 {
    DEFAULT_QUIET_PERIOD_MS
}

fn default_theme() -> String {
    "ocean".to_string()
}

fn default_visual_style() -> String {
    "card".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            quiet_period_ms: default_quiet_period_ms(),
            default_theme: default_theme(),
            default_visual_style: default_visual_style(),
            max_document_bytes: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/listkeeper/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("listkeeper/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("listkeeper\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Read a config file, falling back to defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring invalid config at {}: {}", path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("listkeeper")))
            .unwrap_or_else(|| PathBuf::from(".listkeeper"))
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.quiet_period(), Duration::from_millis(500));
        assert_eq!(config.default_theme, "ocean");
        assert_eq!(config.default_visual_style, "card");
        assert!(config.max_document_bytes.is_none());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "quiet_period_ms = 250\nmax_document_bytes = 4096\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.quiet_period_ms, 250);
        assert_eq!(config.max_document_bytes, Some(4096));
        assert_eq!(config.default_theme, "ocean");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "quiet_period_ms = \"soon\"").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.quiet_period_ms, 500);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/tmp/lists")),
            ..Default::default()
        };
        assert_eq!(config.effective_data_dir(), PathBuf::from("/tmp/lists"));
    }
}

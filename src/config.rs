use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "STUDENT_PROFILE_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "student-profile.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("window size must be positive, got {0:?}")]
    WindowSize([f32; 2]),
}

/// Startup settings. Every field is optional in the JSON file.
///
/// ```json
/// {
///   "window_size": [1280, 860],
///   "font_path": "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
///   "data_file": "students.xlsx"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub window_size: [f32; 2],
    /// Font with CJK coverage; probed from system locations when unset.
    pub font_path: Option<PathBuf>,
    /// Sheet opened right after startup.
    pub data_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: [1280.0, 860.0],
            font_path: None,
            data_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let [w, h] = self.window_size;
        if !(w > 0.0 && h > 0.0) {
            return Err(ConfigError::WindowSize(self.window_size));
        }
        Ok(())
    }

    /// Config for this process: `$STUDENT_PROFILE_CONFIG`, else
    /// `./student-profile.json`, else defaults. A broken file is reported and
    /// ignored. `cli_file` (the first positional argument) wins over
    /// `data_file`.
    pub fn discover(cli_file: Option<PathBuf>) -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()));

        let mut config = match path {
            Some(path) => match Self::from_file(&path) {
                Ok(config) => {
                    log::info!("Using config {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("{e}; falling back to defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        };

        if cli_file.is_some() {
            config.data_file = cli_file;
        }
        config
    }
}

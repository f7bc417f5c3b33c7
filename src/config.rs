//! Runtime configuration.
//!
//! [`Config::default`] is always available. With the `config` feature enabled, a TOML
//! file can override any subset of the fields:
//!
//! ```toml
//! row_height = 1
//! palette = ["#4caf50", "#2196f3"]
//! query_color = "#ffffff"
//! accepted_extensions = ["log", "txt", "out"]
//! mouse_scroll_lines = 3
//! ```

use crate::error::{LogscopeError, Result};
use crate::source::validation::DEFAULT_EXTENSIONS;
use crate::source::{Palette, SourceColor, DEFAULT_PALETTE, QUERY_COLOR};

/// Lines scrolled by one mouse wheel tick.
pub const DEFAULT_MOUSE_SCROLL_LINES: u64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Height of one display row, in viewport units
    pub row_height: u64,
    pub palette: Vec<SourceColor>,
    pub query_color: SourceColor,
    /// Extensions accepted on import, compared case-insensitively
    pub accepted_extensions: Vec<String>,
    pub mouse_scroll_lines: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            row_height: 1,
            palette: DEFAULT_PALETTE.to_vec(),
            query_color: QUERY_COLOR,
            accepted_extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            mouse_scroll_lines: DEFAULT_MOUSE_SCROLL_LINES,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.row_height == 0 {
            return Err(LogscopeError::config("row_height must be positive"));
        }
        if self.palette.is_empty() {
            return Err(LogscopeError::config("palette must contain at least one color"));
        }
        if self.accepted_extensions.is_empty() {
            return Err(LogscopeError::config(
                "accepted_extensions must not be empty",
            ));
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.palette.clone())
    }
}

#[cfg(feature = "config")]
mod file {
    use super::Config;
    use crate::error::{LogscopeError, Result};
    use crate::source::SourceColor;
    use serde::Deserialize;
    use std::path::{Path, PathBuf};

    /// On-disk shape; every field is optional.
    #[derive(Debug, Default, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct ConfigFile {
        row_height: Option<u64>,
        palette: Option<Vec<String>>,
        query_color: Option<String>,
        accepted_extensions: Option<Vec<String>>,
        mouse_scroll_lines: Option<u64>,
    }

    impl Config {
        /// `<config_dir>/logscope/config.toml`, if the platform has a config dir.
        pub fn default_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("logscope").join("config.toml"))
        }

        /// Load from `path`; a missing file yields the defaults.
        pub fn load(path: &Path) -> Result<Self> {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    return Ok(Self::default())
                }
                Err(err) => {
                    return Err(LogscopeError::file_error(
                        format!("Cannot read config {}", path.display()),
                        err,
                    ))
                }
            };
            Self::from_toml(&text)
        }

        pub fn from_toml(text: &str) -> Result<Self> {
            let file: ConfigFile =
                toml::from_str(text).map_err(|err| LogscopeError::config(err.to_string()))?;

            let mut config = Self::default();
            if let Some(row_height) = file.row_height {
                config.row_height = row_height;
            }
            if let Some(palette) = file.palette {
                config.palette = palette
                    .iter()
                    .map(|hex| hex.parse::<SourceColor>())
                    .collect::<Result<_>>()?;
            }
            if let Some(query_color) = file.query_color {
                config.query_color = query_color.parse()?;
            }
            if let Some(extensions) = file.accepted_extensions {
                config.accepted_extensions = extensions
                    .into_iter()
                    .map(|ext| ext.trim_start_matches('.').to_string())
                    .collect();
            }
            if let Some(lines) = file.mouse_scroll_lines {
                config.mouse_scroll_lines = lines;
            }

            config.validate()?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.accepted_extensions, ["log", "txt"]);
        assert_eq!(config.palette().len(), 8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            row_height: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LogscopeError::ConfigError { .. })
        ));

        let config = Config {
            palette: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_overrides() {
        let config = Config::from_toml(
            r##"
            row_height = 2
            palette = ["#000000", "ffffff"]
            accepted_extensions = [".out"]
            "##,
        )
        .unwrap();

        assert_eq!(config.row_height, 2);
        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.accepted_extensions, ["out"]);
        assert_eq!(config.query_color, QUERY_COLOR);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_rejects_bad_color() {
        assert!(Config::from_toml(r#"palette = ["red"]"#).is_err());
        assert!(Config::from_toml("row_height = 0").is_err());
        assert!(Config::from_toml("unknown = 1").is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}

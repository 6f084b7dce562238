use foodstock_core::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding auth.json, foods.json and theme.json
    pub data_dir: ConfigValue<PathBuf>,
    /// Items per page in `food list`
    pub page_size: ConfigValue<usize>,
    /// Stand-in for the OS color-scheme signal when the theme is "system"
    pub prefers_dark: ConfigValue<bool>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    page_size: Option<usize>,
    prefers_dark: Option<bool>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut page_size = ConfigValue::new(DEFAULT_PAGE_SIZE, ConfigSource::Default);
        let mut prefers_dark = ConfigValue::new(false, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(size) = file_config.page_size {
                page_size = ConfigValue::new(size, ConfigSource::File);
            }
            if let Some(dark) = file_config.prefers_dark {
                prefers_dark = ConfigValue::new(dark, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("FOODSTOCK_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(size) = std::env::var("FOODSTOCK_PAGE_SIZE") {
            let size = size
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("FOODSTOCK_PAGE_SIZE", size))?;
            page_size = ConfigValue::new(size, ConfigSource::Environment);
        }
        if let Ok(dark) = std::env::var("FOODSTOCK_PREFERS_DARK") {
            let dark = parse_bool(&dark)
                .ok_or_else(|| ConfigError::InvalidEnv("FOODSTOCK_PREFERS_DARK", dark))?;
            prefers_dark = ConfigValue::new(dark, ConfigSource::Environment);
        }

        if page_size.value == 0 {
            return Err(ConfigError::InvalidPageSize);
        }

        Ok(Self {
            data_dir,
            page_size,
            prefers_dark,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/foodstock/
    /// - macOS: ~/Library/Application Support/foodstock/
    /// - Windows: %APPDATA%/foodstock/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("foodstock")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/foodstock/
    /// - macOS: ~/Library/Application Support/foodstock/
    /// - Windows: %APPDATA%/foodstock/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("foodstock")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidEnv(&'static str, String),
    InvalidPageSize,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidEnv(var, value) => {
                write!(f, "Invalid value '{}' for {}", value, var)
            }
            ConfigError::InvalidPageSize => write!(f, "page_size must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.data_dir.value.ends_with("foodstock"));
        assert_eq!(config.data_dir.source, ConfigSource::Default);
        assert_eq!(config.page_size.value, 6);
        assert_eq!(config.page_size.source, ConfigSource::Default);
        assert!(!config.prefers_dark.value);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /custom/foodstock").unwrap();
        writeln!(file, "page_size: 10").unwrap();
        writeln!(file, "prefers_dark: true").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/custom/foodstock"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
        assert_eq!(config.page_size.value, 10);
        assert!(config.prefers_dark.value);
        assert_eq!(config.prefers_dark.source, ConfigSource::File);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_data_dir_resolves_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: data").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("data"));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "page_size: 4").unwrap();

        std::env::set_var("FOODSTOCK_PAGE_SIZE", "12");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.page_size.value, 12);
        assert_eq!(config.page_size.source, ConfigSource::Environment);

        std::env::remove_var("FOODSTOCK_PAGE_SIZE");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "page_size: 0").unwrap();

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}

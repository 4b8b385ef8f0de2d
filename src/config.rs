use barapp_core::{IdScheme, LoadPolicy};
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
    /// Directory holding one JSON file per collection
    pub data_dir: ConfigValue<PathBuf>,
    /// How ids are generated for new records
    pub id_scheme: ConfigValue<IdScheme>,
    /// What to do with unreadable collections
    pub load_policy: ConfigValue<LoadPolicy>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    id_scheme: Option<IdScheme>,
    load_policy: Option<LoadPolicy>,
}

pub const ENV_DATA_DIR: &str = "BARAPP_DATA_DIR";
pub const ENV_ID_SCHEME: &str = "BARAPP_ID_SCHEME";
pub const ENV_LOAD_POLICY: &str = "BARAPP_LOAD_POLICY";

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::load`], reading environment variables through `env`.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut id_scheme = ConfigValue::new(IdScheme::default(), ConfigSource::Default);
        let mut load_policy = ConfigValue::new(LoadPolicy::default(), ConfigSource::Default);
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
            if let Some(scheme) = file_config.id_scheme {
                id_scheme = ConfigValue::new(scheme, ConfigSource::File);
            }
            if let Some(policy) = file_config.load_policy {
                load_policy = ConfigValue::new(policy, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Some(dir) = env(ENV_DATA_DIR) {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Some(scheme) = env(ENV_ID_SCHEME) {
            let scheme = scheme
                .parse()
                .map_err(|e| ConfigError::EnvError(ENV_ID_SCHEME, e))?;
            id_scheme = ConfigValue::new(scheme, ConfigSource::Environment);
        }
        if let Some(policy) = env(ENV_LOAD_POLICY) {
            let policy = policy
                .parse()
                .map_err(|e| ConfigError::EnvError(ENV_LOAD_POLICY, e))?;
            load_policy = ConfigValue::new(policy, ConfigSource::Environment);
        }

        Ok(Self {
            data_dir,
            id_scheme,
            load_policy,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/barapp/
    /// - macOS: ~/Library/Application Support/barapp/
    /// - Windows: %APPDATA%/barapp/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("barapp")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/barapp/
    /// - macOS: ~/Library/Application Support/barapp/
    /// - Windows: %APPDATA%/barapp/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("barapp")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    EnvError(&'static str, String),
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
            ConfigError::EnvError(var, e) => {
                write!(f, "Invalid value in {}: {}", var, e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_no_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load_with_env(Some(config_path), no_env).unwrap();
        assert!(config.data_dir.value.ends_with("barapp"));
        assert_eq!(config.data_dir.source, ConfigSource::Default);
        assert_eq!(config.id_scheme.value, IdScheme::Timestamp);
        assert_eq!(config.load_policy.value, LoadPolicy::Strict);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /custom/bar").unwrap();
        writeln!(file, "id_scheme: uuid").unwrap();
        writeln!(file, "load_policy: lenient").unwrap();

        let config = Config::load_with_env(Some(config_path.clone()), no_env).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/custom/bar"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
        assert_eq!(config.id_scheme.value, IdScheme::Uuid);
        assert_eq!(config.load_policy.value, LoadPolicy::Lenient);
        assert_eq!(config.load_policy.source, ConfigSource::File);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_data_dir_resolves_against_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: data").unwrap();

        let config = Config::load_with_env(Some(config_path), no_env).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /from/file").unwrap();

        let env = |name: &str| match name {
            ENV_DATA_DIR => Some("/from/env".to_string()),
            ENV_ID_SCHEME => Some("uuid".to_string()),
            _ => None,
        };

        let config = Config::load_with_env(Some(config_path), env).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/from/env"));
        assert_eq!(config.data_dir.source, ConfigSource::Environment);
        assert_eq!(config.id_scheme.value, IdScheme::Uuid);
        assert_eq!(config.id_scheme.source, ConfigSource::Environment);
        assert_eq!(config.load_policy.source, ConfigSource::Default);
    }

    #[test]
    fn test_invalid_env_value_error() {
        let temp_dir = tempdir().unwrap();
        let env = |name: &str| (name == ENV_LOAD_POLICY).then(|| "silent".to_string());

        let err = Config::load_with_env(Some(temp_dir.path().join("none.yaml")), env)
            .unwrap_err();
        assert!(err.to_string().contains(ENV_LOAD_POLICY));
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load_with_env(Some(config_path), no_env);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_id_scheme_in_file_is_parse_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "id_scheme: random").unwrap();

        let err = Config::load_with_env(Some(config_path), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_, _)));
    }
}

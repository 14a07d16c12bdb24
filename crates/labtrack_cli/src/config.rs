//! Layered configuration for the `labtrack` binary.
//!
//! Sources, highest priority first:
//! 1. Command-line flags (applied by the caller after loading)
//! 2. Environment variables (`LABTRACK_*`, `__` separates sections)
//! 3. TOML file (`--config <path>`, else `./labtrack.toml` when present)
//! 4. Built-in defaults
//!
//! `LABTRACK_SERVER__BIND=0.0.0.0:8080` maps to `server.bind`.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use labtrack_core::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "labtrack.toml";
const ENV_PREFIX: &str = "LABTRACK_";

/// Configuration loading failures.
#[derive(Debug)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    Figment(figment::Error),
    /// A configuration value is unusable.
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Figment(err) => write!(f, "configuration error: {err}"),
            Self::InvalidValue { field, reason } => {
                write!(f, "invalid configuration value for `{field}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Figment(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Figment(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address, `host:port`.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite file; created and migrated on first open.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("labtrack.sqlite3"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`.
    pub level: String,
    /// Rolling log directory; relative paths resolve against the working
    /// directory. Defaults to `./log`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from defaults, file and environment.
    ///
    /// # Errors
    /// - `InvalidValue` when an explicit `config_file` does not exist.
    /// - `Figment` when a source cannot be parsed into [`AppConfig`].
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ConfigError::InvalidValue {
                    field: "config",
                    reason: format!("file `{}` does not exist", path.display()),
                });
            }
        }
        Ok(Self::figment(config_file).extract()?)
    }

    /// Builds the provider chain without extracting it.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = config_file.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Absolute log directory derived from `logging.dir`.
    pub fn resolved_log_dir(&self) -> Result<PathBuf, ConfigError> {
        let dir = self
            .logging
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("log"));
        if dir.is_absolute() {
            return Ok(dir);
        }

        let cwd = std::env::current_dir().map_err(|err| ConfigError::InvalidValue {
            field: "logging.dir",
            reason: format!("cannot resolve relative path: {err}"),
        })?;
        Ok(cwd.join(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE};
    use figment::Jail;
    use std::path::{Path, PathBuf};

    #[test]
    fn defaults_are_correct() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.database.path, PathBuf::from("labtrack.sqlite3"));
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn file_then_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [server]
                bind = "0.0.0.0:8080"

                [database]
                path = "/var/lib/labtrack/data.sqlite3"
                "#,
            )?;
            jail.set_env("LABTRACK_SERVER__BIND", "127.0.0.1:9999");
            jail.set_env("LABTRACK_LOGGING__LEVEL", "warn");

            let config: AppConfig = AppConfig::figment(None).extract()?;
            assert_eq!(config.server.bind, "127.0.0.1:9999");
            assert_eq!(
                config.database.path,
                PathBuf::from("/var/lib/labtrack/data.sqlite3")
            );
            assert_eq!(config.logging.level, "warn");
            Ok(())
        });
    }

    #[test]
    fn explicit_config_file_is_used() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[logging]\ndir = \"/tmp/labtrack-logs\"\n")?;

            let config: AppConfig = AppConfig::figment(Some(Path::new("custom.toml"))).extract()?;
            assert_eq!(config.logging.dir, Some(PathBuf::from("/tmp/labtrack-logs")));
            assert_eq!(config.server.bind, "127.0.0.1:3000");
            Ok(())
        });
    }

    #[test]
    fn missing_explicit_config_file_is_rejected() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "config", .. }));
    }

    #[test]
    fn relative_log_dir_resolves_to_absolute() {
        let config = AppConfig::default();
        let dir = config.resolved_log_dir().expect("cwd should resolve");
        assert!(dir.is_absolute());
        assert!(dir.ends_with("log"));
    }
}

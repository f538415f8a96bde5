//! Runtime configuration.
//!
//! Values come from built-in defaults, then an optional YAML file (named by
//! `TASKTRAIL_CONFIG_FILE`), then `TASKTRAIL_*` environment variables. Every
//! section has defaults, so an empty environment yields a usable
//! configuration apart from the database URL.

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Prefix shared by every configuration variable.
pub const ENV_PREFIX: &str = "TASKTRAIL_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TasktrailConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Listing defaults.
    pub pagination: PaginationConfig,
    /// Report limits.
    pub reports: ReportConfig,
    /// Logging output.
    pub log: LogConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 8,
        }
    }
}

/// Listing defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the caller supplies none.
    pub default_limit: u32,
    /// Largest page size a caller may request.
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// Report limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Longest inclusive burndown range, in days.
    pub max_burndown_days: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_burndown_days: 366,
        }
    }
}

/// Logging output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "tasktrail=info".to_owned(),
            json: false,
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable held a value that does not parse.
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
        /// Description of the accepted form.
        expected: &'static str,
    },
    /// A limit was set to zero.
    #[error("{key} must be greater than zero")]
    ZeroLimit {
        /// Variable name.
        key: String,
    },
    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {message}")]
    Read {
        /// File path.
        path: String,
        /// Underlying I/O error.
        message: String,
    },
    /// The configuration file is not valid YAML for this schema.
    #[error("invalid config file: {0}")]
    Parse(String),
}

impl TasktrailConfig {
    /// Loads configuration from the optional file named by
    /// `TASKTRAIL_CONFIG_FILE` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file or a variable is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(format!("{ENV_PREFIX}CONFIG_FILE")) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Reads a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`], or
    /// [`ConfigError::ZeroLimit`] when the file sets a limit to zero.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_yaml(&raw)
    }

    /// Parses YAML configuration; omitted keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML or
    /// [`ConfigError::ZeroLimit`] when a limit is zero.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads defaults overridden through an arbitrary key lookup.
    ///
    /// Keys are the full variable names, e.g. `TASKTRAIL_DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_overrides(lookup)
    }

    /// Applies `TASKTRAIL_*` overrides on top of this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is present but invalid.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str| {
            let key = format!("{ENV_PREFIX}{suffix}");
            lookup(&key).map(|value| (key, value))
        };

        if let Some((_, url)) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some((key, raw)) = get("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_positive(&key, &raw)?;
        }
        if let Some((key, raw)) = get("PAGINATION_DEFAULT_LIMIT") {
            self.pagination.default_limit = parse_positive(&key, &raw)?;
        }
        if let Some((key, raw)) = get("PAGINATION_MAX_LIMIT") {
            self.pagination.max_limit = parse_positive(&key, &raw)?;
        }
        if let Some((key, raw)) = get("REPORTS_MAX_BURNDOWN_DAYS") {
            self.reports.max_burndown_days = parse_positive(&key, &raw)?;
        }
        if let Some((_, filter)) = get("LOG_FILTER") {
            self.log.filter = filter;
        }
        if let Some((key, raw)) = get("LOG_JSON") {
            self.log.json = parse_flag(&key, &raw)?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("database.max_connections", self.database.max_connections),
            ("pagination.default_limit", self.pagination.default_limit),
            ("pagination.max_limit", self.pagination.max_limit),
            ("reports.max_burndown_days", self.reports.max_burndown_days),
        ];
        match limits.iter().find(|(_, value)| *value == 0) {
            Some((key, _)) => Err(ConfigError::ZeroLimit {
                key: (*key).to_owned(),
            }),
            None => Ok(()),
        }
    }
}

fn parse_positive<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_owned(),
            value: raw.to_owned(),
            expected: "a positive integer",
        })?;
    if value == T::default() {
        return Err(ConfigError::ZeroLimit {
            key: key.to_owned(),
        });
    }
    Ok(value)
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_owned(),
            value: raw.to_owned(),
            expected: "a boolean",
        }),
    }
}

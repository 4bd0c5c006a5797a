//! Environment-driven server configuration.
//!
//! Variables (all optional):
//! - `VIATABLOID_ADDR`: listen address, default `0.0.0.0:8080`.
//! - `VIATABLOID_DB_PATH`: SQLite file, or `:memory:`; default `viatabloid.sqlite3`.
//! - `VIATABLOID_LOG_LEVEL`: `trace|debug|info|warn|error`; default per build mode.
//! - `VIATABLOID_LOG_DIR`: log directory, resolved against the working directory;
//!   default `logs`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

pub const ADDR_VAR: &str = "VIATABLOID_ADDR";
pub const DB_PATH_VAR: &str = "VIATABLOID_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "VIATABLOID_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "VIATABLOID_LOG_DIR";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "viatabloid.sqlite3";
const DEFAULT_LOG_DIR: &str = "logs";
const IN_MEMORY_DB: &str = ":memory:";

/// Where the story table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub db: DbLocation,
    pub log_level: String,
    /// Always absolute.
    pub log_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidAddr {
        value: String,
        source: AddrParseError,
    },
    EmptyValue(&'static str),
    WorkingDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddr { value, source } => {
                write!(f, "invalid {ADDR_VAR} `{value}`: {source}")
            }
            Self::EmptyValue(var) => write!(f, "{var} is set but empty"),
            Self::WorkingDir(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidAddr { source, .. } => Some(source),
            Self::WorkingDir(err) => Some(err),
            Self::EmptyValue(_) => None,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDir)?;
        Self::from_lookup(|name| std::env::var(name).ok(), &cwd)
    }

    /// Builds configuration from an arbitrary variable source.
    ///
    /// `cwd` anchors a relative log directory.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let read = |name: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(name) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(name)),
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };

        let addr_text = read(ADDR_VAR)?.unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_text
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr_text.clone(),
                source,
            })?;

        let db = match read(DB_PATH_VAR)?.as_deref() {
            Some(IN_MEMORY_DB) => DbLocation::Memory,
            Some(path) => DbLocation::File(PathBuf::from(path)),
            None => DbLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
        };

        let log_level = read(LOG_LEVEL_VAR)?
            .unwrap_or_else(|| viatabloid_core::default_log_level().to_string());
        let log_dir = cwd.join(read(LOG_DIR_VAR)?.unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()));

        Ok(Self {
            addr,
            db,
            log_level,
            log_dir,
        })
    }
}

//! # Register Configuration
//!
//! Built once at startup and passed down; nothing reads the environment
//! after this point.
//!
//! ## Load Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. RegisterConfig::default()                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. TOML file, first of:                                               │
//! │       • explicit path argument                                         │
//! │       • $SALETRACK_CONFIG                                              │
//! │       • <platform config dir>/saletrack.toml                           │
//! │     (missing file is fine; unreadable/invalid file is an error)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Environment overrides                                              │
//! │       SALETRACK_DB_PATH, SALETRACK_ALLOW_DECIMAL,                      │
//! │       SALETRACK_RECENT_LIMIT, SALETRACK_MYSQL,                         │
//! │       SALETRACK_MYSQL_TIMEOUT_SECS                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! database_path = "/var/lib/saletrack/saletrack.db"
//! allow_decimal_quantity = false
//! recent_sales_limit = 100
//!
//! [mirror]
//! connection = "Server=central;Database=pos;User Id=till;Password=secret"
//! timeout_secs = 5
//! ```

use directories::ProjectDirs;
use saletrack_core::DEFAULT_RECENT_SALES_LIMIT;
use saletrack_mirror::MirrorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{RegisterError, RegisterResult};

pub const CONFIG_PATH_ENV: &str = "SALETRACK_CONFIG";
pub const DB_PATH_ENV: &str = "SALETRACK_DB_PATH";
pub const ALLOW_DECIMAL_ENV: &str = "SALETRACK_ALLOW_DECIMAL";
pub const RECENT_LIMIT_ENV: &str = "SALETRACK_RECENT_LIMIT";

const CONFIG_FILE_NAME: &str = "saletrack.toml";
const DATABASE_FILE_NAME: &str = "saletrack.db";

/// Register settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    /// SQLite file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Initial state of the "decimal quantity" toggle for each transaction.
    pub allow_decimal_quantity: bool,

    /// How many rows the recent-sales listing shows.
    pub recent_sales_limit: u32,

    /// Optional remote mirror.
    pub mirror: MirrorConfig,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            allow_decimal_quantity: false,
            recent_sales_limit: DEFAULT_RECENT_SALES_LIMIT,
            mirror: MirrorConfig::default(),
        }
    }
}

impl RegisterConfig {
    /// Loads configuration: defaults, then file, then environment.
    pub fn load(config_path: Option<PathBuf>) -> RegisterResult<Self> {
        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading register config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> RegisterResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RegisterError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> RegisterResult<Self> {
        toml::from_str(contents).map_err(|e| RegisterError::Config(e.to_string()))
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary lookup; unparseable values are
    /// logged and ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(DB_PATH_ENV) {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup(ALLOW_DECIMAL_ENV) {
            match parse_flag(&flag) {
                Some(allow) => self.allow_decimal_quantity = allow,
                None => warn!(value = %flag, "Ignoring invalid {}", ALLOW_DECIMAL_ENV),
            }
        }

        if let Some(limit) = lookup(RECENT_LIMIT_ENV) {
            match limit.trim().parse::<u32>() {
                Ok(limit) => self.recent_sales_limit = limit,
                Err(_) => warn!(value = %limit, "Ignoring invalid {}", RECENT_LIMIT_ENV),
            }
        }

        self.mirror.apply_overrides_from(&lookup);
    }

    /// The database file to open, creating its parent directory if needed.
    pub fn resolve_database_path(&self) -> RegisterResult<PathBuf> {
        let path = match &self.database_path {
            Some(path) => path.clone(),
            None => Self::default_data_dir()
                .ok_or_else(|| {
                    RegisterError::Config("could not determine a data directory".to_string())
                })?
                .join(DATABASE_FILE_NAME),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| RegisterError::Config(format!("{}: {e}", parent.display())))?;
        }

        Ok(path)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "saletrack", "register")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn default_data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

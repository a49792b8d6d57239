use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "sheet-import.toml";
pub const ENV_PREFIX: &str = "SHEET_IMPORT_";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// tracing env-filter directive, overridden by RUST_LOG
    #[validate(length(min = 1))]
    pub log_filter: String,

    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    /// Browser origins allowed to call the API; none means same-origin only
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImportConfig {
    /// CSV delimiter; detected from content when unset
    #[validate(custom(function = "validate_delimiter"))]
    pub delimiter: Option<char>,

    pub trim_values: bool,

    /// Worksheet read from workbooks
    pub sheet_index: usize,

    /// Directory the HTTP file import may read from; file import over HTTP
    /// is refused when unset. The CLI reads any path it is given.
    pub root_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            server: ServerConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim_values: true,
            sheet_index: 0,
            root_dir: None,
        }
    }
}

impl ImportConfig {
    pub fn delimiter_byte(&self) -> Option<u8> {
        self.delimiter.filter(char::is_ascii).map(|c| c as u8)
    }
}

// Tab or ASCII punctuation other than the quote character. Line breaks and
// spaces would split records or values apart.
fn validate_delimiter(delimiter: &char) -> std::result::Result<(), ValidationError> {
    if *delimiter == '\t' || (delimiter.is_ascii_punctuation() && *delimiter != '"') {
        Ok(())
    } else {
        Err(ValidationError::new("delimiter_must_be_ascii_punctuation"))
    }
}

/// Command line values for the `normalize` command; `None`/`false` keeps
/// the loaded setting.
#[derive(Debug, Clone, Default)]
pub struct ImportOverrides {
    pub delimiter: Option<char>,
    pub sheet_index: Option<usize>,
    pub no_trim: bool,
}

impl AppConfig {
    pub fn apply_import_overrides(&mut self, overrides: ImportOverrides) -> Result<()> {
        if overrides.delimiter.is_some() {
            self.import.delimiter = overrides.delimiter;
        }
        if let Some(sheet_index) = overrides.sheet_index {
            self.import.sheet_index = sheet_index;
        }
        if overrides.no_trim {
            self.import.trim_values = false;
        }
        self.check()
    }

    pub fn apply_server_overrides(
        &mut self,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<()> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self.check()
    }

    fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid config: {}", e)))
    }
}

/// Defaults, then the TOML file, then `SHEET_IMPORT_*` variables
/// (`__` separates nested keys, e.g. `SHEET_IMPORT_SERVER__PORT`).
pub fn figment(config_path: Option<&Path>) -> Figment {
    let toml = match config_path {
        Some(path) => Toml::file(path),
        None => Toml::file(DEFAULT_CONFIG_FILE),
    };
    Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(toml)
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let _ = dotenvy::dotenv();
    extract(figment(config_path))
}

pub fn extract(figment: Figment) -> Result<AppConfig> {
    let config: AppConfig = figment
        .extract()
        .map_err(|e| AppError::ValidationError(format!("Failed to load config: {}", e)))?;
    config.check()?;
    Ok(config)
}

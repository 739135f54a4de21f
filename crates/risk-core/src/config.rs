// Configuration loading and parsing (config/risk.toml).

use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "https://dough.collegefootballrisk.com/api";

/// Territories that never appear in an attack set, whatever the ownership.
pub const DEFAULT_EXCLUDED_TERRITORIES: [u32; 2] = [249, 186];

/// Highest day the dashboard shows or queries.
pub const MAX_DAY: u32 = 9_999;

const CONFIG_FILE: &str = "risk.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub moves: MovesConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovesConfig {
    /// Map-specific territory ids removed from every attack set.
    #[serde(default = "default_excluded_territories")]
    pub excluded_territories: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ViewConfig {
    /// Day shown when the dashboard starts.
    #[serde(default = "default_day")]
    pub default_day: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_excluded_territories() -> Vec<u32> {
    DEFAULT_EXCLUDED_TERRITORIES.to_vec()
}

fn default_day() -> u32 {
    1
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MovesConfig {
    fn default() -> Self {
        MovesConfig {
            excluded_territories: default_excluded_territories(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            default_day: default_day(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse a config from TOML text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    while config.api.base_url.ends_with('/') {
        config.api.base_url.pop();
    }

    validate(&config)?;
    Ok(config)
}

/// Load and validate `config/risk.toml` relative to `base_dir`.
///
/// This is the lower-level primitive that does not auto-copy defaults.
/// Prefer `load_config()`, which handles default initialization.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Seed `config/` with every `*.toml` file shipped in `defaults/` that the
/// user does not already have. Returns the files that were written.
///
/// Without a `defaults/` directory nothing is written and `config/` is left
/// alone; `load_config` then runs on the built-in defaults.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let Ok(entries) = std::fs::read_dir(base_dir.join("defaults")) else {
        return Ok(Vec::new());
    };
    let config_dir = base_dir.join("config");

    let mut copied = Vec::new();
    for source in entries.filter_map(Result::ok).map(|e| e.path()) {
        if !is_shipped_default(&source) {
            continue;
        }
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = config_dir.join(name);
        if copy_if_absent(&source, &target)? {
            copied.push(target);
        }
    }
    Ok(copied)
}

/// Load config relative to the current working directory.
///
/// Missing files are seeded from `defaults/` first. When that leaves no
/// `config/risk.toml` either, the built-in defaults are used.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    if !cwd.join("config").join(CONFIG_FILE).exists() {
        return Ok(Config::default());
    }
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Only TOML files are seeded; `risk.toml.example` and friends stay behind.
fn is_shipped_default(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "toml")
}

/// Copy `source` to `target` unless `target` already exists. Returns whether
/// a copy was made. `create_new` keeps a concurrent user edit intact.
fn copy_if_absent(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let content = std::fs::read(source).map_err(|e| copy_error("read", source, e))?;
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| copy_error("create", dir, e))?;
    }

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(copy_error("create", target, e)),
    };
    file.write_all(&content)
        .map_err(|e| copy_error("write", target, e))?;
    Ok(true)
}

fn copy_error(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::DefaultsCopyError {
        message: format!("failed to {action} {}: {e}", path.display()),
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = &config.api.base_url;
    if url.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must start with http:// or https://, got {url}"),
        });
    }
    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }
    if !(1..=MAX_DAY).contains(&config.view.default_day) {
        return Err(ConfigError::ValidationError {
            field: "view.default_day".into(),
            message: format!(
                "must be between 1 and {MAX_DAY}, got {}",
                config.view.default_day
            ),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! # Configuration
//!
//! A single JSON object with the filename templates, the conversion command,
//! and the output directory.
//!
//! The file lives at `config.json` in the working directory unless `--config`
//! points elsewhere. If it's missing on first run, the defaults are written out
//! so users can discover every option. A malformed file is fatal.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_TEXT_FILENAME_FORMAT: &str = "{name}_Cover_Letter.txt";
pub const DEFAULT_PDF_FILENAME_FORMAT: &str = "{name}_Cover_Letter.pdf";
pub const DEFAULT_CONVERSION_SCRIPT: &str = "./scripts/convert_to_pdf.sh";
pub const DEFAULT_STYLE_TEMPLATE: &str = "./templates/style.tex";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "./documents";
pub const DEFAULT_CONVERSION_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Config Struct (every key optional in the file)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub text_filename_format: String,
    pub pdf_filename_format: String,
    pub conversion_script: PathBuf,
    pub style_template: PathBuf,
    pub output_directory: PathBuf,
    pub conversion_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            text_filename_format: DEFAULT_TEXT_FILENAME_FORMAT.to_string(),
            pdf_filename_format: DEFAULT_PDF_FILENAME_FORMAT.to_string(),
            conversion_script: PathBuf::from(DEFAULT_CONVERSION_SCRIPT),
            style_template: PathBuf::from(DEFAULT_STYLE_TEMPLATE),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            conversion_timeout_secs: DEFAULT_CONVERSION_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Hard deadline for one run of the conversion script.
    pub fn conversion_timeout(&self) -> Duration {
        Duration::from_secs(self.conversion_timeout_secs)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Load the config at `path`, creating it with defaults if it doesn't exist.
///
/// Returns `ConfigError::Parse` for malformed JSON; the caller treats that
/// as fatal.
pub fn load_or_init(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, writing defaults to {}", path.display());
        let config = AppConfig::default();
        write_default_config(path, &config);
        return Ok(config);
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Writes the default config as pretty JSON. Failure here only costs the
/// user a discoverable file, so it is logged and ignored.
fn write_default_config(path: &Path, config: &AppConfig) {
    let json = match serde_json::to_string_pretty(config) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize default config: {}", e);
            return;
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create config directory: {}", e);
                return;
            }
        }
    }
    if let Err(e) = fs::write(path, json) {
        warn!("Failed to write default config: {}", e);
    }
}

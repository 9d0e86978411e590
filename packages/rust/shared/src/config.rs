//! Application configuration for the job carousel feed.
//!
//! User config lives at `~/.jobcarousel/jobcarousel.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JobCarouselError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "jobcarousel.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".jobcarousel";

/// Published CSV export of the job sheet.
pub const DEFAULT_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQqNb6WO02fmrX_rYdDar2WegsyyfldBXkkW0-CSpkYvOgh414NRooX22Ai79fNmEnrHu7GRWKXtiAN/pub?output=csv";

/// Editable sheet, opened by the "view all jobs" action.
pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1E9Uu2I9cUGQjXqJ1hFX2LShOArmgQiPhMMECaj7BYz0/edit";

// ---------------------------------------------------------------------------
// Config structs (matching jobcarousel.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the CSV export comes from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Row scanning, filtering and ranking limits.
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Presentation defaults.
    #[serde(default)]
    pub carousel: CarouselConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Published CSV export URL.
    #[serde(default = "default_csv_url")]
    pub csv_url: String,

    /// Human-facing sheet URL for the full job list.
    #[serde(default = "default_sheet_url")]
    pub sheet_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bodies shorter than this are treated as an unusable source.
    #[serde(default = "default_min_body_bytes")]
    pub min_body_bytes: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            csv_url: default_csv_url(),
            sheet_url: default_sheet_url(),
            timeout_secs: default_timeout_secs(),
            min_body_bytes: default_min_body_bytes(),
        }
    }
}

fn default_csv_url() -> String {
    DEFAULT_CSV_URL.into()
}
fn default_sheet_url() -> String {
    DEFAULT_SHEET_URL.into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_min_body_bytes() -> usize {
    100
}

/// What to do with a posting whose date cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UndatedPolicy {
    /// Count it as posted right now (always inside the window).
    #[default]
    TreatAsNow,
    /// Drop it from the feed.
    Exclude,
}

/// `[ingest]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum number of data lines looked at per run.
    #[serde(default = "default_max_rows_scanned")]
    pub max_rows_scanned: usize,

    /// Rows with fewer cells than this are skipped.
    #[serde(default = "default_min_row_width")]
    pub min_row_width: usize,

    /// Maximum number of jobs in the final feed.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Trailing recency window in days.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Descriptions longer than this are cut and get an ellipsis.
    #[serde(default = "default_description_max_chars")]
    pub description_max_chars: usize,

    /// Handling of unparseable posted dates.
    #[serde(default)]
    pub undated: UndatedPolicy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_rows_scanned: default_max_rows_scanned(),
            min_row_width: default_min_row_width(),
            max_results: default_max_results(),
            window_days: default_window_days(),
            description_max_chars: default_description_max_chars(),
            undated: UndatedPolicy::default(),
        }
    }
}

fn default_max_rows_scanned() -> usize {
    100
}
fn default_min_row_width() -> usize {
    2
}
fn default_max_results() -> usize {
    20
}
fn default_window_days() -> u32 {
    7
}
fn default_description_max_chars() -> usize {
    140
}

/// `[carousel]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Seconds between automatic slide advances.
    #[serde(default = "default_autoplay_secs")]
    pub autoplay_secs: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_secs: default_autoplay_secs(),
        }
    }
}

fn default_autoplay_secs() -> u64 {
    7
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.jobcarousel/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| JobCarouselError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.jobcarousel/jobcarousel.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| JobCarouselError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        JobCarouselError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| JobCarouselError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| JobCarouselError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| JobCarouselError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject values that would make every run fall back to sample data.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.source.csv_url.trim().is_empty() {
        return Err(JobCarouselError::config("source.csv_url must not be empty"));
    }
    if config.source.timeout_secs == 0 {
        return Err(JobCarouselError::config("source.timeout_secs must be at least 1"));
    }
    if config.ingest.max_rows_scanned == 0 {
        return Err(JobCarouselError::config("ingest.max_rows_scanned must be at least 1"));
    }
    if config.ingest.max_results == 0 {
        return Err(JobCarouselError::config("ingest.max_results must be at least 1"));
    }
    if config.ingest.window_days == 0 {
        return Err(JobCarouselError::config("ingest.window_days must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("csv_url"));
        assert!(toml_str.contains("treat-as-now"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.ingest.max_rows_scanned, 100);
        assert_eq!(parsed.ingest.window_days, 7);
        assert_eq!(parsed.source.min_body_bytes, 100);
        assert_eq!(parsed.carousel.autoplay_secs, 7);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[source]
csv_url = "https://example.com/jobs.csv"

[ingest]
max_rows_scanned = 25
undated = "exclude"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.source.csv_url, "https://example.com/jobs.csv");
        assert_eq!(config.source.timeout_secs, 15);
        assert_eq!(config.ingest.max_rows_scanned, 25);
        assert_eq!(config.ingest.max_results, 20);
        assert_eq!(config.ingest.undated, UndatedPolicy::Exclude);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = AppConfig::default();
        config.source.timeout_secs = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn zero_row_scan_is_rejected() {
        let mut config = AppConfig::default();
        config.ingest.max_rows_scanned = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("max_rows_scanned"));
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join(format!("jobcarousel-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[ingest]\nwindow_days = 14\n").expect("write");

        let config = load_config_from(&path).expect("load");
        assert_eq!(config.ingest.window_days, 14);

        std::fs::remove_dir_all(&dir).ok();
    }
}

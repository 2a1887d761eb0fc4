// StaffLedger - platform/config.rs
//
// Platform-specific data directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for StaffLedger data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/staffledger/ or %APPDATA%\StaffLedger\config\)
    pub config_dir: PathBuf,

    /// Data directory holding the record snapshot.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }

    /// Default location of the record snapshot.
    pub fn store_file(&self) -> PathBuf {
        self.data_dir.join(constants::STORE_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[store]` section.
    pub store: StoreSection,
    /// `[dashboard]` section.
    pub dashboard: DashboardSection,
    /// `[reports]` section.
    pub reports: ReportsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[store]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Snapshot file path (overrides the platform data directory).
    pub file: Option<String>,
}

/// `[dashboard]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// Trailing window, in days, counted as recent hires.
    pub recent_hire_days: Option<u64>,
}

/// `[reports]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportsSection {
    /// Histogram buckets in the department detail.
    pub department_histogram_bins: Option<usize>,
    /// Histogram buckets in the company-wide report.
    pub report_histogram_bins: Option<usize>,
    /// Rows in the top-salaries list.
    pub top_salaries: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Store --
    /// Snapshot file override.
    pub store_file: Option<PathBuf>,

    // -- Dashboard --
    pub recent_hire_days: u64,

    // -- Reports --
    pub department_histogram_bins: usize,
    pub report_histogram_bins: usize,
    pub top_salaries: usize,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_file: None,
            recent_hire_days: constants::DEFAULT_RECENT_HIRE_DAYS,
            department_histogram_bins: constants::DEPARTMENT_HISTOGRAM_BINS,
            report_histogram_bins: constants::REPORT_HISTOGRAM_BINS,
            top_salaries: constants::DEFAULT_TOP_SALARIES,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning so the
/// application still starts but the user is informed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %err, "Using default configuration");
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let (config, mut parse_warnings) = parse_config(config_path, &content);
    if parse_warnings.is_empty() {
        tracing::info!(path = %config_path.display(), "Loaded config.toml");
    } else {
        tracing::warn!(
            count = parse_warnings.len(),
            "Config validation produced warnings"
        );
    }
    warnings.append(&mut parse_warnings);
    (config, warnings)
}

/// Parse and validate config.toml text read from `path`.
///
/// `path` is only used in warning messages.
pub fn parse_config(path: &Path, content: &str) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: path.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    // -- Store: file --
    if let Some(ref file) = raw.store.file {
        if !file.is_empty() {
            config.store_file = Some(PathBuf::from(file));
        }
    }

    // -- Dashboard: recent_hire_days --
    if let Some(days) = raw.dashboard.recent_hire_days {
        if (constants::MIN_RECENT_HIRE_DAYS..=constants::MAX_RECENT_HIRE_DAYS).contains(&days) {
            config.recent_hire_days = days;
        } else {
            warnings.push(out_of_range(
                "dashboard.recent_hire_days",
                days,
                format!(
                    "{}-{}",
                    constants::MIN_RECENT_HIRE_DAYS,
                    constants::MAX_RECENT_HIRE_DAYS
                ),
                constants::DEFAULT_RECENT_HIRE_DAYS,
            ));
        }
    }

    // -- Reports: histogram bins --
    let bins_range = constants::MIN_HISTOGRAM_BINS..=constants::MAX_HISTOGRAM_BINS;
    if let Some(bins) = raw.reports.department_histogram_bins {
        if bins_range.contains(&bins) {
            config.department_histogram_bins = bins;
        } else {
            warnings.push(out_of_range(
                "reports.department_histogram_bins",
                bins,
                bins_expected(),
                constants::DEPARTMENT_HISTOGRAM_BINS,
            ));
        }
    }
    if let Some(bins) = raw.reports.report_histogram_bins {
        if bins_range.contains(&bins) {
            config.report_histogram_bins = bins;
        } else {
            warnings.push(out_of_range(
                "reports.report_histogram_bins",
                bins,
                bins_expected(),
                constants::REPORT_HISTOGRAM_BINS,
            ));
        }
    }

    // -- Reports: top_salaries --
    if let Some(n) = raw.reports.top_salaries {
        if n > 0 {
            config.top_salaries = n;
        } else {
            warnings.push(out_of_range(
                "reports.top_salaries",
                n,
                "at least 1".to_string(),
                constants::DEFAULT_TOP_SALARIES,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(out_of_range(
                "logging.level",
                level,
                valid.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    (config, warnings)
}

fn bins_expected() -> String {
    format!(
        "{}-{}",
        constants::MIN_HISTOGRAM_BINS,
        constants::MAX_HISTOGRAM_BINS
    )
}

/// Warning text for a rejected value, naming the default that replaces it.
fn out_of_range(
    field: &str,
    value: impl std::fmt::Display,
    expected: String,
    default: impl std::fmt::Display,
) -> String {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    };
    format!("{err}. Using default ({default}).")
}

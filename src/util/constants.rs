// StaffLedger - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "StaffLedger";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "StaffLedger";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Import normalisation
// =============================================================================

/// Field delimiter used when the import text contains a semicolon anywhere.
pub const SEMICOLON_DELIMITER: char = ';';

/// Field delimiter used otherwise.
pub const COMMA_DELIMITER: char = ',';

/// Header keyword bound to the employee name.
pub const HEADER_KEYWORD_NAME: &str = "nome";

/// Header keyword bound to the role / job title.
pub const HEADER_KEYWORD_ROLE: &str = "cargo";

/// Header keywords bound to the salary (unaccented and accented spellings).
pub const HEADER_KEYWORDS_SALARY: &[&str] = &["salario", "salário"];

/// Header keyword bound to the department.
pub const HEADER_KEYWORD_DEPARTMENT: &str = "departamento";

/// Header keyword bound to the admission date.
pub const HEADER_KEYWORD_DATE: &str = "data";

/// Currency symbol stripped from salary cells before parsing.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Domain appended to generated e-mail addresses.
pub const DEFAULT_EMAIL_DOMAIN: &str = "empresa.com";

/// Date format used for admission dates everywhere inside the core.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum length of a raw cell value included in debug output.
pub const DEBUG_MAX_CELL_PREVIEW: usize = 80;

// =============================================================================
// Dashboard and reports
// =============================================================================

/// Default trailing window (days) counted as "recent hires" on the dashboard.
pub const DEFAULT_RECENT_HIRE_DAYS: u64 = 30;

/// Minimum configurable recent-hire window (days).
pub const MIN_RECENT_HIRE_DAYS: u64 = 1;

/// Maximum configurable recent-hire window (days).
pub const MAX_RECENT_HIRE_DAYS: u64 = 3_650;

/// Histogram bin count used by the per-department detail view.
pub const DEPARTMENT_HISTOGRAM_BINS: usize = 8;

/// Histogram bin count used by the company-wide report view.
pub const REPORT_HISTOGRAM_BINS: usize = 10;

/// Minimum configurable histogram bin count.
pub const MIN_HISTOGRAM_BINS: usize = 1;

/// Maximum configurable histogram bin count.
pub const MAX_HISTOGRAM_BINS: usize = 100;

/// Number of rows in the "top salaries" report.
pub const DEFAULT_TOP_SALARIES: usize = 10;

/// Length of the default report period, ending today (months).
pub const REPORT_PERIOD_MONTHS: u32 = 12;

/// Number of candidate rows printed by the import preview.
pub const IMPORT_PREVIEW_ROWS: usize = 5;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Persistence
// =============================================================================

/// Fixed name under which the record collection is persisted.
pub const STORE_NAME: &str = "funcionario-store";

/// Snapshot schema version. Snapshots carrying any other version are discarded.
pub const STORE_VERSION: u32 = 2;

/// Snapshot file name (stored in the platform data directory).
pub const STORE_FILE_NAME: &str = "store.json";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

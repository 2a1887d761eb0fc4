// StaffLedger - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation between layers.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all StaffLedger operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum StaffLedgerError {
    /// A single-record store mutation was refused.
    Store(StoreError),

    /// Filter operation failed.
    Filter(FilterError),

    /// Export or export decoding failed.
    Export(ExportError),

    /// Snapshot persistence failed.
    Snapshot(SnapshotError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for StaffLedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Store error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Snapshot(e) => write!(f, "Snapshot error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for StaffLedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Snapshot(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Reasons a single-record mutation (add / update / delete) is refused.
///
/// A refused mutation never changes the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Another record already uses this e-mail address.
    DuplicateEmail { email: String },

    /// No record has this e-mail address.
    NotFound { email: String },

    /// Salary is negative, NaN or infinite.
    InvalidSalary { email: String, salary: f64 },

    /// An update would leave the record with a blank e-mail.
    BlankEmail { email: String },

    /// Every identifier has been handed out.
    IdentifiersExhausted,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEmail { email } => {
                write!(f, "email '{email}' already exists in store")
            }
            Self::NotFound { email } => write!(f, "no employee with email '{email}'"),
            Self::InvalidSalary { email, salary } => write!(
                f,
                "salary {salary} for '{email}' is invalid (must be a non-negative amount)"
            ),
            Self::BlankEmail { email } => {
                write!(f, "cannot replace email '{email}' with a blank one")
            }
            Self::IdentifiersExhausted => write!(f, "no employee identifiers left"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for StaffLedgerError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter operations.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid name regex '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for StaffLedgerError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export encoding and decoding.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error flushing the export writer.
    Io { source: io::Error },

    /// CSV serialisation or deserialisation error.
    Csv { source: csv::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },

    /// An exported file does not carry the expected header.
    UnexpectedHeader { found: String },

    /// A data line in an exported file has the wrong number of columns.
    ColumnCount {
        line: u64,
        found: usize,
        expected: usize,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { source } => write!(f, "Export I/O error: {source}"),
            Self::Csv { source } => write!(f, "CSV error: {source}"),
            Self::Json { source } => write!(f, "JSON export error: {source}"),
            Self::UnexpectedHeader { found } => {
                write!(f, "Not an exported employee file (header was '{found}')")
            }
            Self::ColumnCount {
                line,
                found,
                expected,
            } => write!(
                f,
                "Line {line}: found {found} columns, expected {expected}. \
                 Values containing commas cannot be decoded."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::Csv { source } => Some(source),
            Self::Json { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for StaffLedgerError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Snapshot errors
// ---------------------------------------------------------------------------

/// Errors related to saving the persisted record collection.
///
/// Loading never fails: an unreadable snapshot means "start from the seed".
#[derive(Debug)]
pub enum SnapshotError {
    /// The snapshot could not be serialised.
    Serialise { source: serde_json::Error },

    /// I/O error writing the snapshot or its directory.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialise { source } => write!(f, "failed to serialise snapshot: {source}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "failed to {operation} '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialise { source } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<SnapshotError> for StaffLedgerError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for StaffLedgerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for StaffLedger results.
pub type Result<T> = std::result::Result<T, StaffLedgerError>;

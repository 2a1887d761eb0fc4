// StaffLedger - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Employee identifier
// =============================================================================

/// Opaque, store-assigned employee identifier.
///
/// Identifiers are handed out by `RecordStore` from a counter that only ever
/// grows, so an identifier is never reused after its record is deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EmployeeId(u64);

impl EmployeeId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, for display and persistence.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Status
// =============================================================================

/// Employment status.
///
/// Serialised with the labels used by the export format so that persisted
/// snapshots and exported files agree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Status {
    #[default]
    #[serde(rename = "Ativo")]
    Active,
    #[serde(rename = "Inativo")]
    Inactive,
    #[serde(rename = "Férias")]
    OnLeave,
}

impl Status {
    /// Returns all variants in display order.
    pub fn all() -> &'static [Status] {
        &[Status::Active, Status::Inactive, Status::OnLeave]
    }

    /// Label written by the export encoder.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Ativo",
            Status::Inactive => "Inativo",
            Status::OnLeave => "Férias",
        }
    }

    /// Parse an export label or an English variant name (case-insensitive).
    pub fn parse(raw: &str) -> Option<Status> {
        match raw.trim().to_lowercase().as_str() {
            "ativo" | "active" => Some(Status::Active),
            "inativo" | "inactive" => Some(Status::Inactive),
            "férias" | "ferias" | "onleave" | "on-leave" | "on_leave" => Some(Status::OnLeave),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Employee record
// =============================================================================

/// One employee as held by the store.
///
/// `email` is the business key: unique across the store and compared
/// byte-for-byte (case preserved).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub department: String,
    pub role: String,
    pub salary: f64,
    pub admission_date: NaiveDate,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub notes: String,
}

/// Everything needed to create a record; the store supplies the identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    /// Blank means "generate from the name".
    pub email: String,
    pub phone: String,
    pub department: String,
    pub role: String,
    pub salary: f64,
    pub admission_date: NaiveDate,
    pub status: Status,
    pub notes: String,
}

impl NewEmployee {
    /// Minimal record: active, no e-mail (generated on add), no phone or notes.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        department: impl Into<String>,
        salary: f64,
        admission_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            department: department.into(),
            role: role.into(),
            salary,
            admission_date,
            status: Status::Active,
            notes: String::new(),
        }
    }

    /// Same record with an explicit e-mail address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

/// Partial update applied by `RecordStore::update`. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub salary: Option<f64>,
    pub admission_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub notes: Option<String>,
}

impl EmployeePatch {
    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.department.is_none()
            && self.role.is_none()
            && self.salary.is_none()
            && self.admission_date.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }

    /// Merge the supplied fields over `employee`. The identifier is untouched.
    pub(crate) fn apply_to(&self, employee: &mut Employee) {
        if let Some(ref v) = self.name {
            employee.name = v.clone();
        }
        if let Some(ref v) = self.email {
            employee.email = v.clone();
        }
        if let Some(ref v) = self.phone {
            employee.phone = v.clone();
        }
        if let Some(ref v) = self.department {
            employee.department = v.clone();
        }
        if let Some(ref v) = self.role {
            employee.role = v.clone();
        }
        if let Some(v) = self.salary {
            employee.salary = v;
        }
        if let Some(v) = self.admission_date {
            employee.admission_date = v;
        }
        if let Some(v) = self.status {
            employee.status = v;
        }
        if let Some(ref v) = self.notes {
            employee.notes = v.clone();
        }
    }
}

// =============================================================================
// Candidate record (normalised output of import parsing)
// =============================================================================

/// A partially-populated record produced by the import pipeline.
///
/// Fields the import format does not carry are `None` and are defaulted by
/// `RecordStore::import_batch`. The admission date is kept as normalised text
/// and only validated when the candidate is committed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    /// 1-based line number in the source text.
    pub line_number: u64,
    pub name: String,
    pub role: String,
    pub salary: f64,
    pub department: String,
    pub admission_date: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<Status>,
    pub notes: Option<String>,
}

// =============================================================================
// Projections
// =============================================================================

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_employees: usize,
    pub total_payroll: f64,
    pub average_salary: f64,
    pub department_count: usize,
    pub recent_hire_count: usize,
}

/// Payroll figures for one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStats {
    pub name: String,
    pub total_cost: f64,
    pub average_salary: f64,
    pub employee_count: usize,
    /// Share of the company payroll, 0-100.
    pub percent_of_payroll: f64,
}

/// Outcome of a batch import. Partial success is the normal case.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportResult {
    pub success_count: usize,
    pub error_count: usize,
    /// One human-readable message per failed candidate, in input order.
    pub messages: Vec<String>,
}

impl ImportResult {
    /// Record a failed candidate.
    pub(crate) fn push_error(&mut self, message: String) {
        self.error_count += 1;
        self.messages.push(message);
    }

    /// Returns true if every candidate was committed.
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }
}

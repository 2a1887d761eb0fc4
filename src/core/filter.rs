// StaffLedger - core/filter.rs
//
// Composable filter and sort engine for the employee list.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{Employee, Status};
use crate::util::error::FilterError;
use regex::Regex;
use std::cmp::Ordering;

/// Column the list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Salary,
    AdmissionDate,
    Department,
}

/// Direction of the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Case-insensitive substring matched against the name. Empty = no filter.
    pub text_search: String,

    /// Compiled regex matched against the name. None = no regex filter.
    pub regex_search: Option<Regex>,

    /// Exact department label. None = all departments.
    pub department: Option<String>,

    /// Exact status. None = all statuses.
    pub status: Option<Status>,

    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Returns true if no record would be excluded.
    pub fn is_empty(&self) -> bool {
        self.text_search.is_empty()
            && self.regex_search.is_none()
            && self.department.is_none()
            && self.status.is_none()
    }

    /// Set the regex search pattern, compiling it.
    /// Returns an error if the pattern is invalid.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }

    /// Quick-filter for one department.
    pub fn department(name: impl Into<String>) -> Self {
        Self {
            department: Some(name.into()),
            ..Default::default()
        }
    }

    /// Quick-filter for active employees, best paid first.
    pub fn active_by_salary() -> Self {
        Self {
            status: Some(Status::Active),
            sort_key: SortKey::Salary,
            sort_order: SortOrder::Descending,
            ..Default::default()
        }
    }
}

/// Apply filters and ordering, returning indices into `records`.
///
/// Returning indices avoids copying records; the sort is stable so records
/// that compare equal keep their store order.
pub fn apply_filters(records: &[Employee], filter: &FilterState) -> Vec<usize> {
    let text_lower = filter.text_search.to_lowercase();

    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, e)| matches_all(e, filter, &text_lower))
        .map(|(idx, _)| idx)
        .collect();

    indices.sort_by(|&a, &b| {
        let ord = compare(&records[a], &records[b], filter.sort_key);
        match filter.sort_order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
    indices
}

/// Check if a single record matches all active filters.
fn matches_all(e: &Employee, filter: &FilterState, text_lower: &str) -> bool {
    if !text_lower.is_empty() && !e.name.to_lowercase().contains(text_lower) {
        return false;
    }

    if let Some(ref regex) = filter.regex_search {
        if !regex.is_match(&e.name) {
            return false;
        }
    }

    if let Some(ref dept) = filter.department {
        if e.department != *dept {
            return false;
        }
    }

    if let Some(status) = filter.status {
        if e.status != status {
            return false;
        }
    }

    true
}

fn compare(a: &Employee, b: &Employee, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Salary => a.salary.total_cmp(&b.salary),
        SortKey::AdmissionDate => a.admission_date.cmp(&b.admission_date),
        SortKey::Department => a
            .department
            .to_lowercase()
            .cmp(&b.department.to_lowercase()),
    }
}

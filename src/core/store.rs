// StaffLedger - core/store.rs
//
// Authoritative in-memory collection of employee records.
// Core layer: no I/O. The host owns persistence and hands records in through
// `restore` / takes them out through `snapshot`.
//
// Invariants held after every public call:
//   - no two records share an e-mail (byte-for-byte comparison)
//   - every salary is finite and >= 0
//   - identifiers are never reassigned or reused

use crate::core::model::{
    CandidateRecord, Employee, EmployeeId, EmployeePatch, ImportResult, NewEmployee, Status,
};
use crate::core::normalize::default_email;
use crate::util::constants;
use crate::util::error::StoreError;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};

/// Employee records plus the identifier counter.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Employee>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from a previously taken snapshot.
    ///
    /// Records that would break an invariant (repeated e-mail or identifier,
    /// invalid salary, the largest possible identifier) are skipped, one
    /// warning each. Identifiers are kept and
    /// the counter resumes after the highest one seen.
    pub fn restore(records: Vec<Employee>) -> (Self, Vec<String>) {
        let mut store = Self::new();
        let mut warnings = Vec::new();
        let mut ids = HashSet::new();

        for record in records {
            if !ids.insert(record.id) {
                warnings.push(format!(
                    "Skipped '{}': identifier {} appears more than once",
                    record.name, record.id
                ));
                continue;
            }
            if store.contains_email(&record.email) {
                warnings.push(format!(
                    "Skipped '{}': email '{}' appears more than once",
                    record.name, record.email
                ));
                continue;
            }
            if !is_valid_salary(record.salary) {
                warnings.push(format!(
                    "Skipped '{}': salary {} is invalid",
                    record.name, record.salary
                ));
                continue;
            }
            let Some(after) = record.id.get().checked_add(1) else {
                warnings.push(format!(
                    "Skipped '{}': identifier {} leaves no room for new records",
                    record.name, record.id
                ));
                continue;
            };
            store.next_id = store.next_id.max(after);
            store.records.push(record);
        }

        tracing::debug!(
            restored = store.records.len(),
            skipped = warnings.len(),
            next_id = store.next_id,
            "Record store restored"
        );
        (store, warnings)
    }

    /// Copy of the full collection, in insertion order.
    pub fn snapshot(&self) -> Vec<Employee> {
        self.records.clone()
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    /// Read-only view of every record, in insertion order.
    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.records.iter().find(|e| e.id == id)
    }

    pub fn get_by_email(&self, email: &str) -> Option<&Employee> {
        self.records.iter().find(|e| e.email == email)
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.get_by_email(email).is_some()
    }

    /// Distinct department labels, sorted.
    pub fn departments(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|e| e.department.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Copies of the records in `department` (exact match), in insertion order.
    pub fn by_department(&self, department: &str) -> Vec<Employee> {
        self.records
            .iter()
            .filter(|e| e.department == department)
            .cloned()
            .collect()
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Append a new record and return its freshly assigned identifier.
    ///
    /// A blank e-mail is generated from the name first. Fails without touching
    /// the store if the e-mail is taken, the salary is invalid or the
    /// identifier counter has run out.
    pub fn add(&mut self, new: NewEmployee) -> Result<EmployeeId, StoreError> {
        let email = if new.email.trim().is_empty() {
            default_email(&new.name)
        } else {
            new.email
        };

        if !is_valid_salary(new.salary) {
            return Err(StoreError::InvalidSalary {
                email,
                salary: new.salary,
            });
        }
        if self.contains_email(&email) {
            tracing::debug!(email = %email, "Add refused: email already exists");
            return Err(StoreError::DuplicateEmail { email });
        }

        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(StoreError::IdentifiersExhausted)?;
        let id = EmployeeId::new(self.next_id);
        self.next_id = next_id;
        self.records.push(Employee {
            id,
            name: new.name,
            email,
            phone: new.phone,
            department: new.department,
            role: new.role,
            salary: new.salary,
            admission_date: new.admission_date,
            status: new.status,
            notes: new.notes,
        });
        tracing::debug!(id = %id, total = self.records.len(), "Employee added");
        Ok(id)
    }

    /// Merge `patch` over the record with this e-mail.
    ///
    /// The identifier and every field the patch leaves as `None` are kept.
    /// Changing the e-mail to a blank one, or to one used by another record,
    /// is refused.
    pub fn update(&mut self, email: &str, patch: &EmployeePatch) -> Result<(), StoreError> {
        let idx = self
            .position(email)
            .ok_or_else(|| StoreError::NotFound {
                email: email.to_string(),
            })?;

        if let Some(salary) = patch.salary {
            if !is_valid_salary(salary) {
                return Err(StoreError::InvalidSalary {
                    email: email.to_string(),
                    salary,
                });
            }
        }
        if let Some(ref new_email) = patch.email {
            if new_email.trim().is_empty() {
                return Err(StoreError::BlankEmail {
                    email: email.to_string(),
                });
            }
            let taken = self
                .records
                .iter()
                .enumerate()
                .any(|(i, e)| i != idx && e.email == *new_email);
            if taken {
                return Err(StoreError::DuplicateEmail {
                    email: new_email.clone(),
                });
            }
        }

        patch.apply_to(&mut self.records[idx]);
        tracing::debug!(id = %self.records[idx].id, "Employee updated");
        Ok(())
    }

    /// Remove and return the record with this e-mail.
    pub fn delete(&mut self, email: &str) -> Result<Employee, StoreError> {
        let idx = self
            .position(email)
            .ok_or_else(|| StoreError::NotFound {
                email: email.to_string(),
            })?;
        let removed = self.records.remove(idx);
        tracing::debug!(id = %removed.id, total = self.records.len(), "Employee deleted");
        Ok(removed)
    }

    /// Commit normalised candidates, in order, with per-row partial failure.
    ///
    /// For each candidate: a missing e-mail is generated from the name; the
    /// e-mail is checked against the e-mails present when the batch started;
    /// the admission date must be a `YYYY-MM-DD` calendar date; then the
    /// record goes through `add`. Within one batch the start-of-batch check
    /// does not see earlier rows, but `add` does, so a repeated e-mail inside
    /// the batch is still refused. A failing row never stops the batch.
    pub fn import_batch(
        &mut self,
        candidates: impl IntoIterator<Item = CandidateRecord>,
    ) -> ImportResult {
        let existing: HashSet<String> = self.records.iter().map(|e| e.email.clone()).collect();
        let mut result = ImportResult::default();

        for candidate in candidates {
            let name = candidate.name.clone();
            let email = match candidate.email {
                Some(ref e) if !e.trim().is_empty() => e.clone(),
                _ => default_email(&candidate.name),
            };

            if existing.contains(&email) {
                tracing::debug!(line = candidate.line_number, email = %email, "Import row conflicts with store");
                result.push_error(format!("{name}: email already exists"));
                continue;
            }

            let Ok(admission_date) =
                NaiveDate::parse_from_str(&candidate.admission_date, constants::ISO_DATE_FORMAT)
            else {
                tracing::debug!(line = candidate.line_number, "Import row has invalid admission date");
                result.push_error(format!(
                    "{name}: invalid admission date '{}'",
                    candidate.admission_date
                ));
                continue;
            };

            let new = NewEmployee {
                name: candidate.name,
                email,
                phone: candidate.phone.unwrap_or_default(),
                department: candidate.department,
                role: candidate.role,
                salary: candidate.salary,
                admission_date,
                status: candidate.status.unwrap_or(Status::Active),
                notes: candidate.notes.unwrap_or_default(),
            };

            match self.add(new) {
                Ok(_) => result.success_count += 1,
                Err(e) => result.push_error(format!("{name}: {e}")),
            }
        }

        tracing::info!(
            imported = result.success_count,
            failed = result.error_count,
            total = self.records.len(),
            "Batch import finished"
        );
        result
    }

    fn position(&self, email: &str) -> Option<usize> {
        self.records.iter().position(|e| e.email == email)
    }
}

fn is_valid_salary(salary: f64) -> bool {
    salary.is_finite() && salary >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::{import_template, normalize_import};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(name: &str, email: &str) -> NewEmployee {
        NewEmployee::new(name, "Analista", "Tecnologia", 5000.0, date(2024, 1, 15)).with_email(email)
    }

    fn candidate(name: &str, email: Option<&str>, admission_date: &str) -> CandidateRecord {
        CandidateRecord {
            line_number: 0,
            name: name.to_string(),
            role: "Analista".to_string(),
            salary: 1000.0,
            department: "Vendas".to_string(),
            admission_date: admission_date.to_string(),
            email: email.map(str::to_string),
            phone: None,
            status: None,
            notes: None,
        }
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let mut store = RecordStore::new();
        let a = store.add(employee("Ana", "ana@empresa.com")).unwrap();
        let b = store.add(employee("Bia", "bia@empresa.com")).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b).unwrap().name, "Bia");
    }

    #[test]
    fn test_add_duplicate_email_is_refused_without_mutation() {
        let mut store = RecordStore::new();
        store.add(employee("Ana", "ana@empresa.com")).unwrap();
        let before = store.snapshot();
        let err = store.add(employee("Outra Ana", "ana@empresa.com")).unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateEmail {
                email: "ana@empresa.com".to_string()
            }
        );
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_email_comparison_is_case_sensitive() {
        let mut store = RecordStore::new();
        store.add(employee("Ana", "ana@empresa.com")).unwrap();
        assert!(store.add(employee("Ana", "ANA@empresa.com")).is_ok());
        assert!(store.get_by_email("Ana@Empresa.com").is_none());
    }

    #[test]
    fn test_add_generates_blank_email() {
        let mut store = RecordStore::new();
        let id = store
            .add(NewEmployee::new("Pedro Costa", "Analista", "Marketing", 5500.0, date(2023, 8, 20)))
            .unwrap();
        assert_eq!(store.get(id).unwrap().email, "pedro.costa@empresa.com");
    }

    #[test]
    fn test_add_rejects_negative_salary() {
        let mut store = RecordStore::new();
        let mut e = employee("Ana", "ana@empresa.com");
        e.salary = -1.0;
        assert!(matches!(store.add(e), Err(StoreError::InvalidSalary { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = RecordStore::new();
        let a = store.add(employee("Ana", "ana@empresa.com")).unwrap();
        store.delete("ana@empresa.com").unwrap();
        let b = store.add(employee("Ana", "ana@empresa.com")).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_update_merges_and_keeps_id() {
        let mut store = RecordStore::new();
        let id = store.add(employee("Ana", "ana@empresa.com")).unwrap();
        let patch = EmployeePatch {
            role: Some("Gerente".to_string()),
            salary: Some(9000.0),
            ..Default::default()
        };
        store.update("ana@empresa.com", &patch).unwrap();
        let ana = store.get(id).unwrap();
        assert_eq!(ana.role, "Gerente");
        assert_eq!(ana.salary, 9000.0);
        assert_eq!(ana.department, "Tecnologia");
    }

    #[test]
    fn test_update_unknown_email_leaves_store_unchanged() {
        let mut store = RecordStore::new();
        store.add(employee("Ana", "ana@empresa.com")).unwrap();
        let before = store.snapshot();
        let patch = EmployeePatch {
            salary: Some(1.0),
            ..Default::default()
        };
        let err = store.update("ghost@empresa.com", &patch).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_update_cannot_steal_another_email() {
        let mut store = RecordStore::new();
        store.add(employee("Ana", "ana@empresa.com")).unwrap();
        store.add(employee("Bia", "bia@empresa.com")).unwrap();
        let patch = EmployeePatch {
            email: Some("ana@empresa.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update("bia@empresa.com", &patch),
            Err(StoreError::DuplicateEmail { .. })
        ));
        // Re-asserting its own e-mail is fine.
        let own = EmployeePatch {
            email: Some("bia@empresa.com".to_string()),
            ..Default::default()
        };
        assert!(store.update("bia@empresa.com", &own).is_ok());
    }

    #[test]
    fn test_update_refuses_blank_email() {
        let mut store = RecordStore::new();
        store.add(employee("Ana", "ana@empresa.com")).unwrap();
        let before = store.snapshot();
        for blank in ["", "   "] {
            let patch = EmployeePatch {
                email: Some(blank.to_string()),
                role: Some("Gerente".to_string()),
                ..Default::default()
            };
            let err = store.update("ana@empresa.com", &patch).unwrap_err();
            assert_eq!(
                err,
                StoreError::BlankEmail {
                    email: "ana@empresa.com".to_string()
                }
            );
        }
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_delete() {
        let mut store = RecordStore::new();
        store.add(employee("Ana", "ana@empresa.com")).unwrap();
        let removed = store.delete("ana@empresa.com").unwrap();
        assert_eq!(removed.name, "Ana");
        assert!(store.is_empty());
        assert!(matches!(
            store.delete("ana@empresa.com"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_import_template_generates_emails() {
        let mut store = RecordStore::new();
        let result = store.import_batch(normalize_import(import_template()).candidates);
        assert_eq!(result.success_count, 2);
        assert!(result.is_clean());
        assert!(store.contains_email("joao.silva@empresa.com"));
        assert!(store.contains_email("maria.santos@empresa.com"));
        assert_eq!(store.records()[1].salary, 8500.5);
        assert_eq!(store.records()[0].status, Status::Active);
    }

    #[test]
    fn test_import_partial_failure_continues() {
        let mut store = RecordStore::new();
        store.add(employee("Ana Lima", "ana.lima@empresa.com")).unwrap();
        let result = store.import_batch(vec![
            candidate("Ana Lima", None, "2024-01-01"),
            candidate("Bruno Dias", None, "31/01/2024"),
            candidate("Carla Reis", None, "2024-02-30"),
            candidate("Davi Melo", Some("davi@empresa.com"), "2024-03-01"),
        ]);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.error_count, 3);
        assert_eq!(result.messages[0], "Ana Lima: email already exists");
        assert_eq!(result.messages[1], "Bruno Dias: invalid admission date '31/01/2024'");
        assert_eq!(result.messages[2], "Carla Reis: invalid admission date '2024-02-30'");
        assert!(store.contains_email("davi@empresa.com"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_import_repeated_email_within_batch_keeps_first() {
        let mut store = RecordStore::new();
        let result = store.import_batch(vec![
            candidate("João Silva", None, "2024-01-15"),
            candidate("JOÃO   SILVA", None, "2024-02-15"),
        ]);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.error_count, 1);
        assert_eq!(
            result.messages[0],
            "JOÃO   SILVA: email 'joao.silva@empresa.com' already exists in store"
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_restore_skips_invariant_violations_and_resumes_ids() {
        let mut source = RecordStore::new();
        source.add(employee("Ana", "ana@empresa.com")).unwrap();
        source.add(employee("Bia", "bia@empresa.com")).unwrap();
        let mut records = source.snapshot();
        let mut dup = records[0].clone();
        dup.id = EmployeeId::new(40);
        records.push(dup);

        let (mut store, warnings) = RecordStore::restore(records);
        assert_eq!(store.len(), 2);
        assert_eq!(warnings.len(), 1);
        let next = store.add(employee("Caio", "caio@empresa.com")).unwrap();
        assert_eq!(next.get(), 3);
    }

    #[test]
    fn test_restore_skips_largest_identifier() {
        let mut source = RecordStore::new();
        source.add(employee("Ana", "ana@empresa.com")).unwrap();
        source.add(employee("Bia", "bia@empresa.com")).unwrap();
        let mut records = source.snapshot();
        records[1].id = EmployeeId::new(u64::MAX);

        let (mut store, warnings) = RecordStore::restore(records);
        assert_eq!(store.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Bia"));
        let next = store.add(employee("Caio", "caio@empresa.com")).unwrap();
        assert_eq!(next.get(), 2);
    }

    #[test]
    fn test_add_refuses_when_identifiers_run_out() {
        let mut records = RecordStore::new();
        records.add(employee("Ana", "ana@empresa.com")).unwrap();
        let mut snapshot = records.snapshot();
        snapshot[0].id = EmployeeId::new(u64::MAX - 1);

        let (mut store, warnings) = RecordStore::restore(snapshot);
        assert!(warnings.is_empty());
        let err = store.add(employee("Bia", "bia@empresa.com")).unwrap_err();
        assert_eq!(err, StoreError::IdentifiersExhausted);
        assert_eq!(store.len(), 1);
        assert!(!store.contains_email("bia@empresa.com"));
    }

    #[test]
    fn test_departments_sorted_and_distinct() {
        let mut store = RecordStore::new();
        let mut a = employee("Ana", "ana@empresa.com");
        a.department = "Vendas".to_string();
        store.add(a).unwrap();
        store.add(employee("Bia", "bia@empresa.com")).unwrap();
        store.add(employee("Caio", "caio@empresa.com")).unwrap();
        assert_eq!(store.departments(), ["Tecnologia", "Vendas"]);
        assert_eq!(store.by_department("Tecnologia").len(), 2);
    }
}

// StaffLedger - app/state.rs
//
// Application state management. Owns the record store, the current list
// filter, and a pending import preview.
// Owned by the application root (main.rs); passed by reference.

use crate::app::snapshot::{self, StoreSnapshot};
use crate::core::export;
use crate::core::filter::FilterState;
use crate::core::model::{
    DashboardStats, Employee, EmployeeId, EmployeePatch, ImportResult, NewEmployee,
};
use crate::core::normalize::{self, NormalizationResult};
use crate::core::seed;
use crate::core::stats;
use crate::core::store::RecordStore;
use crate::util::error::{ExportError, SnapshotError, StoreError};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The authoritative employee collection.
    pub store: RecordStore,

    /// Where the snapshot is read from and written to.
    pub data_file: PathBuf,

    /// Current filter configuration.
    pub filter_state: FilterState,

    /// Indices of records matching the current filter (into `store.records()`).
    pub filtered_indices: Vec<usize>,

    /// Normalised import waiting for confirmation.
    pub import_preview: Option<NormalizationResult>,

    /// Outcome of the last operation, for display.
    pub status_message: String,

    /// Non-fatal warnings (skipped snapshot records, config problems).
    pub warnings: Vec<String>,

    /// True when the store has changed since the last load or save.
    pub dirty: bool,
}

impl AppState {
    /// Create state around an existing store.
    pub fn new(store: RecordStore, data_file: PathBuf) -> Self {
        let mut state = Self {
            store,
            data_file,
            filter_state: FilterState::default(),
            filtered_indices: Vec::new(),
            import_preview: None,
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            dirty: false,
        };
        state.apply_filters();
        state
    }

    /// Restore the store from the snapshot at `data_file`, or fall back to
    /// the seed dataset when there is no usable snapshot.
    pub fn load_or_seed(data_file: PathBuf) -> Self {
        match snapshot::load(&data_file) {
            Some(snap) => {
                let (store, warnings) = RecordStore::restore(snap.records);
                for w in &warnings {
                    tracing::warn!(warning = %w, "Snapshot record skipped");
                }
                let mut state = Self::new(store, data_file);
                state.status_message = format!("Loaded {} employees.", state.store.len());
                state.warnings = warnings;
                state
            }
            None => {
                tracing::info!("No usable snapshot; starting from seed dataset");
                let mut state = Self::new(seed::seed_store(), data_file);
                state.status_message = "Started from the sample dataset.".to_string();
                state
            }
        }
    }

    /// Write the current collection to `data_file` and clear the dirty flag.
    pub fn save(&mut self) -> Result<(), SnapshotError> {
        snapshot::save(&StoreSnapshot::new(self.store.snapshot()), &self.data_file)?;
        self.dirty = false;
        Ok(())
    }

    /// Recompute filtered indices from the store and filter state.
    pub fn apply_filters(&mut self) {
        self.filtered_indices =
            crate::core::filter::apply_filters(self.store.records(), &self.filter_state);
    }

    /// Records matching the current filter, in filter order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &Employee> + '_ {
        let records = self.store.records();
        self.filtered_indices
            .iter()
            .filter_map(move |&idx| records.get(idx))
    }

    /// Headline figures as of `today`.
    pub fn dashboard(&self, today: NaiveDate, recent_window_days: u64) -> DashboardStats {
        stats::dashboard_stats(self.store.records(), today, recent_window_days)
    }

    // -------------------------------------------------------------------------
    // Import (preview, then commit)
    // -------------------------------------------------------------------------

    /// Normalise `text` and hold the result for review. Nothing is committed.
    pub fn preview_import(&mut self, text: &str) -> &NormalizationResult {
        let result = normalize::normalize_import(text);
        self.status_message = format!(
            "{} of {} rows ready to import.",
            result.rows_accepted, result.rows_seen
        );
        self.import_preview.insert(result)
    }

    /// Discard the pending import.
    pub fn cancel_import(&mut self) {
        if self.import_preview.take().is_some() {
            self.status_message = "Import cancelled.".to_string();
        }
    }

    /// Commit the pending import. Returns `None` if there is nothing to commit.
    pub fn commit_import(&mut self) -> Option<ImportResult> {
        let preview = self.import_preview.take()?;
        let result = self.store.import_batch(preview.candidates);
        if result.success_count > 0 {
            self.dirty = true;
        }
        self.status_message = format!(
            "Imported {} employees, {} errors.",
            result.success_count, result.error_count
        );
        self.apply_filters();
        Some(result)
    }

    /// Import a file previously produced by the CSV export, committing at once.
    ///
    /// Unlike the generic import this keeps e-mail, phone, status and notes.
    pub fn import_exported(&mut self, text: &str) -> Result<ImportResult, ExportError> {
        let candidates = export::decode_export(text)?;
        let result = self.store.import_batch(candidates);
        if result.success_count > 0 {
            self.dirty = true;
        }
        self.status_message = format!(
            "Imported {} employees, {} errors.",
            result.success_count, result.error_count
        );
        self.apply_filters();
        Ok(result)
    }

    // -------------------------------------------------------------------------
    // Single-record mutations
    // -------------------------------------------------------------------------

    pub fn add_employee(&mut self, new: NewEmployee) -> Result<EmployeeId, StoreError> {
        let id = self.store.add(new)?;
        self.after_mutation(format!("Employee {id} added."));
        Ok(id)
    }

    pub fn update_employee(&mut self, email: &str, patch: &EmployeePatch) -> Result<(), StoreError> {
        self.store.update(email, patch)?;
        self.after_mutation(format!("Employee '{email}' updated."));
        Ok(())
    }

    pub fn delete_employee(&mut self, email: &str) -> Result<Employee, StoreError> {
        let removed = self.store.delete(email)?;
        self.after_mutation(format!("Employee '{}' removed.", removed.name));
        Ok(removed)
    }

    fn after_mutation(&mut self, message: String) {
        self.dirty = true;
        self.status_message = message;
        self.apply_filters();
    }
}

/// The local calendar date, used as "today" by every time-windowed query.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

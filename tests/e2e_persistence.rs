// StaffLedger - tests/e2e_persistence.rs
//
// End-to-end tests for the host side: snapshot files on disk, restore with
// seed fallback, and config.toml overrides. Every test works in its own
// temporary directory.

use chrono::NaiveDate;
use staffledger::app::snapshot::{self, StoreSnapshot};
use staffledger::app::state::AppState;
use staffledger::core::model::{Employee, NewEmployee, Status};
use staffledger::core::normalize::import_template;
use staffledger::platform::config::load_config;
use std::path::PathBuf;
use tempfile::TempDir;

fn store_file(dir: &TempDir) -> PathBuf {
    snapshot::snapshot_path(dir.path())
}

/// A hand-written snapshot record, as another run would have saved it.
fn record_json(id: u64, name: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "email": email,
        "phone": "",
        "department": "Financeiro",
        "role": "Analista",
        "salary": 4000.0,
        "admission_date": "2023-05-02",
        "status": "Inativo",
        "notes": ""
    })
}

#[test]
fn e2e_first_run_starts_from_seed_and_persists_after_mutation() {
    let dir = TempDir::new().unwrap();
    let path = store_file(&dir);

    let mut state = AppState::load_or_seed(path.clone());
    assert_eq!(state.store.len(), 8);
    assert!(!path.exists(), "loading alone must not write a snapshot");

    state.preview_import(import_template());
    let result = state.commit_import().unwrap();
    assert_eq!(result.success_count, 1);
    state.save().unwrap();

    let reloaded = AppState::load_or_seed(path);
    assert_eq!(reloaded.store.len(), 9);
    assert!(reloaded.store.contains_email("maria.santos@empresa.com"));
    assert_eq!(reloaded.store.records(), state.store.records());
}

#[test]
fn e2e_restore_resumes_identifier_counter() {
    let dir = TempDir::new().unwrap();
    let path = store_file(&dir);
    let doc = serde_json::json!({
        "name": "funcionario-store",
        "version": 2,
        "records": [
            record_json(3, "Ana Reis", "ana.reis@empresa.com"),
            record_json(41, "Caio Melo", "caio.melo@empresa.com"),
        ]
    });
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let mut state = AppState::load_or_seed(path);
    assert_eq!(state.store.len(), 2);
    assert_eq!(
        state.store.get_by_email("caio.melo@empresa.com").unwrap().status,
        Status::Inactive
    );

    let admitted = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
    let id = state
        .add_employee(NewEmployee::new("Davi Luz", "Analista", "Financeiro", 4100.0, admitted))
        .unwrap();
    assert_eq!(id.get(), 42);
}

#[test]
fn e2e_restore_skips_record_with_largest_identifier() {
    let dir = TempDir::new().unwrap();
    let path = store_file(&dir);
    let doc = serde_json::json!({
        "name": "funcionario-store",
        "version": 2,
        "records": [
            record_json(7, "Ana Reis", "ana.reis@empresa.com"),
            record_json(u64::MAX, "Caio Melo", "caio.melo@empresa.com"),
        ]
    });
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let mut state = AppState::load_or_seed(path);
    assert_eq!(state.store.len(), 1);
    assert_eq!(state.warnings.len(), 1);
    assert!(state.warnings[0].contains("Caio Melo"));

    let admitted = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
    let id = state
        .add_employee(NewEmployee::new("Davi Luz", "Analista", "Financeiro", 4100.0, admitted))
        .unwrap();
    assert_eq!(id.get(), 8);
}

#[test]
fn e2e_restore_skips_records_breaking_uniqueness() {
    let dir = TempDir::new().unwrap();
    let path = store_file(&dir);
    let doc = serde_json::json!({
        "name": "funcionario-store",
        "version": 2,
        "records": [
            record_json(1, "Ana Reis", "ana.reis@empresa.com"),
            record_json(2, "Ana Reis (cópia)", "ana.reis@empresa.com"),
        ]
    });
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let state = AppState::load_or_seed(path);
    assert_eq!(state.store.len(), 1);
    assert_eq!(state.warnings.len(), 1);
    assert!(state.warnings[0].contains("ana.reis@empresa.com"));
}

#[test]
fn e2e_foreign_version_falls_back_to_seed() {
    let dir = TempDir::new().unwrap();
    let path = store_file(&dir);
    let mut old = StoreSnapshot::new(Vec::<Employee>::new());
    old.version = 1;
    snapshot::save(&old, &path).unwrap();

    let state = AppState::load_or_seed(path);
    assert_eq!(state.store.len(), 8);
    assert!(state.store.contains_email("roberto.lima@empresa.com"));
}

#[test]
fn e2e_config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    let data_file = dir.path().join("dados").join("rh.json");
    std::fs::write(
        &config_path,
        format!(
            "[store]\nfile = {:?}\n\n[dashboard]\nrecent_hire_days = 90\n\n[reports]\ntop_salaries = 0\n",
            data_file.display().to_string()
        ),
    )
    .unwrap();

    let (config, warnings) = load_config(&config_path);
    assert_eq!(config.store_file.as_deref(), Some(data_file.as_path()));
    assert_eq!(config.recent_hire_days, 90);
    assert_eq!(warnings.len(), 1, "{warnings:?}");

    let mut state = AppState::load_or_seed(config.store_file.clone().unwrap());
    state.delete_employee("ana.paula@empresa.com").unwrap();
    state.save().unwrap();
    assert!(data_file.exists());
}

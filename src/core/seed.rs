// StaffLedger - core/seed.rs
//
// Built-in sample dataset, used by the host only when no snapshot exists.

use crate::core::model::NewEmployee;
use crate::core::store::RecordStore;
use chrono::NaiveDate;

/// (name, email, phone, department, role, salary, admission y/m/d)
type SeedRow = (&'static str, &'static str, &'static str, &'static str, &'static str, f64, (i32, u32, u32));

const SEED: &[SeedRow] = &[
    ("João Silva", "joao.silva@empresa.com", "(11) 98765-4321", "Tecnologia", "Desenvolvedor Senior", 8500.0, (2023, 1, 15)),
    ("Maria Santos", "maria.santos@empresa.com", "(11) 98765-4322", "Vendas", "Gerente de Vendas", 12000.0, (2022, 6, 10)),
    ("Pedro Costa", "pedro.costa@empresa.com", "(11) 98765-4323", "Marketing", "Analista de Marketing", 5500.0, (2023, 8, 20)),
    ("Ana Paula", "ana.paula@empresa.com", "(11) 98765-4324", "Recursos Humanos", "Analista de RH", 6000.0, (2023, 3, 5)),
    ("Carlos Eduardo", "carlos.eduardo@empresa.com", "(11) 98765-4325", "Financeiro", "Analista Financeiro", 7000.0, (2022, 11, 12)),
    ("Julia Fernandes", "julia.fernandes@empresa.com", "(11) 98765-4326", "Tecnologia", "Desenvolvedor Pleno", 6500.0, (2024, 1, 10)),
    ("Roberto Lima", "roberto.lima@empresa.com", "(11) 98765-4327", "Operações", "Coordenador", 8000.0, (2021, 9, 15)),
    ("Fernanda Oliveira", "fernanda.oliveira@empresa.com", "(11) 98765-4328", "Vendas", "Vendedor", 3500.0, (2024, 2, 1)),
];

/// The seed employees as creation requests, in seed order.
pub fn seed_employees() -> Vec<NewEmployee> {
    SEED.iter()
        .filter_map(|&(name, email, phone, department, role, salary, (y, m, d))| {
            let admitted = NaiveDate::from_ymd_opt(y, m, d)?;
            let mut e = NewEmployee::new(name, role, department, salary, admitted).with_email(email);
            e.phone = phone.to_string();
            Some(e)
        })
        .collect()
}

/// A store holding only the seed employees.
pub fn seed_store() -> RecordStore {
    let mut store = RecordStore::new();
    for e in seed_employees() {
        if let Err(err) = store.add(e) {
            tracing::warn!(error = %err, "Seed record refused");
        }
    }
    tracing::debug!(records = store.len(), "Seed dataset loaded");
    store
}

// StaffLedger - core/mod.rs
//
// Core business logic layer.
// Dependencies: chrono, serde, csv, regex; no filesystem access.
// Must NOT depend on: platform or app.

pub mod export;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod seed;
pub mod stats;
pub mod store;

// StaffLedger - app/mod.rs
//
// Application layer: state ownership and snapshot persistence.
// Dependencies: core layer, platform::fs.

pub mod snapshot;
pub mod state;

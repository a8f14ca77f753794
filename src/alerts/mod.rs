// src/alerts/mod.rs
//! Alert records and the record-level editing engine.

pub mod changelog;
pub mod edit;
pub mod record;
pub mod validate;

pub use edit::Editor;
pub use record::{AlertRecord, AlertValue};

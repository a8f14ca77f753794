pub mod alerts;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod git;
pub mod store;
pub mod tfvars;

// src/cli/mod.rs
//! CLI command surface and handlers.

pub mod args;
pub mod dispatch;
pub mod handlers;

pub use args::Cli;

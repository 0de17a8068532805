//! CLI command handlers

pub mod commands;

pub use commands::{check_cell, check_range, lint, serve};

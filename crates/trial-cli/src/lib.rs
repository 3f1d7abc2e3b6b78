//! CLI library components for the trial console.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;

//! Subcommand handlers

pub mod config;
pub mod run;
pub mod tasks;

//! CLI command handlers
//!
//! This module contains all the command handlers for the feedback-analyzer CLI.
//! Each subcommand is implemented in its own module.

pub mod classify;
pub mod config;
pub mod crosstab;
pub mod extract;
pub mod helpers;
pub mod report;
pub mod store;

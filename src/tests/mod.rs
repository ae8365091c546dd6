//! Unit tests, grouped by module.

mod cli;
mod config;
mod error;
mod format;

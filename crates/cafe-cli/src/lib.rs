//! Cybercafe day simulator CLI library.
//!
//! This crate provides the CLI interface for the simulator: argument
//! parsing, configuration, the day-file parser and the output rendering.

mod cli;
pub mod commands;
mod config;
pub mod dayfile;

pub use cli::{Cli, Commands};
pub use config::Config;

//! auto-analytics command-line driver.
//!
//! Runs the discovery and generation pass outside of a build script, either
//! to write artifacts to a chosen directory or to list what a source tree
//! declares without writing anything.

pub mod cli;
pub mod commands;

pub use cli::{parse_args, CliError, Command};
pub use commands::{init_tracing, run};

//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Capture file discovery and interactive selection
//! - Output formatting (text, table, CSV)

mod args;
mod discover;
mod output;

pub use args::{Args, DEFAULT_CAPTURE_DIR};
pub use discover::{find_capture_files, is_capture_file, select_capture_file};
pub use output::{OutputFormat, OutputFormatter};

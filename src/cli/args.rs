//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use super::OutputFormat;
use crate::analysis::AnalyzerConfig;

/// Directory scanned for captures when no file is given.
pub const DEFAULT_CAPTURE_DIR: &str = "pcap_files";

/// Rank the domain names queried in a packet capture.
#[derive(Parser, Debug)]
#[command(name = "pcapdns")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Capture file to analyse (pcap, pcapng, optionally gzipped)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory to search for captures when FILE is not given
    #[arg(short = 'd', long = "dir", value_name = "DIR", default_value = DEFAULT_CAPTURE_DIR)]
    pub dir: PathBuf,

    /// Show only the N most queried domains (0 or negative for all)
    #[arg(short = 'n', long = "top", value_name = "N", allow_negative_numbers = true)]
    pub top: Option<i64>,

    /// UDP port carrying DNS (repeatable)
    #[arg(short = 'p', long = "port", value_name = "PORT", default_value = "53")]
    pub ports: Vec<u16>,

    /// Output format for stdout
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Report limit; non-positive values mean no limit.
    pub fn limit(&self) -> Option<usize> {
        self.top
            .filter(|&n| n > 0)
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            dns_ports: self.ports.clone(),
        }
    }
}

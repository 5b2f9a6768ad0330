//! pcapdns - Rank the DNS names queried in packet captures.
//!
//! This library reads legacy PCAP and PCAPNG files (optionally gzip
//! compressed), peels Ethernet/VLAN/IPv4/IPv6/UDP framing down to DNS
//! payloads, decodes the first question of every query, and counts how often
//! each name was asked for.
//!
//! # Example
//!
//! ```no_run
//! use pcapdns::analysis::{analyze_file, AnalyzerConfig};
//!
//! fn main() -> pcapdns::Result<()> {
//!     let analysis = analyze_file("capture.pcap", &AnalyzerConfig::default())?;
//!     for (domain, count) in analysis.report(Some(10)) {
//!         println!("{domain}: {count}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod io;
pub mod pcap;
pub mod protocol;

pub use error::{Error, Result};

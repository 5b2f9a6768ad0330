//! Capture file reading module.
//!
//! This module handles reading legacy PCAP and PCAPNG files and
//! exposing raw frames for parsing.

mod format;
mod legacy;
mod packet;
mod pcapng;
mod reader;

pub use format::{PcapFormat, PCAPNG_MAGIC};
pub use legacy::LegacyHeader;
pub use packet::{LinkType, RawFrame, Timestamp};
pub use pcapng::{block_type, Interface, SectionHeader};
pub use reader::{CaptureFile, CaptureHeader, Frames};

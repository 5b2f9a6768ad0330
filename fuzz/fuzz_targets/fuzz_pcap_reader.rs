//! Fuzz target for capture file parsing.
//!
//! Tests handling of malformed PCAP/PCAPNG files including:
//! - Magic byte detection
//! - Global header and section header parsing
//! - Record and block lengths (caplen, origlen, block_total_length)
//! - Endianness handling and interface tables

#![no_main]

use libfuzzer_sys::fuzz_target;
use pcapdns::analysis::{analyze_capture, AnalyzerConfig};
use pcapdns::pcap::CaptureFile;

fuzz_target!(|data: &[u8]| {
    // Header parsing - should never panic
    let Ok(capture) = CaptureFile::from_bytes(data.to_vec()) else {
        return;
    };

    // Frames never extend past the buffer
    for frame in capture.frames().flatten() {
        assert!(frame.data.len() <= capture.data().len());
        assert_eq!(frame.data.len(), frame.captured_length as usize);
    }

    // Full pipeline on whatever frames decode
    let _ = analyze_capture(&capture, &AnalyzerConfig::default());
});

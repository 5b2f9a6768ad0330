//! Capture analysis: frames in, ranked domain counts out.
//!
//! The pipeline runs in file order: container frames are peeled down to DNS
//! candidate payloads, each payload is decoded, and query names are tallied.
//! Per-frame problems are counted in [`ScanStats`] and never abort the run.

mod tally;

pub use tally::DomainTally;

use std::path::Path;

use crate::error::Result;
use crate::pcap::{CaptureFile, LinkType, RawFrame};
use crate::protocol::{self, DNS_PORT};

/// Analysis settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// UDP ports treated as DNS, matched against either endpoint.
    pub dns_ports: Vec<u16>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            dns_ports: vec![DNS_PORT],
        }
    }
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Frames read from the capture.
    pub frames: u64,
    /// Frames with no UDP payload on a DNS port.
    pub non_dns: u64,
    /// Frames on link types that are not decoded.
    pub unsupported_link: u64,
    /// DNS messages that are responses or carry no question.
    pub non_query: u64,
    /// DNS payloads that failed to decode.
    pub malformed: u64,
    /// Query names tallied.
    pub queries: u64,
    /// The frame stream ended on a container error instead of a clean end.
    pub truncated: bool,
}

/// Result of analysing one capture.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub tally: DomainTally,
    pub stats: ScanStats,
}

impl Analysis {
    /// Ranked `(domain, count)` pairs; see [`DomainTally::report`].
    pub fn report(&self, limit: Option<usize>) -> Vec<(&str, u64)> {
        self.tally.report(limit)
    }
}

/// Incremental analyzer, fed one frame at a time.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
    analysis: Analysis,
    warned_links: Vec<LinkType>,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            analysis: Analysis::default(),
            warned_links: Vec::new(),
        }
    }

    pub fn process_frame(&mut self, frame: &RawFrame<'_>) {
        let stats = &mut self.analysis.stats;
        stats.frames += 1;

        if !protocol::is_supported_link(frame.link_type) {
            stats.unsupported_link += 1;
            if !self.warned_links.contains(&frame.link_type) {
                self.warned_links.push(frame.link_type);
                tracing::warn!(
                    link_type = %frame.link_type,
                    frame = frame.frame_number,
                    "skipping frames with unsupported link type"
                );
            }
            return;
        }

        let Some(payload) = protocol::peel(frame.link_type, frame.data, &self.config.dns_ports)
        else {
            stats.non_dns += 1;
            return;
        };

        match protocol::decode_query(payload.data) {
            Ok(Some(question)) => {
                stats.queries += 1;
                tracing::trace!(
                    frame = frame.frame_number,
                    name = %question.name,
                    qtype = question.qtype,
                    "query"
                );
                self.analysis.tally.record(&question.name);
            }
            Ok(None) => stats.non_query += 1,
            Err(e) => {
                stats.malformed += 1;
                tracing::debug!(
                    frame = frame.frame_number,
                    src_port = payload.src_port,
                    dst_port = payload.dst_port,
                    error = %e,
                    "skipping malformed DNS message"
                );
            }
        }
    }

    /// Record that the frame stream stopped early.
    pub fn mark_truncated(&mut self) {
        self.analysis.stats.truncated = true;
    }

    pub fn stats(&self) -> &ScanStats {
        &self.analysis.stats
    }

    pub fn finish(self) -> Analysis {
        self.analysis
    }
}

/// Open and analyse a capture file.
///
/// Only failures to open the file or parse its header are errors; a damaged
/// frame stream yields the results gathered up to the damage.
pub fn analyze_file<P: AsRef<Path>>(path: P, config: &AnalyzerConfig) -> Result<Analysis> {
    let capture = CaptureFile::open(path)?;
    Ok(analyze_capture(&capture, config))
}

/// Analyse an opened capture.
pub fn analyze_capture(capture: &CaptureFile, config: &AnalyzerConfig) -> Analysis {
    let mut analyzer = Analyzer::new(config.clone());

    let mut frames = capture.frames();
    while let Some(result) = frames.next() {
        match result {
            Ok(frame) => analyzer.process_frame(&frame),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    offset = frames.offset(),
                    frames_read = frames.frames_read(),
                    "capture ends early, keeping frames read so far"
                );
                analyzer.mark_truncated();
            }
        }
    }

    let analysis = analyzer.finish();
    let stats = &analysis.stats;
    tracing::info!(
        frames = stats.frames,
        queries = stats.queries,
        domains = analysis.tally.len(),
        non_dns = stats.non_dns,
        non_query = stats.non_query,
        malformed = stats.malformed,
        unsupported_link = stats.unsupported_link,
        truncated = stats.truncated,
        "scan complete"
    );
    analysis
}

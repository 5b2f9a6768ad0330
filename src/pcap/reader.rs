//! Capture file reader.

use std::iter::FusedIterator;
use std::path::Path;

use super::format::PcapFormat;
use super::legacy::{LegacyHeader, LegacyRecords, GLOBAL_HEADER_LEN};
use super::packet::{LinkType, RawFrame, Timestamp};
use super::pcapng::{self, PcapNgState};
use crate::error::{Error, PcapError};
use crate::io::{ByteCursor, CaptureBuffer, Endian};

/// Header information common to both container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureHeader {
    pub format: PcapFormat,
    /// Byte order of the file (of the first section for PCAPNG).
    pub endian: Endian,
    pub version_major: u16,
    pub version_minor: u16,
    /// Snapshot length; 0 when a PCAPNG file describes no interface.
    pub snaplen: u32,
    /// Link type of the capture (of the first interface for PCAPNG).
    pub link_type: LinkType,
}

/// An opened capture: the file bytes plus the parsed header.
///
/// Frames are read lazily with [`CaptureFile::frames`] and borrow from the
/// buffer owned here.
#[derive(Debug)]
pub struct CaptureFile {
    buffer: CaptureBuffer,
    header: CaptureHeader,
}

impl CaptureFile {
    /// Open a capture file (plain or gzip) and parse its header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let buffer = CaptureBuffer::open(path)?;
        Ok(Self::from_buffer(buffer)?)
    }

    /// Parse a capture held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, PcapError> {
        Self::from_buffer(CaptureBuffer::from(data))
    }

    pub fn from_buffer(buffer: CaptureBuffer) -> Result<Self, PcapError> {
        let format = PcapFormat::detect(&buffer)?;

        let header = match format.legacy_endian() {
            Some(endian) => {
                let legacy = LegacyHeader::parse(&buffer, endian)?;
                CaptureHeader {
                    format,
                    endian,
                    version_major: legacy.version_major,
                    version_minor: legacy.version_minor,
                    snaplen: legacy.snaplen,
                    link_type: legacy.link_type,
                }
            }
            None => {
                let (section, interface) = pcapng::scan_header(&buffer)?;
                CaptureHeader {
                    format,
                    endian: section.endian,
                    version_major: section.version_major,
                    version_minor: section.version_minor,
                    snaplen: interface.map_or(0, |i| i.snaplen),
                    // Default to Ethernet until an interface says otherwise
                    link_type: interface.map_or(LinkType::Ethernet, |i| i.link_type),
                }
            }
        };

        tracing::debug!(
            format = %header.format,
            link_type = %header.link_type,
            snaplen = header.snaplen,
            bytes = buffer.len(),
            "opened capture"
        );

        Ok(Self { buffer, header })
    }

    pub fn header(&self) -> &CaptureHeader {
        &self.header
    }

    pub fn format(&self) -> PcapFormat {
        self.header.format
    }

    pub fn link_type(&self) -> LinkType {
        self.header.link_type
    }

    pub fn snaplen(&self) -> u32 {
        self.header.snaplen
    }

    /// Raw bytes of the whole capture.
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Iterate over the frames in file order.
    pub fn frames(&self) -> Frames<'_> {
        let mut cursor = ByteCursor::new(&self.buffer);

        let (kind, done) = match self.header.format.legacy_endian() {
            Some(endian) => {
                let units_per_second = if self.header.format.is_nanosecond() {
                    Timestamp::NANOS
                } else {
                    Timestamp::MICROS
                };
                let records = LegacyRecords {
                    endian,
                    units_per_second,
                    link_type: self.header.link_type,
                };
                let done = cursor.seek(GLOBAL_HEADER_LEN).is_err();
                (FramesKind::Legacy(records), done)
            }
            None => (FramesKind::Ng(PcapNgState::new()), false),
        };

        Frames {
            cursor,
            kind,
            next_frame_number: 1,
            done,
        }
    }
}

enum FramesKind {
    Legacy(LegacyRecords),
    Ng(PcapNgState),
}

/// Iterator over the frames of a [`CaptureFile`].
///
/// Yields `Err` at most once; after an error or the end of the buffer it only
/// returns `None`.
pub struct Frames<'a> {
    cursor: ByteCursor<'a>,
    kind: FramesKind,
    next_frame_number: u64,
    done: bool,
}

impl Frames<'_> {
    /// Number of frames yielded so far.
    pub fn frames_read(&self) -> u64 {
        self.next_frame_number - 1
    }

    /// Byte offset of the next record or block.
    pub fn offset(&self) -> usize {
        self.cursor.position()
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<RawFrame<'a>, PcapError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let frame_number = self.next_frame_number;
        let result = match &mut self.kind {
            FramesKind::Legacy(records) => records.next_frame(&mut self.cursor, frame_number),
            FramesKind::Ng(state) => state.next_frame(&mut self.cursor, frame_number),
        };

        match result {
            Ok(Some(frame)) => {
                self.next_frame_number += 1;
                Some(Ok(frame))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Frames<'_> {}

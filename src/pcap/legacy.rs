//! Legacy (libpcap) file format.
//!
//! ```text
//! global header (24 bytes)
//!   magic u32 | version_major u16 | version_minor u16 | thiszone i32
//!   sigfigs u32 | snaplen u32 | network u32
//! record header (16 bytes), repeated
//!   ts_sec u32 | ts_frac u32 | incl_len u32 | orig_len u32
//! ```

use super::packet::{LinkType, RawFrame, Timestamp};
use crate::error::PcapError;
use crate::io::{ByteCursor, Endian};

pub(crate) const GLOBAL_HEADER_LEN: usize = 24;
pub(crate) const RECORD_HEADER_LEN: usize = 16;

/// Decoded legacy global header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyHeader {
    pub version_major: u16,
    pub version_minor: u16,
    pub thiszone: i32,
    pub sigfigs: u32,
    pub snaplen: u32,
    pub link_type: LinkType,
}

impl LegacyHeader {
    /// Parse the global header at the start of `data`.
    pub(crate) fn parse(data: &[u8], endian: Endian) -> Result<Self, PcapError> {
        if data.len() < GLOBAL_HEADER_LEN {
            return Err(PcapError::TruncatedCapture {
                offset: 0,
                needed: GLOBAL_HEADER_LEN,
                available: data.len(),
            });
        }

        let mut cursor = ByteCursor::new(data);
        cursor.skip(4)?; // magic, already checked by format detection
        let version_major = cursor.read_u16(endian)?;
        let version_minor = cursor.read_u16(endian)?;
        let thiszone = cursor.read_u32(endian)? as i32;
        let sigfigs = cursor.read_u32(endian)?;
        let snaplen = cursor.read_u32(endian)?;
        let network = cursor.read_u32(endian)?;

        Ok(Self {
            version_major,
            version_minor,
            thiszone,
            sigfigs,
            snaplen,
            link_type: LinkType::from_code(network),
        })
    }
}

/// Per-stream settings for reading legacy records.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LegacyRecords {
    pub endian: Endian,
    pub units_per_second: u64,
    pub link_type: LinkType,
}

impl LegacyRecords {
    /// Read the record at the cursor position.
    ///
    /// Returns `Ok(None)` at a clean end of buffer. A record header or
    /// payload that runs past the end is `TruncatedCapture`.
    pub(crate) fn next_frame<'a>(
        &self,
        cursor: &mut ByteCursor<'a>,
        frame_number: u64,
    ) -> Result<Option<RawFrame<'a>>, PcapError> {
        if cursor.remaining() == 0 {
            return Ok(None);
        }

        let record_start = cursor.position();
        if cursor.remaining() < RECORD_HEADER_LEN {
            return Err(PcapError::TruncatedCapture {
                offset: record_start,
                needed: RECORD_HEADER_LEN,
                available: cursor.remaining(),
            });
        }

        let ts_sec = cursor.read_u32(self.endian)?;
        let ts_frac = cursor.read_u32(self.endian)?;
        let captured_length = cursor.read_u32(self.endian)?;
        let original_length = cursor.read_u32(self.endian)?;

        let data_start = cursor.position();
        let data = cursor
            .read_bytes(captured_length as usize)
            .map_err(|_| PcapError::TruncatedCapture {
                offset: data_start,
                needed: captured_length as usize,
                available: cursor.remaining(),
            })?;

        Ok(Some(RawFrame {
            frame_number,
            timestamp: Timestamp {
                seconds: ts_sec as u64,
                fraction: ts_frac as u64,
                units_per_second: self.units_per_second,
            },
            captured_length,
            original_length,
            link_type: self.link_type,
            data,
        }))
    }
}

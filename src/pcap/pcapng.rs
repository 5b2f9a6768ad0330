//! PCAPNG block stream.
//!
//! Every block is framed as
//!
//! ```text
//! block_type u32 | block_total_length u32 | body ... | block_total_length u32
//! ```
//!
//! in the byte order declared by the enclosing Section Header Block. Only the
//! blocks needed to recover packets are interpreted; everything else is
//! skipped by its declared length.

use super::format::PCAPNG_MAGIC;
use super::packet::{LinkType, RawFrame, Timestamp};
use crate::error::{OutOfBounds, PcapError};
use crate::io::{ByteCursor, Endian};

/// PCAPNG block type codes.
pub mod block_type {
    pub const SECTION_HEADER: u32 = 0x0a0d0d0a;
    pub const INTERFACE_DESCRIPTION: u32 = 0x0000_0001;
    pub const OBSOLETE_PACKET: u32 = 0x0000_0002;
    pub const SIMPLE_PACKET: u32 = 0x0000_0003;
    pub const NAME_RESOLUTION: u32 = 0x0000_0004;
    pub const INTERFACE_STATISTICS: u32 = 0x0000_0005;
    pub const ENHANCED_PACKET: u32 = 0x0000_0006;
}

const BYTE_ORDER_MAGIC: u32 = 0x1a2b3c4d;

/// type + length + trailing length
const MIN_BLOCK_LEN: usize = 12;

const OPT_ENDOFOPT: u16 = 0;
const OPT_IF_TSRESOL: u16 = 9;

/// Fields of a Section Header Block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub endian: Endian,
    pub version_major: u16,
    pub version_minor: u16,
}

/// Fields of an Interface Description Block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interface {
    pub link_type: LinkType,
    pub snaplen: u32,
    /// Timestamp resolution from `if_tsresol`, default microseconds.
    pub units_per_second: u64,
}

/// A framed block whose body has not been interpreted yet.
#[derive(Debug, Clone, Copy)]
struct RawBlock<'a> {
    block_type: u32,
    offset: usize,
    body: &'a [u8],
}

impl RawBlock<'_> {
    fn invalid(&self, reason: impl Into<String>) -> PcapError {
        PcapError::InvalidBlock {
            offset: self.offset,
            reason: reason.into(),
        }
    }

    fn short_body(&self, err: OutOfBounds) -> PcapError {
        self.invalid(format!(
            "block type 0x{:08x} body too short ({err})",
            self.block_type
        ))
    }
}

/// Reader state that persists between blocks: the current section's byte
/// order and its interface table.
#[derive(Debug, Clone)]
pub(crate) struct PcapNgState {
    endian: Endian,
    section: Option<SectionHeader>,
    interfaces: Vec<Interface>,
}

impl PcapNgState {
    pub(crate) fn new() -> Self {
        Self {
            endian: Endian::Little,
            section: None,
            interfaces: Vec::new(),
        }
    }

    /// Read blocks until the next packet block and return its frame.
    pub(crate) fn next_frame<'a>(
        &mut self,
        cursor: &mut ByteCursor<'a>,
        frame_number: u64,
    ) -> Result<Option<RawFrame<'a>>, PcapError> {
        while let Some(block) = self.read_block(cursor)? {
            match block.block_type {
                block_type::SECTION_HEADER => self.on_section_header(&block)?,
                block_type::INTERFACE_DESCRIPTION => self.on_interface(&block)?,
                block_type::ENHANCED_PACKET => {
                    return self.enhanced_packet(&block, frame_number).map(Some)
                }
                block_type::SIMPLE_PACKET => {
                    return self.simple_packet(&block, frame_number).map(Some)
                }
                block_type::OBSOLETE_PACKET => {
                    return self.obsolete_packet(&block, frame_number).map(Some)
                }
                other => {
                    tracing::trace!(
                        block_type = format_args!("0x{other:08x}"),
                        offset = block.offset,
                        "skipping pcapng block"
                    );
                }
            }
        }
        Ok(None)
    }

    /// Frame the next block. A Section Header Block switches the byte order
    /// before its length is read.
    fn read_block<'a>(
        &mut self,
        cursor: &mut ByteCursor<'a>,
    ) -> Result<Option<RawBlock<'a>>, PcapError> {
        let start = cursor.position();
        let remaining = cursor.remaining();
        if remaining == 0 {
            return Ok(None);
        }
        if remaining < MIN_BLOCK_LEN {
            return Err(PcapError::TruncatedCapture {
                offset: start,
                needed: MIN_BLOCK_LEN,
                available: remaining,
            });
        }

        if cursor.peek_at(start, 4)? == PCAPNG_MAGIC.to_le_bytes() {
            let bom = cursor.peek_at(start + 8, 4)?;
            self.endian = match u32::from_le_bytes([bom[0], bom[1], bom[2], bom[3]]) {
                BYTE_ORDER_MAGIC => Endian::Little,
                m if m == BYTE_ORDER_MAGIC.swap_bytes() => Endian::Big,
                m => {
                    return Err(PcapError::InvalidBlock {
                        offset: start,
                        reason: format!("bad byte-order magic 0x{m:08x}"),
                    })
                }
            };
        }

        let block_type = cursor.read_u32(self.endian)?;
        let total_len = cursor.read_u32(self.endian)? as usize;

        if total_len < MIN_BLOCK_LEN || total_len % 4 != 0 {
            return Err(PcapError::InvalidBlock {
                offset: start,
                reason: format!("invalid block length {total_len}"),
            });
        }
        if total_len > remaining {
            return Err(PcapError::TruncatedCapture {
                offset: start,
                needed: total_len,
                available: remaining,
            });
        }

        let body = cursor.read_bytes(total_len - MIN_BLOCK_LEN)?;
        let trailer = cursor.read_u32(self.endian)? as usize;
        if trailer != total_len {
            return Err(PcapError::InvalidBlock {
                offset: start,
                reason: format!("trailing length {trailer} does not match {total_len}"),
            });
        }

        Ok(Some(RawBlock {
            block_type,
            offset: start,
            body,
        }))
    }

    fn on_section_header(&mut self, block: &RawBlock<'_>) -> Result<(), PcapError> {
        let mut body = ByteCursor::new(block.body);
        let parse = |body: &mut ByteCursor<'_>| -> Result<(u16, u16), OutOfBounds> {
            body.skip(4)?; // byte-order magic
            let major = body.read_u16(self.endian)?;
            let minor = body.read_u16(self.endian)?;
            body.skip(8)?; // section length, usually -1
            Ok((major, minor))
        };
        let (version_major, version_minor) =
            parse(&mut body).map_err(|e| block.short_body(e))?;

        if version_major != 1 {
            return Err(block.invalid(format!(
                "unsupported pcapng version {version_major}.{version_minor}"
            )));
        }

        self.section = Some(SectionHeader {
            endian: self.endian,
            version_major,
            version_minor,
        });
        // Interface ids are scoped to their section
        self.interfaces.clear();
        Ok(())
    }

    fn on_interface(&mut self, block: &RawBlock<'_>) -> Result<(), PcapError> {
        let endian = self.endian;
        let mut body = ByteCursor::new(block.body);
        let parse = |body: &mut ByteCursor<'_>| -> Result<(u16, u32), OutOfBounds> {
            let link_type = body.read_u16(endian)?;
            body.skip(2)?; // reserved
            let snaplen = body.read_u32(endian)?;
            Ok((link_type, snaplen))
        };
        let (link_type, snaplen) = parse(&mut body).map_err(|e| block.short_body(e))?;

        let units_per_second = interface_tsresol(&mut body, endian).unwrap_or(Timestamp::MICROS);

        self.interfaces.push(Interface {
            link_type: LinkType::from_code(link_type as u32),
            snaplen,
            units_per_second,
        });
        Ok(())
    }

    fn interface(&self, block: &RawBlock<'_>, id: usize) -> Result<Interface, PcapError> {
        self.interfaces
            .get(id)
            .copied()
            .ok_or_else(|| block.invalid(format!("packet references unknown interface {id}")))
    }

    fn enhanced_packet<'a>(
        &self,
        block: &RawBlock<'a>,
        frame_number: u64,
    ) -> Result<RawFrame<'a>, PcapError> {
        let endian = self.endian;
        let mut body = ByteCursor::new(block.body);
        let parse = |body: &mut ByteCursor<'a>| -> Result<_, OutOfBounds> {
            let interface_id = body.read_u32(endian)?;
            let ts_high = body.read_u32(endian)?;
            let ts_low = body.read_u32(endian)?;
            let captured_length = body.read_u32(endian)?;
            let original_length = body.read_u32(endian)?;
            Ok((interface_id, ts_high, ts_low, captured_length, original_length))
        };
        let (interface_id, ts_high, ts_low, captured_length, original_length) =
            parse(&mut body).map_err(|e| block.short_body(e))?;

        let interface = self.interface(block, interface_id as usize)?;
        let data = body.read_bytes(captured_length as usize).map_err(|_| {
            block.invalid(format!(
                "captured length {captured_length} exceeds block body"
            ))
        })?;

        let ticks = ((ts_high as u64) << 32) | ts_low as u64;
        Ok(RawFrame {
            frame_number,
            timestamp: Timestamp::from_ticks(ticks, interface.units_per_second),
            captured_length,
            original_length,
            link_type: interface.link_type,
            data,
        })
    }

    fn simple_packet<'a>(
        &self,
        block: &RawBlock<'a>,
        frame_number: u64,
    ) -> Result<RawFrame<'a>, PcapError> {
        let interface = self.interface(block, 0)?;
        let mut body = ByteCursor::new(block.body);
        let original_length = body
            .read_u32(self.endian)
            .map_err(|e| block.short_body(e))?;

        // No captured length field: bounded by snaplen and the padded body
        let mut captured = (original_length as usize).min(body.remaining());
        if interface.snaplen > 0 {
            captured = captured.min(interface.snaplen as usize);
        }
        let data = body.read_bytes(captured)?;

        Ok(RawFrame {
            frame_number,
            timestamp: Timestamp {
                seconds: 0,
                fraction: 0,
                units_per_second: interface.units_per_second,
            },
            captured_length: captured as u32,
            original_length,
            link_type: interface.link_type,
            data,
        })
    }

    fn obsolete_packet<'a>(
        &self,
        block: &RawBlock<'a>,
        frame_number: u64,
    ) -> Result<RawFrame<'a>, PcapError> {
        let endian = self.endian;
        let mut body = ByteCursor::new(block.body);
        let parse = |body: &mut ByteCursor<'a>| -> Result<_, OutOfBounds> {
            let interface_id = body.read_u16(endian)?;
            body.skip(2)?; // drops count
            let ts_high = body.read_u32(endian)?;
            let ts_low = body.read_u32(endian)?;
            let captured_length = body.read_u32(endian)?;
            let original_length = body.read_u32(endian)?;
            Ok((interface_id, ts_high, ts_low, captured_length, original_length))
        };
        let (interface_id, ts_high, ts_low, captured_length, original_length) =
            parse(&mut body).map_err(|e| block.short_body(e))?;

        let interface = self.interface(block, interface_id as usize)?;
        let data = body.read_bytes(captured_length as usize).map_err(|_| {
            block.invalid(format!(
                "captured length {captured_length} exceeds block body"
            ))
        })?;

        let ticks = ((ts_high as u64) << 32) | ts_low as u64;
        Ok(RawFrame {
            frame_number,
            timestamp: Timestamp::from_ticks(ticks, interface.units_per_second),
            captured_length,
            original_length,
            link_type: interface.link_type,
            data,
        })
    }
}

/// Read the leading blocks of a PCAPNG buffer: the first Section Header
/// Block (required) and the first Interface Description Block, if one comes
/// before any packet.
pub(crate) fn scan_header(data: &[u8]) -> Result<(SectionHeader, Option<Interface>), PcapError> {
    let mut state = PcapNgState::new();
    let mut cursor = ByteCursor::new(data);

    let first = state
        .read_block(&mut cursor)?
        .ok_or(PcapError::TruncatedCapture {
            offset: 0,
            needed: MIN_BLOCK_LEN,
            available: 0,
        })?;
    state.on_section_header(&first)?;
    let section = state.section.ok_or_else(|| first.invalid("missing section header"))?;

    // A broken block after the section header is reported again when the
    // frames are streamed; here it only ends the search.
    while let Ok(Some(block)) = state.read_block(&mut cursor) {
        match block.block_type {
            block_type::INTERFACE_DESCRIPTION => {
                if state.on_interface(&block).is_ok() {
                    return Ok((section, state.interfaces.first().copied()));
                }
                break;
            }
            block_type::ENHANCED_PACKET
            | block_type::SIMPLE_PACKET
            | block_type::OBSOLETE_PACKET
            | block_type::SECTION_HEADER => break,
            _ => continue,
        }
    }

    Ok((section, None))
}

/// Find `if_tsresol` in an IDB option list.
fn interface_tsresol(options: &mut ByteCursor<'_>, endian: Endian) -> Option<u64> {
    while options.remaining() >= 4 {
        let code = options.read_u16(endian).ok()?;
        let len = options.read_u16(endian).ok()? as usize;
        if code == OPT_ENDOFOPT {
            return None;
        }
        let value = options.read_bytes(len).ok()?;
        // Values are padded to 32 bits
        let padding = (4 - len % 4) % 4;
        if code == OPT_IF_TSRESOL {
            return value.first().and_then(|&v| tsresol_units(v));
        }
        options.skip(padding.min(options.remaining())).ok()?;
    }
    None
}

/// Units per second for an `if_tsresol` value: the high bit selects a power
/// of two, otherwise a power of ten.
fn tsresol_units(value: u8) -> Option<u64> {
    let exponent = (value & 0x7f) as u32;
    if value & 0x80 != 0 {
        1u64.checked_shl(exponent)
    } else {
        10u64.checked_pow(exponent)
    }
}

//! Byte-level I/O.
//!
//! - [`ByteCursor`] - bounds-checked reads used by every parser in the crate
//! - [`CaptureBuffer`] - the whole capture file in memory (mmap or owned)
//! - [`Compression`] - gzip detection and decompression

mod cursor;
mod decompress;
mod source;

pub use cursor::{ByteCursor, Endian};
pub use decompress::Compression;
pub use source::CaptureBuffer;

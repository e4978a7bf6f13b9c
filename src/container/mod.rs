//! Versioned wrapper around the raw LZW stream.
//!
//! The raw stream carries no dimensions. The container puts a small fixed header in front of it
//! so a compressed file can be decoded on its own:
//!
//! | bytes | field                                   |
//! |-------|-----------------------------------------|
//! | 4     | magic `LZWG`                            |
//! | 1     | format version (currently 1)            |
//! | 4     | rows, big endian u32                    |
//! | 4     | columns, big endian u32                 |
//! | 8     | original byte count, big endian u64     |
//! | ...   | raw LZW stream, as made by `lzw::encode` |
//!
//! The byte count is always rows * columns; it is stored so a damaged header is caught before
//! decoding starts.
//!
use log::{debug, error};

use crate::error::{LzwError, Result};
use crate::image::GrayImage;
use crate::lzw;

pub type Magic = [u8; 4];
pub const MAGIC: Magic = *b"LZWG";
pub const LATEST_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 4 + 1 + 4 + 4 + 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub rows: u32,
    pub cols: u32,
    pub byte_count: u64,
}

impl Header {
    /// Header for an image, failing if either dimension does not fit in a u32.
    pub fn for_image(img: &GrayImage) -> Result<Self> {
        let dim = |n: usize, name: &str| {
            u32::try_from(n)
                .map_err(|_| LzwError::BadHeader(format!("{} {} does not fit in 32 bits", name, n)))
        };
        Ok(Self {
            version: LATEST_VERSION,
            rows: dim(img.rows(), "rows")?,
            cols: dim(img.cols(), "cols")?,
            byte_count: img.len() as u64,
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.push(self.version);
        out.extend_from_slice(&self.rows.to_be_bytes());
        out.extend_from_slice(&self.cols.to_be_bytes());
        out.extend_from_slice(&self.byte_count.to_be_bytes());
    }

    /// Parse and check the header, returning it with the stream that follows.
    pub fn read(bytes: &[u8]) -> Result<(Self, &[u8])> {
        if bytes.len() < HEADER_LEN {
            if bytes.len() >= 4 && bytes[..4] != MAGIC {
                return Err(LzwError::BadMagic);
            }
            return Err(LzwError::BadHeader(format!(
                "need {} header bytes, found {}",
                HEADER_LEN,
                bytes.len()
            )));
        }
        if bytes[..4] != MAGIC {
            error!("Fatal error: not a valid lzwgray container.");
            return Err(LzwError::BadMagic);
        }
        let version = bytes[4];
        if version == 0 || version > LATEST_VERSION {
            return Err(LzwError::UnsupportedVersion(version));
        }
        let rows = u32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
        let cols = u32::from_be_bytes([bytes[9], bytes[10], bytes[11], bytes[12]]);
        let mut count = [0_u8; 8];
        count.copy_from_slice(&bytes[13..HEADER_LEN]);
        let byte_count = u64::from_be_bytes(count);

        if rows as u64 * cols as u64 != byte_count {
            return Err(LzwError::BadHeader(format!(
                "{} x {} does not match byte count {}",
                rows, cols, byte_count
            )));
        }
        let header = Self {
            version,
            rows,
            cols,
            byte_count,
        };
        debug!("Found container header {:?}", header);
        Ok((header, &bytes[HEADER_LEN..]))
    }
}

/// Compress an image into a self-describing container.
pub fn wrap(img: &GrayImage) -> Result<Vec<u8>> {
    let header = Header::for_image(img)?;
    let stream = lzw::encode(img.data());
    let mut out = Vec::with_capacity(HEADER_LEN + stream.len());
    header.write(&mut out);
    out.extend_from_slice(&stream);
    Ok(out)
}

/// Decompress a container back into the image it was made from.
pub fn unwrap(bytes: &[u8]) -> Result<GrayImage> {
    let (header, stream) = Header::read(bytes)?;
    let (rows, cols) = (header.rows as usize, header.cols as usize);
    let data = lzw::decode(stream, rows, cols)?;
    GrayImage::new(rows, cols, data)
}

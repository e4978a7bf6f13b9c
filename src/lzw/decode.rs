use log::{debug, trace, warn};

use super::{capacity, START_WIDTH};
use crate::bitstream::bitreader::BitReader;
use crate::error::{LzwError, Result};

/// Marks a literal entry, which has no prefix.
const NO_PREFIX: u32 = u32::MAX;

/// One dictionary sequence, stored as its prefix code plus the byte that ends it.
#[derive(Clone, Copy, Debug)]
struct Entry {
    prefix: u32,
    last: u8,
    first: u8,
    len: u32,
}

/// Decoder side dictionary: an arena of entries addressed by code.
pub(crate) struct ReverseDict {
    entries: Vec<Entry>,
    pub(crate) width: u32,
}

impl ReverseDict {
    pub(crate) fn new() -> Self {
        let mut entries = Vec::with_capacity(4096);
        entries.extend((0..=255_u8).map(|b| Entry {
            prefix: NO_PREFIX,
            last: b,
            first: b,
            len: 1,
        }));
        Self {
            entries,
            width: START_WIDTH,
        }
    }

    pub(crate) fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    fn contains(&self, code: u32) -> bool {
        (code as usize) < self.entries.len()
    }

    /// First byte of a known code.
    fn first(&self, code: u32) -> u8 {
        self.entries[code as usize].first
    }

    /// Append the sequence for a known code to `out`, walking the prefix chain back to front.
    fn append(&self, code: u32, out: &mut Vec<u8>) {
        let start = out.len();
        out.resize(start + self.entries[code as usize].len as usize, 0);
        let mut idx = out.len();
        let mut cur = code;
        while idx > start {
            let entry = &self.entries[cur as usize];
            idx -= 1;
            out[idx] = entry.last;
            cur = entry.prefix;
        }
    }

    /// Add prefix + byte as the next code, then widen once the next code reaches capacity.
    /// Mirrors the encoder one code later.
    pub(crate) fn insert(&mut self, prefix: u32, byte: u8) {
        if (self.next_code() as u64) < capacity(self.width) {
            let parent = self.entries[prefix as usize];
            self.entries.push(Entry {
                prefix,
                last: byte,
                first: parent.first,
                len: parent.len + 1,
            });
        }
        if self.next_code() as u64 >= capacity(self.width) {
            self.width += 1;
            trace!("Code width grows to {} at code {}", self.width, self.next_code());
        }
    }
}

/// Decompress a raw stream made by encode() into exactly `rows * cols` bytes.
///
/// The stream carries no dimensions, so they must match the image that was encoded. A code that
/// the dictionary can not explain is a `DecodeCorruption` error. A stream that runs out before
/// the image is full is a `TruncatedStream` error when it stops part way through a code (or is
/// empty), and a `SizeMismatch` error when only zero padding is left. Decoding stops as soon as
/// the image is full, so codes past the extent are never read.
pub fn decode(data: &[u8], rows: usize, cols: usize) -> Result<Vec<u8>> {
    let expected = rows.checked_mul(cols).ok_or(LzwError::SizeMismatch {
        expected: usize::MAX,
        decoded: 0,
    })?;

    let mut dict = ReverseDict::new();
    let mut br = BitReader::new(data);
    // The extent comes from the caller (or a header), so don't trust it for the allocation.
    let mut out: Vec<u8> = Vec::with_capacity(expected.min(1 << 24));

    // The first code must be a literal, since nothing else is defined yet.
    if let Some(first) = br.code(dict.width) {
        if !dict.contains(first) {
            return Err(LzwError::DecodeCorruption {
                code: first,
                next_code: dict.next_code(),
            });
        }
        dict.append(first, &mut out);

        // The previous code read (s). Every new entry is s plus the first byte of what follows.
        let mut prev = first;
        // Stop once the image is full; what follows can only be dropped.
        while out.len() < expected {
            let code = match br.code(dict.width) {
                Some(code) => code,
                None => break,
            };
            let entry_start = out.len();
            if dict.contains(code) {
                dict.append(code, &mut out);
            } else if code == dict.next_code() {
                // Code not defined yet: it can only be s + s[0].
                dict.append(prev, &mut out);
                out.push(dict.first(prev));
            } else {
                warn!("Invalid code {} at {}", code, br.loc());
                return Err(LzwError::DecodeCorruption {
                    code,
                    next_code: dict.next_code(),
                });
            }
            dict.insert(prev, out[entry_start]);
            prev = code;
        }
    }

    debug!(
        "Decoded {} bytes into {} bytes. {} dictionary entries, final width {} bits.",
        data.len(),
        out.len(),
        dict.next_code(),
        dict.width
    );

    if out.len() < expected {
        // Padding is under 8 zero bits. A whole byte, or any set bit, is part of a cut code.
        return Err(if data.is_empty() || br.pending_bits() >= 8 || !br.pending_is_zero() {
            LzwError::TruncatedStream {
                expected,
                decoded: out.len(),
            }
        } else {
            LzwError::SizeMismatch {
                expected,
                decoded: out.len(),
            }
        });
    }
    if out.len() > expected {
        debug!("Dropping {} bytes past the image extent", out.len() - expected);
        out.truncate(expected);
    }
    Ok(out)
}

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::{capacity, FIRST_CODE, START_WIDTH};
use crate::bitstream::bitpacker::BitPacker;

/// Encoder side dictionary. A sequence is known by the code of its prefix plus its last byte,
/// so matching never builds or hashes whole strings.
pub(crate) struct ForwardDict {
    map: FxHashMap<(u32, u8), u32>,
    pub(crate) next_code: u32,
    pub(crate) width: u32,
}

impl ForwardDict {
    /// Literal bytes are implicit (byte b is code b), only multi-byte sequences are stored.
    pub(crate) fn new(size_hint: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(size_hint.min(1 << 20), Default::default()),
            next_code: FIRST_CODE,
            width: START_WIDTH,
        }
    }

    pub(crate) fn get(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.map.get(&(prefix, byte)).copied()
    }

    /// Add prefix + byte under the next free code, widening codes once the dictionary no longer
    /// fits the current width.
    pub(crate) fn insert(&mut self, prefix: u32, byte: u8) {
        self.map.insert((prefix, byte), self.next_code);
        self.next_code += 1;
        if self.next_code as u64 > capacity(self.width) {
            self.width += 1;
            trace!("Code width grows to {} at code {}", self.width, self.next_code);
        }
    }
}

/// Compress a flat byte buffer. Returns the packed codes with no header; an empty input gives
/// an empty output.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut dict = ForwardDict::new(data.len());
    // Mostly 9-12 bit codes over about half as many codes as bytes, so this rarely reallocates.
    let mut bp = BitPacker::new(data.len() * 3 / 4 + 2);

    // The code of the longest match so far (omega). None until the first byte is seen.
    let mut omega: Option<u32> = None;
    for &byte in data {
        omega = match omega {
            None => Some(byte as u32),
            Some(prefix) => match dict.get(prefix, byte) {
                Some(code) => Some(code),
                None => {
                    bp.out_code(prefix, dict.width);
                    dict.insert(prefix, byte);
                    Some(byte as u32)
                }
            },
        };
    }
    if let Some(code) = omega {
        bp.out_code(code, dict.width);
    }
    debug!(
        "Encoded {} bytes, codes end at {}. {} dictionary entries, final width {} bits.",
        data.len(),
        bp.loc(),
        dict.next_code,
        dict.width
    );
    bp.flush();
    bp.output
}

#[cfg(test)]
mod test {
    use super::{encode, ForwardDict};
    use crate::lzw::{capacity, width_for, FIRST_CODE, START_WIDTH};

    #[test]
    fn dict_growth_test() {
        let mut dict = ForwardDict::new(0);
        let mut last_width = dict.width;
        for i in 0..3000_u32 {
            // Width only ever grows, and never more than the codes defined need.
            dict.insert(i, (i % 251) as u8);
            assert!(dict.width >= last_width);
            assert_eq!(dict.width, width_for(dict.next_code - 1));
            assert!(dict.next_code as u64 <= capacity(dict.width));
            last_width = dict.width;
        }
        assert_eq!(dict.next_code, FIRST_CODE + 3000);
    }

    #[test]
    fn width_switch_point_test() {
        let mut dict = ForwardDict::new(0);
        // Codes 256..=511 fit in 9 bits; inserting code 512 makes the next one 10 bits.
        for i in 0..256_u32 {
            dict.insert(i, 0);
        }
        assert_eq!(dict.next_code, 512);
        assert_eq!(dict.width, START_WIDTH);
        dict.insert(300, 1);
        assert_eq!(dict.next_code, 513);
        assert_eq!(dict.width, 10);
    }

    #[test]
    fn lookup_test() {
        let mut dict = ForwardDict::new(4);
        assert_eq!(dict.get(65, 66), None);
        dict.insert(65, 66);
        assert_eq!(dict.get(65, 66), Some(FIRST_CODE));
        dict.insert(FIRST_CODE, 67);
        assert_eq!(dict.get(FIRST_CODE, 67), Some(FIRST_CODE + 1));
    }

    #[test]
    fn abab_test() {
        // a b ab aba -> 97, 98, 256, 258
        let packed = encode(b"abababa");
        let expect = 97_u64 | 98_u64 << 9 | 256_u64 << 18 | 258_u64 << 27;
        assert_eq!(packed, expect.to_le_bytes()[..5].to_vec());
    }
}

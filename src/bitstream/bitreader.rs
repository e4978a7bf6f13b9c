//! BitReader: reads variable width codes back out of a packed LZW stream.
//!
//! The reader works over a borrowed slice, since the codec takes the whole compressed buffer
//! at once. Bytes are pulled into the queue one at a time and only when the queue holds fewer
//! bits than the code being asked for.
//!

/// Reads LSB-first packed codes from a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    source: &'a [u8],
    cursor: usize,
    queue: u64,
    q_bits: u32,
}

impl<'a> BitReader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            cursor: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Return the next `width` bit code, or None when the stream does not hold that many bits.
    /// Running out of data is the normal end of stream; the leftover bits stay queued so the
    /// caller can tell padding from a cut-off code with pending_bits() and pending_is_zero().
    pub fn code(&mut self, width: u32) -> Option<u32> {
        debug_assert!((1..=32).contains(&width));
        while self.q_bits < width {
            let byte = *self.source.get(self.cursor)?;
            self.queue |= (byte as u64) << self.q_bits;
            self.cursor += 1;
            self.q_bits += 8;
        }
        let code = (self.queue & ((1_u64 << width) - 1)) as u32;
        self.queue >>= width;
        self.q_bits -= width;
        Some(code)
    }

    /// Bits not yet handed out as codes, queued or still in the source.
    pub fn pending_bits(&self) -> usize {
        self.q_bits as usize + (self.source.len() - self.cursor) * 8
    }

    /// True when every bit not yet handed out is 0, as the padding after the last code is.
    pub fn pending_is_zero(&self) -> bool {
        self.queue == 0 && self.source[self.cursor..].iter().all(|&b| b == 0)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.q_bits)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;
    use crate::bitstream::bitpacker::BitPacker;

    #[test]
    fn basic_test() {
        let x = [0x41_u8, 0x00, 0x02];
        let mut br = BitReader::new(&x);
        assert_eq!(br.code(9), Some(0x41));
        assert_eq!(br.code(9), Some(0x100));
        assert_eq!(br.code(9), None);
        assert_eq!(br.pending_bits(), 6);
        assert!(br.pending_is_zero());
    }

    #[test]
    fn pending_is_zero_test() {
        // 0x41 then 6 bits of 0b100011
        let x = [0x41_u8, 0x46, 0x00];
        let mut br = BitReader::new(&x);
        assert!(!br.pending_is_zero());
        assert_eq!(br.code(9), Some(0x41));
        assert_eq!(br.code(9), Some(0x23));
        assert_eq!(br.code(9), None);
        assert_eq!(br.pending_bits(), 6);
        assert!(br.pending_is_zero());

        let mut br = BitReader::new(&x[..2]);
        assert_eq!(br.code(9), Some(0x41));
        assert_eq!(br.code(9), None);
        assert_eq!(br.pending_bits(), 7);
        assert!(!br.pending_is_zero());
    }

    #[test]
    fn mixed_width_test() {
        let mut bp = BitPacker::new(16);
        let codes = [(5_u32, 9_u32), (511, 9), (512, 10), (1000, 10), (2047, 11), (70_000, 17)];
        codes.iter().for_each(|&(c, w)| bp.out_code(c, w));
        bp.flush();

        let mut br = BitReader::new(&bp.output);
        for &(c, w) in codes.iter() {
            assert_eq!(br.code(w), Some(c));
        }
        assert!(br.pending_bits() < 8);
        assert_eq!(br.code(9), None);
    }

    #[test]
    fn short_source_test() {
        let x = [0xff_u8];
        let mut br = BitReader::new(&x);
        assert_eq!(br.code(9), None);
        assert_eq!(br.pending_bits(), 8);
        assert_eq!(br.loc(), "[1.8]");
        assert!(!br.pending_is_zero());
    }

    #[test]
    fn empty_source_test() {
        let mut br = BitReader::new(&[]);
        assert_eq!(br.code(9), None);
        assert_eq!(br.pending_bits(), 0);
        assert!(br.pending_is_zero());
    }
}

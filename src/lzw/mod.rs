//! The lzw module holds the codec itself: an adaptive Lempel-Ziv-Welch coder over a flat buffer
//! of grayscale bytes.
//!
//! Compression happens in the following steps:
//! - Seed a dictionary with the 256 single byte sequences (codes 0-255).
//! - Grow the longest match against the dictionary one input byte at a time.
//! - When the match can not grow, emit its code, add match + next byte under the next free code,
//!   and restart the match at that byte.
//! - Pack the codes into bytes. Codes start at 9 bits and get one bit wider each time the
//!   dictionary outgrows the current width.
//!
//! Decompression rebuilds the same dictionary from the codes it reads, one step behind the
//! encoder, so the dictionary itself is never sent. The stream has no header: the caller must
//! supply the rows and columns of the image. (See the container module for a wrapped format
//! that carries them.)
//!
//! Dictionaries live only for the duration of one call. Separate calls share nothing and may
//! run on separate threads.
//!
pub mod decode;
pub mod encode;

pub use decode::decode;
pub use encode::encode;

/// First code handed out for a multi-byte sequence. Codes below it are literal bytes.
pub const FIRST_CODE: u32 = 256;
/// Width of the first code written or read.
pub const START_WIDTH: u32 = 9;

/// Number of codes that fit in `width` bits.
#[inline]
pub(crate) fn capacity(width: u32) -> u64 {
    1_u64 << width
}

/// Smallest width able to address `code`.
#[cfg(test)]
pub(crate) fn width_for(code: u32) -> u32 {
    (32 - code.leading_zeros()).max(START_WIDTH)
}


#[cfg(test)]
mod test {
    use super::test_data::{gradient, noise};
    use super::{decode, encode, width_for};
    use crate::error::LzwError;

    #[test]
    fn width_for_test() {
        assert_eq!(width_for(0), 9);
        assert_eq!(width_for(511), 9);
        assert_eq!(width_for(512), 10);
        assert_eq!(width_for(1023), 10);
        assert_eq!(width_for(1024), 11);
    }

    #[test]
    fn tobeornot_test() {
        let data = b"TOBEORNOTTOBEORTOBEORNOT".to_vec();
        let packed = encode(&data);
        assert!(packed.len() < data.len());
        assert_eq!(decode(&packed, 4, 6).unwrap(), data);
    }

    #[test]
    fn run_test() {
        let data = vec![0x41_u8; 1000];
        let packed = encode(&data);
        assert!(packed.len() < 1000);
        assert_eq!(decode(&packed, 1000, 1).unwrap(), data);
    }

    #[test]
    fn distinct_test() {
        let data = (0..=255_u8).collect::<Vec<u8>>();
        let packed = encode(&data);
        // 256 nine bit codes, no repeats to exploit
        assert_eq!(packed.len(), 288);
        assert_eq!(decode(&packed, 16, 16).unwrap(), data);
    }

    #[test]
    fn width_boundary_test() {
        // Enough distinct pairs to push the width through 9 -> 10 -> 11 -> 12.
        for len in [300, 520, 1100, 4000, 20_000] {
            let data = noise(len, len as u32 + 7);
            let packed = encode(&data);
            assert_eq!(decode(&packed, len, 1).unwrap(), data, "length {}", len);
        }
    }

    #[test]
    fn gradient_test() {
        let data = gradient(64, 80);
        let packed = encode(&data);
        assert!(packed.len() < data.len());
        assert_eq!(decode(&packed, 64, 80).unwrap(), data);
    }

    #[test]
    fn single_byte_test() {
        let packed = encode(&[7]);
        assert_eq!(packed, vec![7, 0]);
        assert_eq!(decode(&packed, 1, 1).unwrap(), vec![7]);
    }

    #[test]
    fn empty_test() {
        assert!(encode(&[]).is_empty());
        assert!(decode(&[], 0, 0).unwrap().is_empty());
        assert!(decode(&[], 0, 12).unwrap().is_empty());
        assert!(matches!(
            decode(&[], 3, 4),
            Err(LzwError::TruncatedStream { expected: 12, decoded: 0 })
        ));
    }

    #[test]
    fn deterministic_test() {
        let data = gradient(32, 32);
        assert_eq!(encode(&data), encode(&data));
    }
}

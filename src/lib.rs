//! Adaptive LZW compression for 8-bit grayscale images.
//!
//! Version 0.1.0
//!
//! The codec takes a whole image buffer and returns a densely packed stream of variable width
//! codes (9 bits and up), and turns such a stream back into the image. The stream has no header,
//! so the caller keeps track of the image size:
//!
//! ```
//! let pixels = vec![0x41_u8; 1000];
//! let packed = lzwgray::encode(&pixels);
//! assert!(packed.len() < pixels.len());
//! assert_eq!(lzwgray::decode(&packed, 10, 100).unwrap(), pixels);
//! ```
//!
//! The container module wraps the stream with a small versioned header carrying the size, and
//! the lzwgray binary compresses PGM files with it:
//!
//! `$> lzwgray -z photo.pgm`
//!
//! This will compress the file and create the file photo.pgm.lzw.
//! The original file will be deleted unless -k is given.
//!
//! The codes, bit order and header are private to this crate. They are not compatible with
//! GIF, TIFF or Unix compress.
//!
pub mod bitstream;
pub mod compression;
pub mod container;
pub mod error;
pub mod image;
pub mod lzw;
pub mod tools;

pub use error::{LzwError, Result};
pub use lzw::{decode, encode};

//! The bitstream module forms the I/O subsystem for the LZW codec.
//!
//! LZW codes grow from 9 bits upward, so they never line up with byte boundaries. The packer
//! collects codes of any width into whole bytes for the encoder, and the reader peels codes of
//! the current width back off the packed bytes for the decoder.
//!
//! Both sides fill their queue least significant bit first: a new code lands in the lowest free
//! bits, and whole bytes leave from the low end. This bit order is private to this codec and is
//! not compatible with GIF, TIFF or Unix compress.
//!
pub mod bitpacker;
pub mod bitreader;

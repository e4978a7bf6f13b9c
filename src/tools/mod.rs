//! The tools module provides the helpers around the codec for the lzwgray command line tool.
//!
//! The tools are:
//! - cli: Command line interface and the options it fills in.
//! - report: Sizes, compression ratio and round trip result for one file.
//!
pub mod cli;
pub mod report;

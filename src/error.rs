//! Error type shared by the codec, the container wrapper and the image readers.

use thiserror::Error;

/// Everything that can go wrong while decoding a stream or moving images in and out.
#[derive(Debug, Error)]
pub enum LzwError {
    /// A code that is neither in the dictionary nor the next code to be defined.
    #[error("corrupt stream: code {code} read while the next free code was {next_code}")]
    DecodeCorruption { code: u32, next_code: u32 },

    /// The stream stopped in the middle of a code before the image was complete.
    #[error("truncated stream: expected {expected} bytes, decoded {decoded}")]
    TruncatedStream { expected: usize, decoded: usize },

    /// The stream ended cleanly but did not hold enough bytes for the requested extent.
    #[error("size mismatch: expected {expected} bytes, decoded {decoded}")]
    SizeMismatch { expected: usize, decoded: usize },

    #[error("not an lzwgray container (bad magic)")]
    BadMagic,

    #[error("unsupported container version (expected {} or lower, found {0})", crate::container::LATEST_VERSION)]
    UnsupportedVersion(u8),

    #[error("bad container header: {0}")]
    BadHeader(String),

    #[error("bad image: {0}")]
    BadImage(String),

    #[error("missing option: {0}")]
    MissingOption(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LzwError>;

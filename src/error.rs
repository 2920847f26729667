use alloc::string::String;
use enough::StopReason;

/// Errors from frame buffering, header parsing, and frame decoding.
///
/// Every variant is recoverable at frame granularity: drop the frame and
/// continue with the next one.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FrameError {
    #[error("allocation of {requested} bytes failed")]
    AllocationFailure { requested: usize },

    #[error("header declares {declared} payload bytes, plane layout needs {expected}")]
    FormatMismatch { declared: u32, expected: usize },

    #[error("decompressor produced {actual} of {expected} bytes")]
    DecompressionTruncated { expected: usize, actual: usize },

    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("unsupported planar format code: {0}")]
    UnsupportedFormat(i32),

    #[error("decompression failed: {0}")]
    Decompression(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("surface unavailable: {0}")]
    Surface(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for FrameError {
    fn from(r: StopReason) -> Self {
        FrameError::Cancelled(r)
    }
}

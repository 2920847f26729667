use crate::error::FrameError;

/// Planar YUV layout of a decompressed frame payload.
///
/// Wire codes: 0 = I420, 1 = I422, 2 = I444, 3 = I411.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 4:2:0, chroma halved horizontally and vertically.
    I420,
    /// 4:2:2, chroma halved horizontally.
    I422,
    /// 4:4:4, full-resolution chroma.
    I444,
    /// 4:1:1, chroma quartered horizontally.
    I411,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 4] = [Self::I420, Self::I422, Self::I444, Self::I411];

    /// Map a wire format code.
    pub fn from_code(code: i32) -> Result<Self, FrameError> {
        match code {
            0 => Ok(Self::I420),
            1 => Ok(Self::I422),
            2 => Ok(Self::I444),
            3 => Ok(Self::I411),
            other => Err(FrameError::UnsupportedFormat(other)),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::I420 => 0,
            Self::I422 => 1,
            Self::I444 => 2,
            Self::I411 => 3,
        }
    }

    /// Horizontal and vertical chroma divisors.
    pub fn subsampling(self) -> (usize, usize) {
        match self {
            Self::I420 => (2, 2),
            Self::I422 => (2, 1),
            Self::I444 => (1, 1),
            Self::I411 => (4, 1),
        }
    }
}

/// Byte order of a packed 4-byte pixel in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    /// R, G, B, A.
    Rgba,
    /// B, G, R, A.
    Bgra,
}

impl ChannelOrder {
    /// Bytes per packed pixel.
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Byte offsets of (red, green, blue, alpha) within a pixel.
    pub fn offsets(self) -> [usize; 4] {
        match self {
            Self::Rgba => [0, 1, 2, 3],
            Self::Bgra => [2, 1, 0, 3],
        }
    }

    /// The order with red and blue exchanged.
    pub fn swapped(self) -> Self {
        match self {
            Self::Rgba => Self::Bgra,
            Self::Bgra => Self::Rgba,
        }
    }
}

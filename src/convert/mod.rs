//! Planar YUV to packed 4-byte pixel conversion.
//!
//! Each [`PixelFormat`] has a [`FormatDescriptor`] naming the channel order
//! its converter writes and whether the pipeline swaps red and blue afterwards
//! to reach the fixed RGBA output order.

mod bt601;

pub use bt601::Bt601;

use enough::Stop;

use crate::error::FrameError;
use crate::layout::YuvPlanes;
use crate::pixel::{ChannelOrder, PixelFormat};

/// Channel order of every surface the pipeline produces.
pub const OUTPUT_ORDER: ChannelOrder = ChannelOrder::Rgba;

/// Converts planar YUV into packed 4-byte pixels.
///
/// Implementations write `width * height` pixels in `order` into `dst`, one
/// row every `dst_stride` bytes.
pub trait ColorConverter {
    fn convert(
        &self,
        planes: &YuvPlanes<'_>,
        order: ChannelOrder,
        dst: &mut [u8],
        dst_stride: usize,
        stop: &dyn Stop,
    ) -> Result<(), FrameError>;
}

/// Per-format conversion settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub format: PixelFormat,
    /// Order requested from the converter.
    pub converter_order: ChannelOrder,
    /// Swap red and blue over the surface after conversion.
    pub swap_after_convert: bool,
}

static DESCRIPTORS: [FormatDescriptor; 4] = [
    FormatDescriptor {
        format: PixelFormat::I420,
        converter_order: ChannelOrder::Rgba,
        swap_after_convert: false,
    },
    FormatDescriptor {
        format: PixelFormat::I422,
        converter_order: ChannelOrder::Rgba,
        swap_after_convert: false,
    },
    FormatDescriptor {
        format: PixelFormat::I444,
        converter_order: ChannelOrder::Bgra,
        swap_after_convert: true,
    },
    FormatDescriptor {
        format: PixelFormat::I411,
        converter_order: ChannelOrder::Bgra,
        swap_after_convert: true,
    },
];

/// Descriptor for `format`.
pub fn descriptor(format: PixelFormat) -> &'static FormatDescriptor {
    &DESCRIPTORS[format.code() as usize]
}

/// Exchange bytes 0 and 2 of every pixel in a `width` x `height` region.
pub fn swap_red_blue(pixels: &mut [u8], stride: usize, width: usize, height: usize) {
    let row_bytes = width * ChannelOrder::BYTES_PER_PIXEL;
    for row in pixels.chunks_mut(stride).take(height) {
        for px in row[..row_bytes].chunks_exact_mut(ChannelOrder::BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }
    }
}

/// Check that `dst` can hold the converter's output.
pub(crate) fn check_destination(
    planes: &YuvPlanes<'_>,
    dst: &[u8],
    dst_stride: usize,
) -> Result<(), FrameError> {
    let layout = &planes.layout;
    let row_bytes = layout.width as usize * ChannelOrder::BYTES_PER_PIXEL;
    let height = layout.height as usize;
    if height == 0 || row_bytes == 0 {
        return Ok(());
    }
    if dst_stride < row_bytes {
        return Err(FrameError::BufferTooSmall {
            needed: row_bytes,
            actual: dst_stride,
        });
    }
    let needed = dst_stride * (height - 1) + row_bytes;
    if dst.len() < needed {
        return Err(FrameError::BufferTooSmall {
            needed,
            actual: dst.len(),
        });
    }
    Ok(())
}

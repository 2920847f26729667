//! Frame encoding: header plus raw LZ4 block.

use alloc::vec::Vec;

use crate::buffer::{ByteBuffer, GrowthPolicy};
use crate::decompress::compress_block;
use crate::error::FrameError;
use crate::header::FrameHeader;
use crate::layout::PlaneLayout;
use crate::pixel::PixelFormat;

/// Encode planar YUV bytes as a frame the pipeline accepts.
///
/// `planar` must hold exactly the Y, U and V planes of a `width x height`
/// image in `format`, concatenated.
pub fn encode_frame(
    planar: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<Vec<u8>, FrameError> {
    let (encoded_width, encoded_height) = match (i16::try_from(width), i16::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(FrameError::DimensionsTooLarge { width, height }),
    };
    let layout = PlaneLayout::new(width, height, format)?;
    if planar.len() != layout.total() {
        return Err(FrameError::BufferTooSmall {
            needed: layout.total(),
            actual: planar.len(),
        });
    }
    let decompressed_size =
        u32::try_from(layout.total()).map_err(|_| FrameError::DimensionsTooLarge { width, height })?;

    let block = compress_block(planar);
    let mut out = ByteBuffer::new().with_growth_policy(GrowthPolicy::EXACT);
    out.set_capacity(FrameHeader::LEN + block.len())?;
    FrameHeader::new(encoded_width, encoded_height, decompressed_size).write_to(&mut out)?;
    out.add_bytes(&block)?;
    Ok(out.data().to_vec())
}

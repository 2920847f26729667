//! Full-range BT.601 integer conversion.

use enough::Stop;

use super::{ColorConverter, check_destination};
use crate::error::FrameError;
use crate::layout::YuvPlanes;
use crate::pixel::ChannelOrder;

/// Software BT.601 converter (full range, 8.8 fixed point).
///
/// Chroma is point-sampled: pixel `(x, y)` reads chroma sample
/// `(x / h_div, y / v_div)`, clamped to the last chroma row. Frames with no
/// chroma rows (I420 with height 1) convert as neutral gray chroma.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bt601;

#[inline]
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = i32::from(y);
    let u = i32::from(u) - 128;
    let v = i32::from(v) - 128;
    let r = (y + ((v * 359 + 128) >> 8)).clamp(0, 255);
    let g = (y - ((u * 88 + v * 183 + 128) >> 8)).clamp(0, 255);
    let b = (y + ((u * 454 + 128) >> 8)).clamp(0, 255);
    [r as u8, g as u8, b as u8]
}

fn check_plane(plane: &[u8], needed: usize) -> Result<(), FrameError> {
    if plane.len() < needed {
        return Err(FrameError::BufferTooSmall {
            needed,
            actual: plane.len(),
        });
    }
    Ok(())
}

impl ColorConverter for Bt601 {
    fn convert(
        &self,
        planes: &YuvPlanes<'_>,
        order: ChannelOrder,
        dst: &mut [u8],
        dst_stride: usize,
        stop: &dyn Stop,
    ) -> Result<(), FrameError> {
        let layout = &planes.layout;
        check_plane(planes.y, layout.y_plane_size)?;
        check_plane(planes.u, layout.u_plane_size)?;
        check_plane(planes.v, layout.v_plane_size)?;
        check_destination(planes, dst, dst_stride)?;

        let w = layout.width as usize;
        let h = layout.height as usize;
        if w == 0 || h == 0 {
            return Ok(());
        }
        let (h_div, v_div) = layout.format.subsampling();
        let [ri, gi, bi, ai] = order.offsets();

        for (row, out) in dst.chunks_mut(dst_stride).take(h).enumerate() {
            if row % 16 == 0 {
                stop.check()?;
            }
            let luma = &planes.y[row * layout.y_stride..][..w];
            let chroma = (layout.chroma_rows > 0).then(|| {
                let start = (row / v_div).min(layout.chroma_rows - 1) * layout.chroma_stride;
                (
                    &planes.u[start..][..layout.chroma_stride],
                    &planes.v[start..][..layout.chroma_stride],
                )
            });
            for (col, px) in out[..w * ChannelOrder::BYTES_PER_PIXEL]
                .chunks_exact_mut(ChannelOrder::BYTES_PER_PIXEL)
                .enumerate()
            {
                let (u, v) = match chroma {
                    Some((u_row, v_row)) => (u_row[col / h_div], v_row[col / h_div]),
                    None => (128, 128),
                };
                let [r, g, b] = yuv_to_rgb(luma[col], u, v);
                px[ri] = r;
                px[gi] = g;
                px[bi] = b;
                px[ai] = 0xFF;
            }
        }
        Ok(())
    }
}

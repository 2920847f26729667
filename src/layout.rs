//! Plane sizes and strides for planar YUV payloads.

use crate::error::FrameError;
use crate::pixel::{ChannelOrder, PixelFormat};

/// Per-plane byte counts and strides for one frame.
///
/// Chroma planes are `ceil(width / h_div)` samples wide and
/// `floor(height / v_div)` rows tall, where the divisors come from
/// [`PixelFormat::subsampling`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub y_plane_size: usize,
    pub u_plane_size: usize,
    pub v_plane_size: usize,
    /// Luma row stride in bytes (equals `width`).
    pub y_stride: usize,
    /// Chroma row stride in bytes.
    pub chroma_stride: usize,
    /// Rows per chroma plane.
    pub chroma_rows: usize,
}

impl PlaneLayout {
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self, FrameError> {
        let too_large = FrameError::DimensionsTooLarge { width, height };
        let (h_div, v_div) = format.subsampling();
        let w = width as usize;
        let h = height as usize;

        let y_plane_size = w.checked_mul(h).ok_or(too_large)?;
        let chroma_stride = w.div_ceil(h_div);
        let chroma_rows = h / v_div;
        let chroma_size = chroma_stride
            .checked_mul(chroma_rows)
            .ok_or(FrameError::DimensionsTooLarge { width, height })?;

        let layout = Self {
            format,
            width,
            height,
            y_plane_size,
            u_plane_size: chroma_size,
            v_plane_size: chroma_size,
            y_stride: w,
            chroma_stride,
            chroma_rows,
        };
        layout
            .checked_total()
            .ok_or(FrameError::DimensionsTooLarge { width, height })?;
        Ok(layout)
    }

    fn checked_total(&self) -> Option<usize> {
        self.y_plane_size
            .checked_add(self.u_plane_size)?
            .checked_add(self.v_plane_size)
    }

    /// `Y + U + V` bytes.
    pub fn total(&self) -> usize {
        self.y_plane_size + self.u_plane_size + self.v_plane_size
    }

    /// Bytes of a packed `width x height` RGBA surface for this frame.
    pub fn surface_bytes(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(ChannelOrder::BYTES_PER_PIXEL)
    }

    /// Split a contiguous `Y | U | V` payload into plane slices.
    pub fn split<'p>(&self, payload: &'p [u8]) -> Result<YuvPlanes<'p>, FrameError> {
        let total = self.total();
        if payload.len() < total {
            return Err(FrameError::BufferTooSmall {
                needed: total,
                actual: payload.len(),
            });
        }
        let (y, rest) = payload.split_at(self.y_plane_size);
        let (u, rest) = rest.split_at(self.u_plane_size);
        let v = &rest[..self.v_plane_size];
        Ok(YuvPlanes {
            layout: *self,
            y,
            u,
            v,
        })
    }
}

/// Borrowed plane slices of one frame plus the layout that produced them.
#[derive(Clone, Copy, Debug)]
pub struct YuvPlanes<'p> {
    pub layout: PlaneLayout,
    pub y: &'p [u8],
    pub u: &'p [u8],
    pub v: &'p [u8],
}

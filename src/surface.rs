//! Destination pixel surfaces.
//!
//! The pipeline needs a writable `width x height x 4` byte region, locked for
//! the duration of conversion and unlocked afterwards. Host platforms
//! implement [`Surface`] over their own bitmap objects; [`PixelSurface`] is
//! the in-memory implementation.

use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::FrameError;
use crate::pixel::ChannelOrder;

/// A lockable packed-pixel destination.
pub trait Surface {
    /// Current `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Replace the backing store with a `width x height` one.
    fn reallocate(&mut self, width: u32, height: u32) -> Result<(), FrameError>;

    /// Acquire exclusive write access.
    fn lock_pixels(&mut self) -> Result<(), FrameError>;

    /// Pixel bytes. Only valid between lock and unlock.
    fn pixels_mut(&mut self) -> &mut [u8];

    /// Row stride in bytes.
    fn stride(&self) -> usize {
        self.dimensions().0 as usize * ChannelOrder::BYTES_PER_PIXEL
    }

    /// Release write access.
    fn unlock_pixels(&mut self);
}

/// Scoped lock: unlocks the surface when dropped.
pub(crate) struct PixelLock<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: Surface + ?Sized> PixelLock<'s, S> {
    pub(crate) fn acquire(surface: &'s mut S) -> Result<Self, FrameError> {
        surface.lock_pixels()?;
        Ok(Self { surface })
    }

    pub(crate) fn stride(&self) -> usize {
        self.surface.stride()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        self.surface.pixels_mut()
    }
}

impl<S: Surface + ?Sized> Drop for PixelLock<'_, S> {
    fn drop(&mut self) {
        self.surface.unlock_pixels();
    }
}

/// Owned RGBA surface backed by a `Vec<u8>` with stride `width * 4`.
#[derive(Clone, Debug, Default)]
pub struct PixelSurface {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    locked: bool,
}

impl PixelSurface {
    /// Empty 0x0 surface. The first decoded frame sizes it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-filled `width x height` surface.
    pub fn with_dimensions(width: u32, height: u32) -> Result<Self, FrameError> {
        let mut surface = Self::new();
        surface.reallocate(width, height)?;
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed pixel bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Take the pixel bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.pixels
    }

    /// Reinterpret pixel data as typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn as_pixels(&self) -> &[rgb::Rgba<u8>] {
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::Rgba<u8>> {
        imgref::ImgRef::new(self.as_pixels(), self.width as usize, self.height as usize)
    }

    /// Copy into an [`imgref::ImgVec`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::Rgba<u8>> {
        imgref::ImgVec::new(
            self.as_pixels().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}

impl Surface for PixelSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn reallocate(&mut self, width: u32, height: u32) -> Result<(), FrameError> {
        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(ChannelOrder::BYTES_PER_PIXEL))
            .ok_or(FrameError::DimensionsTooLarge { width, height })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|_| FrameError::AllocationFailure { requested: bytes })?;
        pixels.resize(bytes, 0);
        self.pixels = pixels;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn lock_pixels(&mut self) -> Result<(), FrameError> {
        if self.locked {
            return Err(FrameError::Surface("surface already locked".into()));
        }
        self.locked = true;
        Ok(())
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        debug_assert!(self.locked, "pixels written without a lock");
        &mut self.pixels
    }

    fn unlock_pixels(&mut self) {
        self.locked = false;
    }
}

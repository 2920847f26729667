use crate::error::FrameError;
use crate::layout::PlaneLayout;

/// Resource limits applied while decoding a frame.
///
/// All fields default to `None` (no limit). Frame dimensions come from an
/// untrusted header, so a decoder fed by a network peer should set at least
/// `max_pixels`.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for any one allocation: the decompression scratch
    /// buffer or the RGBA surface.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header dimensions. Runs before the payload size is trusted.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), FrameError> {
        let exceeds = |what: &str, value: u64, max: Option<u64>| match max {
            Some(max) if value > max => Err(FrameError::LimitExceeded(alloc::format!(
                "{what} {value} exceeds limit {max}"
            ))),
            _ => Ok(()),
        };
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    /// Check both per-frame allocations of a validated layout.
    pub(crate) fn check_layout(&self, layout: &PlaneLayout) -> Result<(), FrameError> {
        self.check_memory(layout.total())?;
        self.check_memory(layout.surface_bytes())
    }

    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), FrameError> {
        match self.max_memory_bytes {
            Some(max) if bytes as u64 > max => Err(FrameError::LimitExceeded(alloc::format!(
                "allocation of {bytes} bytes exceeds memory limit {max}"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelFormat;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check(32767, 32767).is_ok());
        assert!(limits.check_memory(usize::MAX).is_ok());
    }

    #[test]
    fn width_and_height_checked_separately() {
        let limits = Limits {
            max_width: Some(640),
            max_height: Some(480),
            ..Default::default()
        };
        assert!(limits.check(640, 480).is_ok());
        assert!(matches!(limits.check(641, 1), Err(FrameError::LimitExceeded(_))));
        assert!(matches!(limits.check(1, 481), Err(FrameError::LimitExceeded(_))));
    }

    #[test]
    fn pixel_limit_rejects() {
        let limits = Limits {
            max_pixels: Some(15),
            ..Default::default()
        };
        assert!(limits.check(5, 3).is_ok());
        assert!(matches!(
            limits.check(4, 4),
            Err(FrameError::LimitExceeded(_))
        ));
    }

    #[test]
    fn layout_checks_surface_as_well_as_scratch() {
        // 4x4 I420: 24 scratch bytes, 64 surface bytes.
        let layout = PlaneLayout::new(4, 4, PixelFormat::I420).unwrap();
        let limits = Limits {
            max_memory_bytes: Some(32),
            ..Default::default()
        };
        assert!(limits.check_memory(layout.total()).is_ok());
        assert!(matches!(
            limits.check_layout(&layout),
            Err(FrameError::LimitExceeded(_))
        ));

        let limits = Limits {
            max_memory_bytes: Some(64),
            ..Default::default()
        };
        assert!(limits.check_layout(&layout).is_ok());
    }
}

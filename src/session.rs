//! Per-stream decoder state.

use enough::Stop;

use crate::decode::{DecodedFrame, FrameDecodeRequest};
use crate::error::FrameError;
use crate::limits::Limits;
use crate::pixel::PixelFormat;
use crate::surface::{PixelSurface, Surface};

/// Decodes a stream of frames into one reusable surface.
///
/// Failed frames are dropped and counted; the session stays usable.
///
/// ```
/// use zenframe::{DecoderSession, PixelFormat, Unstoppable, encode_frame};
///
/// let mut session: DecoderSession = DecoderSession::new(PixelFormat::I420);
/// session.start(2, 2)?;
/// let frame = encode_frame(&[16, 16, 16, 16, 128, 128], 2, 2, PixelFormat::I420)?;
/// session.decode_frame(&frame, Unstoppable)?;
/// assert_eq!(session.frame_index(), 1);
/// assert!(session.screenshot().is_some());
/// # Ok::<(), zenframe::FrameError>(())
/// ```
#[derive(Debug)]
pub struct DecoderSession<S: Surface = PixelSurface> {
    format: PixelFormat,
    limits: Option<Limits>,
    surface: Option<S>,
    frame_index: u64,
    frames_dropped: u64,
}

impl<S: Surface + Default> DecoderSession<S> {
    pub fn new(format: PixelFormat) -> Self {
        Self {
            format,
            limits: None,
            surface: None,
            frame_index: 0,
            frames_dropped: 0,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Begin a stream at `width x height`, preallocating the surface.
    pub fn start(&mut self, width: i32, height: i32) -> Result<(), FrameError> {
        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(FrameError::InvalidDimensions { width, height }),
        };
        if let Some(limits) = &self.limits {
            limits.check(w, h)?;
        }
        let mut surface = S::default();
        surface.reallocate(w, h)?;
        self.surface = Some(surface);
        self.frame_index = 0;
        log::debug!("{:?} session started at {w}x{h}", self.format);
        Ok(())
    }

    /// Decode one frame. On failure the frame is dropped and counted.
    pub fn decode_frame(
        &mut self,
        frame: &[u8],
        stop: impl Stop,
    ) -> Result<DecodedFrame, FrameError> {
        let Some(surface) = self.surface.as_mut() else {
            self.frames_dropped += 1;
            return Err(FrameError::Surface("session not started".into()));
        };
        let mut request = FrameDecodeRequest::new(frame, self.format);
        if let Some(limits) = &self.limits {
            request = request.with_limits(limits);
        }
        match request.decode_into(surface, stop) {
            Ok(decoded) => {
                self.frame_index += 1;
                Ok(decoded)
            }
            Err(e) => {
                self.frames_dropped += 1;
                log::warn!(
                    "dropped frame after {} decoded ({} dropped)",
                    self.frame_index,
                    self.frames_dropped
                );
                Err(e)
            }
        }
    }

    /// End the stream and release the surface.
    pub fn stop(&mut self) {
        if self.surface.take().is_some() {
            log::debug!("{:?} session stopped", self.format);
        }
        self.reset();
    }

    pub fn reset(&mut self) {
        self.frame_index = 0;
    }

    /// Frames decoded since the last start or reset.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped
    }

    /// The surface holding the last good frame, once one has decoded.
    pub fn screenshot(&self) -> Option<&S> {
        if self.frame_index == 0 {
            return None;
        }
        self.surface.as_ref()
    }

    pub fn is_video_out_generated(&self) -> bool {
        self.frame_index > 0
    }

    pub fn can_skip_frames(&self) -> bool {
        true
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }
}

//! Frame decoding pipeline.
//!
//! One call runs `AwaitHeader -> Validated -> Decompressed -> Converted -> Done`
//! on the calling thread. Any failure moves to `Failed`; the frame should be
//! dropped and the surface contents treated as unspecified.

use enough::Stop;

use crate::buffer::ByteBuffer;
use crate::convert::{Bt601, ColorConverter, check_destination, descriptor, swap_red_blue};
use crate::decompress::{Decompressor, Lz4Block};
use crate::error::FrameError;
use crate::header::FrameHeader;
use crate::layout::PlaneLayout;
use crate::limits::Limits;
use crate::pixel::{ChannelOrder, PixelFormat};
use crate::surface::{PixelLock, Surface};

static DEFAULT_DECOMPRESSOR: Lz4Block = Lz4Block;
static DEFAULT_CONVERTER: Bt601 = Bt601;

/// Pipeline progress for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStage {
    AwaitHeader,
    Validated,
    Decompressed,
    Converted,
    Done,
    Failed,
}

/// Result of a successful decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedFrame {
    pub header: FrameHeader,
    pub layout: PlaneLayout,
    /// The surface was reallocated to match the frame dimensions.
    pub surface_reallocated: bool,
}

/// Decode one encoded frame into a [`Surface`].
///
/// ```
/// use zenframe::{FrameDecodeRequest, PixelFormat, PixelSurface, Unstoppable, encode_frame};
///
/// // 2x2 I420: 4 luma bytes, 1 U, 1 V.
/// let frame = encode_frame(&[16, 16, 235, 235, 128, 128], 2, 2, PixelFormat::I420)?;
///
/// let mut surface = PixelSurface::new();
/// let decoded = FrameDecodeRequest::new(&frame, PixelFormat::I420)
///     .decode_into(&mut surface, Unstoppable)?;
/// assert_eq!(decoded.header.encoded_width, 2);
/// assert_eq!(&surface.pixels()[..4], &[16, 16, 16, 255]);
/// # Ok::<(), zenframe::FrameError>(())
/// ```
pub struct FrameDecodeRequest<'a> {
    frame: &'a [u8],
    format: PixelFormat,
    limits: Option<&'a Limits>,
    decompressor: &'a dyn Decompressor,
    converter: &'a dyn ColorConverter,
}

impl<'a> FrameDecodeRequest<'a> {
    /// `frame` starts with the 8-byte header; everything after it is payload.
    pub fn new(frame: &'a [u8], format: PixelFormat) -> Self {
        Self {
            frame,
            format,
            limits: None,
            decompressor: &DEFAULT_DECOMPRESSOR,
            converter: &DEFAULT_CONVERTER,
        }
    }

    /// Address a frame as `size` bytes at `start_pos` inside `data`.
    pub fn from_packet(
        data: &'a [u8],
        start_pos: usize,
        size: usize,
        format: PixelFormat,
    ) -> Result<Self, FrameError> {
        let frame = start_pos
            .checked_add(size)
            .and_then(|end| data.get(start_pos..end))
            .ok_or(FrameError::UnexpectedEof)?;
        Ok(Self::new(frame, format))
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_decompressor(mut self, decompressor: &'a dyn Decompressor) -> Self {
        self.decompressor = decompressor;
        self
    }

    pub fn with_converter(mut self, converter: &'a dyn ColorConverter) -> Self {
        self.converter = converter;
        self
    }

    /// Run the pipeline, writing RGBA pixels into `surface`.
    pub fn decode_into<S: Surface + ?Sized>(
        self,
        surface: &mut S,
        stop: impl Stop,
    ) -> Result<DecodedFrame, FrameError> {
        let mut pipeline = Pipeline::new(self);
        pipeline.run(surface, &stop)
    }
}

pub(crate) struct Pipeline<'a> {
    request: FrameDecodeRequest<'a>,
    stage: DecodeStage,
}

impl<'a> Pipeline<'a> {
    pub(crate) fn new(request: FrameDecodeRequest<'a>) -> Self {
        Self {
            request,
            stage: DecodeStage::AwaitHeader,
        }
    }

    #[cfg(test)]
    pub(crate) fn stage(&self) -> DecodeStage {
        self.stage
    }

    fn advance(&mut self, next: DecodeStage) {
        log::debug!("frame decode: {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    pub(crate) fn run<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        stop: &dyn Stop,
    ) -> Result<DecodedFrame, FrameError> {
        match self.steps(surface, stop) {
            Ok(decoded) => Ok(decoded),
            Err(e) => {
                log::warn!(
                    "frame rejected at {:?} ({:?}): {e}",
                    self.stage,
                    self.request.format
                );
                self.stage = DecodeStage::Failed;
                Err(e)
            }
        }
    }

    fn steps<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        stop: &dyn Stop,
    ) -> Result<DecodedFrame, FrameError> {
        let mut input = ByteBuffer::borrowed(self.request.frame);
        let header = FrameHeader::read_from(&input)?;
        input.discard_bytes_from_start(FrameHeader::LEN);

        let (width, height) = header.dimensions()?;
        if let Some(limits) = self.request.limits {
            limits.check(width, height)?;
        }
        let layout = header.validate(self.request.format)?;
        if let Some(limits) = self.request.limits {
            limits.check_layout(&layout)?;
        }
        self.advance(DecodeStage::Validated);
        stop.check()?;

        let mut scratch = ByteBuffer::with_size(layout.total())?;
        let produced = self
            .request
            .decompressor
            .decompress(input.data(), scratch.data_mut()?)?;
        if produced < layout.total() {
            return Err(FrameError::DecompressionTruncated {
                expected: layout.total(),
                actual: produced,
            });
        }
        if produced > layout.total() {
            return Err(FrameError::Decompression(alloc::format!(
                "decompressor reported {produced} bytes into a {} byte buffer",
                layout.total()
            )));
        }
        self.advance(DecodeStage::Decompressed);
        stop.check()?;

        let surface_reallocated = surface.dimensions() != (width, height);
        if surface_reallocated {
            surface.reallocate(width, height)?;
            log::info!("new {width}x{height} surface allocated");
        }

        let planes = layout.split(scratch.data())?;
        let desc = descriptor(self.request.format);
        {
            let mut lock = PixelLock::acquire(surface)?;
            let stride = lock.stride();
            let pixels = lock.pixels_mut();
            if stride == 0 {
                return Err(FrameError::BufferTooSmall {
                    needed: width as usize * ChannelOrder::BYTES_PER_PIXEL,
                    actual: 0,
                });
            }
            check_destination(&planes, pixels, stride)?;
            self.request
                .converter
                .convert(&planes, desc.converter_order, pixels, stride, stop)?;
            if desc.swap_after_convert {
                swap_red_blue(pixels, stride, width as usize, height as usize);
            }
        }
        self.advance(DecodeStage::Converted);

        self.advance(DecodeStage::Done);
        Ok(DecodedFrame {
            header,
            layout,
            surface_reallocated,
        })
    }
}

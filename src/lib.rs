//! # zenframe
//!
//! Decoding of LZ4-compressed planar YUV frames into RGBA surfaces, built on a
//! cursor-based copy-on-write byte buffer.
//!
//! ## Frame format
//!
//! Every frame is an 8-byte little-endian [`FrameHeader`] (width, height,
//! decompressed size) followed by a raw LZ4 block. The block expands to the
//! Y, U and V planes of one image, concatenated with no padding. The plane
//! geometry depends on the negotiated [`PixelFormat`]: I420, I422, I444 or
//! I411.
//!
//! ## Pipeline
//!
//! [`FrameDecodeRequest`] validates the header against the format, inflates
//! the payload into scratch memory, resizes the destination [`Surface`] if the
//! frame dimensions changed and converts to RGBA with full-range BT.601.
//! Nothing is allocated before the header has been checked, and a frame whose
//! declared size disagrees with its dimensions is rejected outright.
//!
//! ## Byte buffer
//!
//! [`ByteBuffer`] can wrap borrowed bytes without copying and promotes itself
//! to owned storage on the first mutation. Reads advance a cursor; when the
//! buffer drains, both offsets snap back to zero.
//!
//! ## Usage
//!
//! ```
//! use zenframe::{FrameDecodeRequest, Limits, PixelFormat, PixelSurface, Unstoppable, encode_frame};
//!
//! let planar = [0u8; 12]; // 4x2 I420: 8 luma, 2 U, 2 V
//! let frame = encode_frame(&planar, 4, 2, PixelFormat::I420)?;
//!
//! let limits = Limits {
//!     max_pixels: Some(1920 * 1080),
//!     ..Default::default()
//! };
//! let mut surface = PixelSurface::new();
//! let decoded = FrameDecodeRequest::new(&frame, PixelFormat::I420)
//!     .with_limits(&limits)
//!     .decode_into(&mut surface, Unstoppable)?;
//! assert_eq!(decoded.layout.total(), 12);
//! assert_eq!(surface.pixels().len(), 4 * 2 * 4);
//! # Ok::<(), zenframe::FrameError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod buffer;
mod convert;
mod decode;
mod decompress;
mod encode;
mod error;
mod header;
mod layout;
mod limits;
mod pixel;
mod session;
mod surface;

pub use buffer::{ByteBuffer, GrowthPolicy};
pub use convert::{Bt601, ColorConverter, FormatDescriptor, OUTPUT_ORDER, descriptor, swap_red_blue};
pub use decode::{DecodeStage, DecodedFrame, FrameDecodeRequest};
pub use decompress::{Decompressor, Lz4Block};
pub use encode::encode_frame;
pub use error::FrameError;
pub use header::FrameHeader;
pub use layout::{PlaneLayout, YuvPlanes};
pub use limits::Limits;
pub use pixel::{ChannelOrder, PixelFormat};
pub use session::DecoderSession;
pub use surface::{PixelSurface, Surface};

pub use enough::{Stop, StopReason, Unstoppable};

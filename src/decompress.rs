//! Payload decompression.

use alloc::string::ToString;

use lz4_flex::block::DecompressError;

use crate::error::FrameError;

/// Expands a compressed payload into a caller-sized output buffer.
///
/// Returns the number of bytes written to `dst`. Producing fewer bytes than
/// `dst.len()` is not an error here; the pipeline reports it as truncation.
pub trait Decompressor {
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, FrameError>;
}

impl<F> Decompressor for F
where
    F: Fn(&[u8], &mut [u8]) -> Result<usize, FrameError>,
{
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, FrameError> {
        self(src, dst)
    }
}

/// Raw LZ4 block format (no size prefix, no frame header).
///
/// Input that ends mid-sequence is reported as
/// [`FrameError::DecompressionTruncated`]. The block decoder does not say how
/// far it got, so `actual` is 0 in that case.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lz4Block;

impl Decompressor for Lz4Block {
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, FrameError> {
        lz4_flex::block::decompress_into(src, dst).map_err(|e| match e {
            DecompressError::LiteralOutOfBounds | DecompressError::ExpectedAnotherByte => {
                FrameError::DecompressionTruncated {
                    expected: dst.len(),
                    actual: 0,
                }
            }
            e => FrameError::Decompression(e.to_string()),
        })
    }
}

/// Compress `src` as a raw LZ4 block.
pub(crate) fn compress_block(src: &[u8]) -> alloc::vec::Vec<u8> {
    lz4_flex::block::compress(src)
}

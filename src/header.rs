//! Fixed 8-byte header preceding each compressed frame payload.
//!
//! ```text
//! offset 0: i16 LE  encoded width
//! offset 2: i16 LE  encoded height
//! offset 4: u32 LE  decompressed payload size
//! offset 8: ...     compressed payload
//! ```

use crate::buffer::ByteBuffer;
use crate::error::FrameError;
use crate::layout::PlaneLayout;
use crate::pixel::PixelFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHeader {
    pub encoded_width: i16,
    pub encoded_height: i16,
    /// Exact byte length of the planar payload after decompression.
    pub decompressed_size: u32,
}

impl FrameHeader {
    /// Encoded header length in bytes.
    pub const LEN: usize = 8;

    pub fn new(encoded_width: i16, encoded_height: i16, decompressed_size: u32) -> Self {
        Self {
            encoded_width,
            encoded_height,
            decompressed_size,
        }
    }

    /// Parse from the first 8 bytes of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, FrameError> {
        let bytes: &[u8; Self::LEN] = data
            .get(..Self::LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(FrameError::UnexpectedEof)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn from_bytes(bytes: &[u8; Self::LEN]) -> Self {
        Self {
            encoded_width: i16::from_le_bytes([bytes[0], bytes[1]]),
            encoded_height: i16::from_le_bytes([bytes[2], bytes[3]]),
            decompressed_size: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    /// Parse from the unread bytes of `buf` without moving its cursor.
    pub fn read_from(buf: &ByteBuffer<'_>) -> Result<Self, FrameError> {
        let mut bytes = [0u8; Self::LEN];
        if buf.peek_bytes(0, &mut bytes) < Self::LEN {
            return Err(FrameError::UnexpectedEof);
        }
        Ok(Self::from_bytes(&bytes))
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[0..2].copy_from_slice(&self.encoded_width.to_le_bytes());
        out[2..4].copy_from_slice(&self.encoded_height.to_le_bytes());
        out[4..8].copy_from_slice(&self.decompressed_size.to_le_bytes());
        out
    }

    /// Append the encoded header to `buf`.
    pub fn write_to(&self, buf: &mut ByteBuffer<'_>) -> Result<(), FrameError> {
        buf.add_bytes(&self.to_bytes())
    }

    /// Width and height, rejecting non-positive values.
    pub fn dimensions(&self) -> Result<(u32, u32), FrameError> {
        if self.encoded_width <= 0 || self.encoded_height <= 0 {
            return Err(FrameError::InvalidDimensions {
                width: i32::from(self.encoded_width),
                height: i32::from(self.encoded_height),
            });
        }
        Ok((self.encoded_width as u32, self.encoded_height as u32))
    }

    /// Check dimensions and the declared payload size against `format`.
    pub fn validate(&self, format: PixelFormat) -> Result<PlaneLayout, FrameError> {
        let (width, height) = self.dimensions()?;
        let layout = PlaneLayout::new(width, height, format)?;
        if self.decompressed_size == 0 || self.decompressed_size as usize != layout.total() {
            return Err(FrameError::FormatMismatch {
                declared: self.decompressed_size,
                expected: layout.total(),
            });
        }
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_layout_is_little_endian() {
        let h = FrameHeader::new(0x0102, 0x0304, 0x0A0B_0C0D);
        assert_eq!(h.to_bytes(), [0x02, 0x01, 0x04, 0x03, 0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn parse_short_input() {
        assert!(matches!(
            FrameHeader::parse(&[0u8; 7]),
            Err(FrameError::UnexpectedEof)
        ));
    }

    #[test]
    fn parse_ignores_trailing_payload() {
        let mut data = FrameHeader::new(6, 4, 36).to_bytes().to_vec();
        data.extend_from_slice(&[0xFF; 5]);
        assert_eq!(FrameHeader::parse(&data).unwrap(), FrameHeader::new(6, 4, 36));
    }

    #[test]
    fn read_from_does_not_move_cursor() {
        let bytes = FrameHeader::new(320, 240, 115_200).to_bytes();
        let buf = ByteBuffer::borrowed(&bytes);
        let h = FrameHeader::read_from(&buf).unwrap();
        assert_eq!(h, FrameHeader::new(320, 240, 115_200));
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.len(), FrameHeader::LEN);
        assert!(!buf.is_owned());
    }

    #[test]
    fn write_to_appends() {
        let mut buf = ByteBuffer::new();
        FrameHeader::new(2, 2, 6).write_to(&mut buf).unwrap();
        assert_eq!(buf.data(), &FrameHeader::new(2, 2, 6).to_bytes());
    }

    #[test]
    fn negative_dimensions_round_trip_but_fail_validation() {
        let h = FrameHeader::new(-4, 2, 12);
        assert_eq!(FrameHeader::parse(&h.to_bytes()).unwrap(), h);
        assert!(matches!(
            h.validate(PixelFormat::I420),
            Err(FrameError::InvalidDimensions { width: -4, height: 2 })
        ));
        assert!(matches!(
            FrameHeader::new(4, 0, 12).validate(PixelFormat::I420),
            Err(FrameError::InvalidDimensions { width: 4, height: 0 })
        ));
    }

    #[test]
    fn validate_plane_total() {
        let layout = FrameHeader::new(6, 4, 36).validate(PixelFormat::I420).unwrap();
        assert_eq!(layout.y_plane_size, 24);
        assert_eq!(layout.u_plane_size, 6);
        assert_eq!(layout.v_plane_size, 6);

        for declared in [0, 35, 37, 48] {
            assert!(matches!(
                FrameHeader::new(6, 4, declared).validate(PixelFormat::I420),
                Err(FrameError::FormatMismatch { expected: 36, .. })
            ));
        }
    }
}

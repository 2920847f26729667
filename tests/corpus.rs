//! Test corpus: pattern frames across formats and sizes, plus rejection cases.

use enough::{Stop, StopReason, Unstoppable};
use zenframe::*;

fn noise_pattern(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    let mut state: u32 = 0xDEAD_BEEF;
    for b in bytes.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *b = state as u8;
    }
    bytes
}

/// Luma ramp with flat mid-gray chroma.
fn gray_ramp(layout: &PlaneLayout) -> Vec<u8> {
    let mut planar = vec![128u8; layout.total()];
    for (i, y) in planar[..layout.y_plane_size].iter_mut().enumerate() {
        *y = (i * 7) as u8;
    }
    planar
}

fn decode(frame: &[u8], format: PixelFormat) -> Result<PixelSurface, FrameError> {
    let mut surface = PixelSurface::new();
    FrameDecodeRequest::new(frame, format).decode_into(&mut surface, Unstoppable)?;
    Ok(surface)
}

fn frame_with_raw_payload(header: FrameHeader, payload: &[u8]) -> Vec<u8> {
    let mut frame = header.to_bytes().to_vec();
    frame.extend_from_slice(payload);
    frame
}

struct Cancelled;

impl Stop for Cancelled {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

// ── Pattern frames ───────────────────────────────────────────────────

#[test]
fn gray_ramp_every_format_and_size() {
    for format in PixelFormat::ALL {
        for (w, h) in [(1, 1), (2, 2), (3, 5), (8, 6), (17, 3), (64, 1), (1, 64)] {
            let layout = PlaneLayout::new(w, h, format).unwrap();
            let planar = gray_ramp(&layout);
            let frame = encode_frame(&planar, w, h, format).unwrap();
            let surface = decode(&frame, format).unwrap();
            for (i, px) in surface.pixels().chunks_exact(4).enumerate() {
                let y = planar[i];
                assert_eq!(px, &[y, y, y, 255], "{format:?} {w}x{h} pixel {i}");
            }
        }
    }
}

#[test]
fn noise_frames_decode_opaque() {
    for format in PixelFormat::ALL {
        let layout = PlaneLayout::new(33, 17, format).unwrap();
        let planar = noise_pattern(layout.total());
        let frame = encode_frame(&planar, 33, 17, format).unwrap();
        let surface = decode(&frame, format).unwrap();
        assert_eq!(surface.pixels().len(), 33 * 17 * 4);
        assert!(surface.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }
}

#[test]
fn i420_pairs_of_rows_share_chroma() {
    // 2x4 I420: chroma rows 0 and 1. Luma is flat so only chroma varies.
    let planar = [
        100, 100, 100, 100, 100, 100, 100, 100, // Y
        128, 60, // U
        220, 128, // V
    ];
    let frame = encode_frame(&planar, 2, 4, PixelFormat::I420).unwrap();
    let surface = decode(&frame, PixelFormat::I420).unwrap();
    let row = |r: usize| &surface.pixels()[r * 8..r * 8 + 4];
    assert_eq!(row(0), row(1));
    assert_eq!(row(2), row(3));
    assert_ne!(row(1), row(2));
}

#[test]
fn i411_quarter_width_chroma() {
    // 8x1 I411: two chroma samples, each covering four pixels.
    let planar = [50, 50, 50, 50, 50, 50, 50, 50, 128, 200, 128, 40];
    let frame = encode_frame(&planar, 8, 1, PixelFormat::I411).unwrap();
    let surface = decode(&frame, PixelFormat::I411).unwrap();
    let px = |i: usize| &surface.pixels()[i * 4..i * 4 + 4];
    assert_eq!(px(0), px(3));
    assert_eq!(px(4), px(7));
    assert_ne!(px(3), px(4));
    assert_eq!(px(0), &[50, 50, 50, 255]);
}

#[test]
fn surface_follows_frame_dimensions() {
    let mut surface = PixelSurface::with_dimensions(4, 2).unwrap();
    let small = encode_frame(&[0u8; 12], 4, 2, PixelFormat::I420).unwrap();
    let big = encode_frame(&[0u8; 32], 4, 4, PixelFormat::I422).unwrap();

    let d = FrameDecodeRequest::new(&small, PixelFormat::I420)
        .decode_into(&mut surface, Unstoppable)
        .unwrap();
    assert!(!d.surface_reallocated);

    let d = FrameDecodeRequest::new(&big, PixelFormat::I422)
        .decode_into(&mut surface, Unstoppable)
        .unwrap();
    assert!(d.surface_reallocated);
    assert_eq!(surface.dimensions(), (4, 4));
    assert_eq!(surface.pixels().len(), 64);
}

// ── Rejections ───────────────────────────────────────────────────────

#[test]
fn declared_size_mismatch() {
    let frame = frame_with_raw_payload(FrameHeader::new(6, 4, 35), &[0u8; 16]);
    assert!(matches!(
        decode(&frame, PixelFormat::I420),
        Err(FrameError::FormatMismatch {
            declared: 35,
            expected: 36
        })
    ));
}

#[test]
fn zero_declared_size() {
    let frame = frame_with_raw_payload(FrameHeader::new(2, 2, 0), &[]);
    assert!(matches!(
        decode(&frame, PixelFormat::I420),
        Err(FrameError::FormatMismatch { declared: 0, .. })
    ));
}

#[test]
fn same_frame_wrong_format() {
    let frame = encode_frame(&[0u8; 12], 4, 2, PixelFormat::I420).unwrap();
    assert!(matches!(
        decode(&frame, PixelFormat::I444),
        Err(FrameError::FormatMismatch {
            declared: 12,
            expected: 24
        })
    ));
}

#[test]
fn truncated_payload() {
    let frame = encode_frame(&noise_pattern(96), 8, 8, PixelFormat::I420).unwrap();
    for cut in [1, 5, 10, 20] {
        let short = &frame[..frame.len() - cut];
        assert!(
            matches!(
                decode(short, PixelFormat::I420),
                Err(FrameError::DecompressionTruncated { expected: 96, .. })
            ),
            "cut {cut}"
        );
    }
}

#[test]
fn corrupt_payload_is_not_truncation() {
    // Token asks for a match at offset 0xFFFF with nothing decoded yet.
    let frame = frame_with_raw_payload(FrameHeader::new(2, 2, 6), &[0x10, 0xAA, 0xFF, 0xFF, 0x00]);
    assert!(matches!(
        decode(&frame, PixelFormat::I420),
        Err(FrameError::Decompression(_))
    ));
}

#[test]
fn short_header() {
    for len in 0..FrameHeader::LEN {
        let frame = vec![1u8; len];
        assert!(matches!(
            decode(&frame, PixelFormat::I420),
            Err(FrameError::UnexpectedEof)
        ));
    }
}

#[test]
fn negative_dimensions() {
    let frame = frame_with_raw_payload(FrameHeader::new(-4, 2, 12), &[0u8; 12]);
    assert!(matches!(
        decode(&frame, PixelFormat::I420),
        Err(FrameError::InvalidDimensions {
            width: -4,
            height: 2
        })
    ));
}

#[test]
fn unsupported_format_code() {
    assert!(matches!(
        PixelFormat::from_code(7),
        Err(FrameError::UnsupportedFormat(7))
    ));
    assert!(matches!(
        PixelFormat::from_code(-1),
        Err(FrameError::UnsupportedFormat(-1))
    ));
}

#[test]
fn limits_max_pixels() {
    // Header claims a large frame; limits reject it before any allocation.
    let frame = frame_with_raw_payload(FrameHeader::new(4000, 4000, 24_000_000), &[]);
    let limits = Limits {
        max_pixels: Some(1920 * 1080),
        ..Default::default()
    };
    let mut surface = PixelSurface::new();
    let result = FrameDecodeRequest::new(&frame, PixelFormat::I420)
        .with_limits(&limits)
        .decode_into(&mut surface, Unstoppable);
    assert!(matches!(result, Err(FrameError::LimitExceeded(_))));
    assert_eq!(surface.dimensions(), (0, 0));
}

#[test]
fn limits_max_memory() {
    let frame = encode_frame(&[0u8; 96], 8, 8, PixelFormat::I420).unwrap();
    let limits = Limits {
        max_memory_bytes: Some(64),
        ..Default::default()
    };
    let result = FrameDecodeRequest::new(&frame, PixelFormat::I420)
        .with_limits(&limits)
        .decode_into(&mut PixelSurface::new(), Unstoppable);
    assert!(matches!(result, Err(FrameError::LimitExceeded(_))));
}

#[test]
fn cancellation_stops_decode() {
    let frame = encode_frame(&[0u8; 12], 4, 2, PixelFormat::I420).unwrap();
    let mut surface = PixelSurface::new();
    let result = FrameDecodeRequest::new(&frame, PixelFormat::I420).decode_into(&mut surface, Cancelled);
    assert!(matches!(result, Err(FrameError::Cancelled(_))));
    assert!(!surface.is_locked());
}

#[test]
fn rejected_frame_keeps_surface() {
    let good = encode_frame(&[0u8; 12], 4, 2, PixelFormat::I420).unwrap();
    let bad = frame_with_raw_payload(FrameHeader::new(8, 8, 1), &[]);
    let mut surface = PixelSurface::new();
    FrameDecodeRequest::new(&good, PixelFormat::I420)
        .decode_into(&mut surface, Unstoppable)
        .unwrap();
    assert!(
        FrameDecodeRequest::new(&bad, PixelFormat::I420)
            .decode_into(&mut surface, Unstoppable)
            .is_err()
    );
    assert_eq!(surface.dimensions(), (4, 2));
}

// ── Sessions ─────────────────────────────────────────────────────────

#[test]
fn session_stream_with_drops() {
    let mut session: DecoderSession = DecoderSession::new(PixelFormat::I422);
    session.start(4, 2).unwrap();

    let good = encode_frame(&[0u8; 16], 4, 2, PixelFormat::I422).unwrap();
    let bad = frame_with_raw_payload(FrameHeader::new(4, 2, 12), &[]);

    session.decode_frame(&good, Unstoppable).unwrap();
    assert!(session.decode_frame(&bad, Unstoppable).is_err());
    session.decode_frame(&good, Unstoppable).unwrap();

    assert_eq!(session.frame_index(), 2);
    assert_eq!(session.frames_dropped(), 1);
    let shot = session.screenshot().unwrap();
    assert_eq!(shot.dimensions(), (4, 2));

    session.reset();
    assert!(!session.is_video_out_generated());
}

// ── Buffer ───────────────────────────────────────────────────────────

#[test]
fn borrowed_buffer_leaves_source_untouched() {
    let source = [1u8, 2, 3, 4];
    let mut buf = ByteBuffer::borrowed(&source);
    assert!(!buf.is_owned());
    buf.add_bytes(&[5]).unwrap();
    assert!(buf.is_owned());
    buf.data_mut().unwrap()[0] = 99;
    assert_eq!(buf.data(), &[99, 2, 3, 4, 5]);
    assert_eq!(source, [1, 2, 3, 4]);
}

#[test]
fn take_ownership_outlives_source() {
    let owned = {
        let source = vec![7u8; 10];
        let mut buf = ByteBuffer::borrowed(&source);
        buf.discard_bytes_from_start(4);
        buf.take_ownership().unwrap()
    };
    assert!(owned.is_owned());
    assert_eq!(owned.data(), &[7u8; 6]);
}

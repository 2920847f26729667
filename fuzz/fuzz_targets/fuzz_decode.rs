#![no_main]
use libfuzzer_sys::fuzz_target;
use zenframe::*;

fuzz_target!(|data: &[u8]| {
    // First byte picks the format, the rest is the frame
    let Some((&selector, frame)) = data.split_first() else {
        return;
    };
    let format = PixelFormat::ALL[usize::from(selector) % PixelFormat::ALL.len()];
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };

    // Must never panic, and must never leave the surface locked
    let mut surface = PixelSurface::new();
    let result = FrameDecodeRequest::new(frame, format)
        .with_limits(&limits)
        .decode_into(&mut surface, enough::Unstoppable);
    assert!(!surface.is_locked());

    if let Ok(decoded) = result {
        let (w, h) = surface.dimensions();
        assert_eq!(i32::from(decoded.header.encoded_width), w as i32);
        assert_eq!(i32::from(decoded.header.encoded_height), h as i32);
        assert!(surface.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }
});

#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs
//!
//! Decode seeds start with one format-selector byte, then the frame.

/// Raw LZ4 block holding `bytes` as a single literal run.
fn literal_block(bytes: &[u8]) -> Vec<u8> {
    let mut block = Vec::new();
    if bytes.len() < 15 {
        block.push((bytes.len() as u8) << 4);
    } else {
        block.push(0xF0);
        let mut rest = bytes.len() - 15;
        while rest >= 255 {
            block.push(255);
            rest -= 255;
        }
        block.push(rest as u8);
    }
    block.extend_from_slice(bytes);
    block
}

fn frame(selector: u8, width: i16, height: i16, planar: &[u8]) -> Vec<u8> {
    let mut out = vec![selector];
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&(planar.len() as u32).to_le_bytes());
    out.extend_from_slice(&literal_block(planar));
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // I420 2x2: 4 luma, 1 U, 1 V
    fs::write(format!("{dir}/i420_2x2.bin"), frame(0, 2, 2, &[16, 16, 235, 235, 128, 128])).unwrap();

    // I422 4x2: 8 luma, 4 U, 4 V
    let i422: Vec<u8> = (0..16u8).map(|i| i * 15).collect();
    fs::write(format!("{dir}/i422_4x2.bin"), frame(1, 4, 2, &i422)).unwrap();

    // I444 1x1
    fs::write(format!("{dir}/i444_1x1.bin"), frame(2, 1, 1, &[100, 128, 200])).unwrap();

    // I411 8x1: 8 luma, 2 U, 2 V
    fs::write(format!("{dir}/i411_8x1.bin"), frame(3, 8, 1, &[50; 12])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/short_header.bin"), b"\x00\x02\x00\x02").unwrap();
    fs::write(format!("{dir}/size_mismatch.bin"), b"\x00\x06\x00\x04\x00\x23\x00\x00\x00").unwrap();
    fs::write(format!("{dir}/negative_width.bin"), b"\x00\xfc\xff\x02\x00\x0c\x00\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}

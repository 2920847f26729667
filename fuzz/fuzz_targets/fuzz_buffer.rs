#![no_main]
use libfuzzer_sys::fuzz_target;
use zenframe::ByteBuffer;

fuzz_target!(|data: &[u8]| {
    // Input is both the borrowed seed and the op stream
    let split = data.first().map_or(0, |&b| usize::from(b)).min(data.len());
    let (seed, ops) = data.split_at(split);

    let mut buf = ByteBuffer::borrowed(seed);
    let mut model: Vec<u8> = seed.to_vec();
    let mut scratch = [0u8; 64];

    for pair in ops.chunks_exact(2) {
        let (op, arg) = (pair[0] % 6, usize::from(pair[1]) % 64);
        match op {
            0 => {
                let bytes = &scratch[..arg];
                buf.add_bytes(bytes).unwrap();
                model.extend_from_slice(bytes);
            }
            1 => {
                let got = buf.get_bytes(&mut scratch[..arg]);
                assert_eq!(&scratch[..got], &model[..got]);
                model.drain(..got);
            }
            2 => {
                let skipped = buf.discard_bytes_from_start(arg);
                model.drain(..skipped);
            }
            3 => buf.normalize().unwrap(),
            4 => buf.copy_on_write().unwrap(),
            _ => {
                buf.set_capacity(buf.end_offset() + arg).unwrap();
            }
        }
        assert_eq!(buf.data(), &model[..]);
        assert!(buf.position() <= buf.end_offset());
        assert!(buf.end_offset() <= buf.capacity());
    }
});

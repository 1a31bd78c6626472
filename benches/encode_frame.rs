// Run with:  cargo bench --bench encode_frame

use apa102_framebuffer::frame::{encode, Frame};
use apa102_framebuffer::{compute_frame_len, Brightness, Pixel};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

const PIXELS: usize = 144;
const FRAME_LEN: usize = compute_frame_len(PIXELS);

fn pixels() -> [Pixel; PIXELS] {
    let mut pixels = [Pixel::OFF; PIXELS];
    for (i, pixel) in pixels.iter_mut().enumerate() {
        let brightness = if i % 3 == 0 {
            Brightness::Explicit((i % 32) as u8)
        } else {
            Brightness::UseDefault
        };
        *pixel = Pixel::new(i as u8, (i * 2) as u8, (i * 3) as u8, brightness);
    }
    pixels
}

fn encode_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_frame");
    group.throughput(Throughput::Bytes(FRAME_LEN as u64));

    let pixels = pixels();

    group.bench_function("frame_encode_from", |b| {
        let mut frame = Frame::<FRAME_LEN>::new();
        b.iter(|| {
            black_box(&mut frame).encode_from(black_box(&pixels), 3, black_box(Some(9)));
        });
    });

    group.bench_function("stream_encode", |b| {
        b.iter(|| {
            encode(black_box(&pixels), 3, None).fold(0u8, |acc, byte| acc ^ byte)
        });
    });

    group.finish();
}

criterion_group!(benches, encode_frame);
criterion_main!(benches);

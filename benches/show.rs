// Run with:  cargo bench --bench show

use apa102_framebuffer::{compute_frame_len, Builder, DotStar, Pixel};
use core::convert::Infallible;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use embedded_hal::spi::{ErrorType, SpiBus};
use std::hint::black_box;

const PIXELS: usize = 144;
const FRAME_LEN: usize = compute_frame_len(PIXELS);

struct NullSpi;

impl ErrorType for NullSpi {
    type Error = Infallible;
}

impl SpiBus for NullSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        black_box(words);
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn show(c: &mut Criterion) {
    let mut group = c.benchmark_group("show");
    group.throughput(Throughput::Bytes(FRAME_LEN as u64));

    group.bench_function("show", |b| {
        let mut strip = DotStar::<_, PIXELS, FRAME_LEN>::new(NullSpi, Builder::new().build().unwrap())
            .unwrap();
        strip.fill_all(Pixel::rgb(10, 20, 30)).unwrap();
        b.iter(|| black_box(&mut strip).show().unwrap());
    });

    group.bench_function("set_pixel_auto_write", |b| {
        let config = Builder::new().auto_write(true).build().unwrap();
        let mut strip = DotStar::<_, PIXELS, FRAME_LEN>::new(NullSpi, config).unwrap();
        b.iter(|| {
            black_box(&mut strip)
                .set(black_box(7), Pixel::rgb(1, 2, 3))
                .unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, show);
criterion_main!(benches);

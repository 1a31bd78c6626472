//! Pixel buffer and frame encoder for APA102 / DotStar LED strips.
//!
//! ## How APA102 LED Strips Work
//!
//! APA102 LEDs are daisy-chained shift registers with a separate clock line,
//! so unlike WS2812 strips they have no timing requirements beyond the SPI
//! clock itself.
//!
//! ### Signal names
//! - **DI / CI** – Data and clock inputs, driven from SPI MOSI and SCK
//! - **DO / CO** – Data and clock outputs, re-timed and forwarded to the next LED
//! - **VCC & GND** – 5 V power for logic and LEDs
//!
//! ### Frame layout
//! 1. A start frame of 32 zero bits resets every LED to "waiting for data".
//! 2. One 32-bit LED frame per pixel: `111` marker, 5-bit global brightness,
//!    then blue, green and red at 8 bits each. The first LED keeps the first
//!    LED frame and forwards everything after it.
//! 3. An end frame. Each LED delays the data by half a clock cycle, so extra
//!    clock edges are needed to push the last pixels through the chain. This
//!    crate sends `03 00` for strips shorter than 64 pixels and twelve `FF`
//!    bytes for longer strips.
//!
//! ### Brightness
//! Every pixel carries a 5-bit global brightness (0-31) that scales its colour
//! channels in the LED itself. A [`Pixel`] can set it explicitly or use
//! [`Brightness::UseDefault`], which resolves to the strip's default brightness
//! or to a one-off override passed to [`DotStar::show_with_brightness`].
//!
//! ## Usage
//!
//! [`DotStar`] holds the pixels and writes encoded frames to any
//! [`Transport`]; every `embedded-hal` [`SpiBus`](embedded_hal::spi::SpiBus)
//! already is one. Strip length is a const generic, and the frame size is
//! computed at compile time with [`compute_frame_len`]:
//!
//! ```rust
//! # use core::convert::Infallible;
//! # use embedded_hal::spi::{ErrorType, SpiBus};
//! # struct MockSpi;
//! # impl ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn write(&mut self, _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer(&mut self, _: &mut [u8], _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # let spi = MockSpi;
//! use apa102_framebuffer::{compute_frame_len, Builder, DotStar, Pixel};
//!
//! const PIXELS: usize = 30;
//! const FRAME_LEN: usize = compute_frame_len(PIXELS);
//!
//! let config = Builder::new().default_brightness(8).auto_write(true).build().unwrap();
//! let mut strip = DotStar::<_, PIXELS, FRAME_LEN>::new(spi, config).unwrap();
//!
//! // with auto-write each call sends one frame
//! strip.fill(Pixel::rgb(255, 80, 0), 3).unwrap();
//! strip.set(1, Pixel::rgb(0, 0, 255)).unwrap();
//! ```
//!
//! The strip also implements `embedded-graphics`' `DrawTarget` as an
//! `N` x 1 canvas.
//!
//! ## Available Feature Flags
//!
//! ### `esp-dma` Feature
//! Switches the `ReadBuffer` implementation of [`frame::Frame`] from
//! `embedded-dma` to `esp-hal::dma`, so encoded frames can be sent by
//! `esp-hal` DMA transfers directly. The `esp32`, `esp32s3` and `esp32c6`
//! features select the chip and enable `esp-dma`.
//!
//! ```toml
//! [dependencies]
//! apa102-framebuffer = { version = "0.1.0", features = ["esp32s3"] }
//! ```
//!
//! ### `log` and `defmt` Features
//! Emit debug and trace messages through `log` or `defmt`. `defmt` also
//! implements `defmt::Format` for the public types. If both are enabled,
//! messages go to `defmt`.
#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use embedded_graphics::pixelcolor::Rgb888;

#[macro_use]
mod macros;

pub mod config;
pub mod driver;
pub mod error;
pub mod frame;
pub mod pixel;
pub mod transport;

pub use config::{BusConfig, Builder, Config, DEFAULT_BRIGHTNESS, DEFAULT_FREQUENCY_HZ};
pub use driver::DotStar;
pub use error::{ConfigError, Error};
pub use pixel::{Brightness, Pixel, MAX_BRIGHTNESS};
pub use transport::Transport;

/// Color type used by the `embedded-graphics` integration
pub type Color = Rgb888;

/// Computes the length of the end frame for a strip of `pixels` LEDs
///
/// # Arguments
///
/// * `pixels` - Number of LEDs on the strip
///
/// # Returns
///
/// 2 for strips shorter than 64 LEDs, 12 otherwise
#[must_use]
pub const fn end_frame_len(pixels: usize) -> usize {
    frame::end_frame(pixels).len()
}

/// Computes the encoded frame length for a strip of `pixels` LEDs
///
/// This is the `FRAME_LEN` parameter of [`DotStar`] and [`frame::Frame`].
///
/// # Arguments
///
/// * `pixels` - Number of LEDs on the strip
///
/// # Returns
///
/// Start frame, one LED frame per pixel and the end frame, in bytes
#[must_use]
pub const fn compute_frame_len(pixels: usize) -> usize {
    frame::START_FRAME.len() + pixels * frame::BYTES_PER_PIXEL + end_frame_len(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_frame_len() {
        assert_eq!(end_frame_len(0), 2);
        assert_eq!(end_frame_len(1), 2);
        assert_eq!(end_frame_len(63), 2);
        assert_eq!(end_frame_len(64), 12);
        assert_eq!(end_frame_len(144), 12);
    }

    #[test]
    fn test_compute_frame_len() {
        assert_eq!(compute_frame_len(0), 6);
        assert_eq!(compute_frame_len(1), 10);
        assert_eq!(compute_frame_len(63), 4 + 4 * 63 + 2);
        assert_eq!(compute_frame_len(64), 4 + 4 * 64 + 12);

        // the jump at the threshold is the end frame growing by ten bytes
        assert_eq!(compute_frame_len(64) - compute_frame_len(63), 4 + 10);

        for pixels in [8, 30, 60, 72, 144, 300] {
            assert_eq!(
                compute_frame_len(pixels),
                4 + 4 * pixels + end_frame_len(pixels)
            );
        }
    }

    #[test]
    fn test_helper_functions_const() {
        const PIXELS: usize = 144;
        const FRAME_LEN: usize = compute_frame_len(PIXELS);
        const END_LEN: usize = end_frame_len(PIXELS);

        assert_eq!(FRAME_LEN, 592);
        assert_eq!(END_LEN, 12);
    }

    #[test]
    fn test_common_strip_lengths() {
        // (pixels, frame bytes) for common strip lengths
        let strips = [(8, 38), (30, 126), (60, 246), (64, 272), (144, 592)];
        for (pixels, frame_len) in strips {
            assert_eq!(compute_frame_len(pixels), frame_len, "{pixels} pixels");
        }
    }

    #[test]
    fn test_color_type_alias() {
        use embedded_graphics::pixelcolor::RgbColor;

        let color: Color = Color::new(128, 64, 192);
        assert_eq!(color, Rgb888::new(128, 64, 192));
        assert_eq!(Color::RED.r(), 255);
    }
}

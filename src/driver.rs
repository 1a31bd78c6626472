//! APA102 strip driver.
//!
//! [`DotStar`] owns the pixel buffer, the strip's default brightness and the
//! transport. Mutations only touch memory unless auto-write is enabled, in
//! which case every successful mutation is followed by exactly one
//! [`show`](DotStar::show).
//!
//! # Example
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
//! use apa102_framebuffer::{compute_frame_len, Brightness, Config, DotStar, Pixel};
//!
//! const PIXELS: usize = 64;
//! const FRAME_LEN: usize = compute_frame_len(PIXELS);
//!
//! let mut strip = DotStar::<_, PIXELS, FRAME_LEN>::new(spi, Config::default()).unwrap();
//!
//! // first half dim green, second half bright green
//! for i in 0..32 {
//!     strip.set(i, Pixel::new(0, 150, 0, Brightness::Explicit(1))).unwrap();
//! }
//! strip.set_range(32..64, &[Pixel::new(0, 150, 0, Brightness::Explicit(31)); 32]).unwrap();
//! strip.show().unwrap();
//!
//! // everything red at the default brightness, then dimmed for one frame
//! strip.fill_all(Pixel::rgb(150, 0, 0)).unwrap();
//! strip.show().unwrap();
//! strip.show_with_brightness(Some(9)).unwrap();
//! ```

use core::ops::Range;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::prelude::{OriginDimensions, Size};

use crate::config::Config;
use crate::error::Error;
use crate::frame::Frame;
use crate::pixel::{Pixel, MAX_BRIGHTNESS};
use crate::transport::Transport;
use crate::{compute_frame_len, Color};

/// Driver for a strip of `N` APA102 LEDs.
///
/// # Type Parameters
/// - `T`: Transport the frames are written to
/// - `N`: Number of pixels on the strip
/// - `FRAME_LEN`: Encoded frame size, must be [`compute_frame_len`]`(N)`
pub struct DotStar<T: Transport, const N: usize, const FRAME_LEN: usize> {
    transport: T,
    pixels: [Pixel; N],
    default_brightness: u8,
    auto_write: bool,
    frame: Frame<FRAME_LEN>,
}

impl<T: Transport, const N: usize, const FRAME_LEN: usize> DotStar<T, N, FRAME_LEN> {
    /// Create a driver with every pixel set to [`Pixel::OFF`].
    ///
    /// The bus parameters of `config` are passed to
    /// [`Transport::configure`]. Nothing is transmitted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the transport rejects the bus
    /// parameters.
    pub fn new(mut transport: T, config: Config) -> Result<Self, Error<T::Error>> {
        const {
            assert!(
                FRAME_LEN == compute_frame_len(N),
                "FRAME_LEN must equal compute_frame_len(N)"
            );
        }
        transport.configure(config.bus()).map_err(Error::Transport)?;
        dotstar_debug!(
            "dotstar: {} pixels, default brightness {}, auto_write {}",
            N,
            config.default_brightness(),
            config.auto_write()
        );
        Ok(Self {
            transport,
            pixels: [Pixel::OFF; N],
            default_brightness: config.default_brightness(),
            auto_write: config.auto_write(),
            frame: Frame::new(),
        })
    }

    /// Number of pixels on the strip.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns `true` for a strip without pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// All pixels, in strip order.
    #[must_use]
    pub const fn pixels(&self) -> &[Pixel; N] {
        &self.pixels
    }

    /// The pixel at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= N`.
    pub fn get(&self, index: usize) -> Result<Pixel, Error<T::Error>> {
        self.pixels
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds { index, len: N })
    }

    /// The pixels in `range`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] if the range is reversed or ends
    /// past the strip.
    pub fn get_range(&self, range: Range<usize>) -> Result<&[Pixel], Error<T::Error>> {
        Self::check_range(&range)?;
        Ok(&self.pixels[range])
    }

    /// Replace the pixel at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= N`, leaving the strip
    /// untouched, or the auto-write transport error.
    pub fn set(&mut self, index: usize, pixel: impl Into<Pixel>) -> Result<(), Error<T::Error>> {
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len: N })?;
        *slot = pixel.into();
        self.written()
    }

    /// Replace the pixels in `range` with `pixels`.
    ///
    /// Either the whole range is written or, on error, nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] for a range outside the strip,
    /// [`Error::LengthMismatch`] if `pixels` is not exactly as long as the
    /// range, or the auto-write transport error.
    pub fn set_range(
        &mut self,
        range: Range<usize>,
        pixels: &[Pixel],
    ) -> Result<(), Error<T::Error>> {
        Self::check_range(&range)?;
        if pixels.len() != range.len() {
            return Err(Error::LengthMismatch {
                expected: range.len(),
                actual: pixels.len(),
            });
        }
        self.pixels[range].copy_from_slice(pixels);
        self.written()
    }

    /// Set every `step`th pixel, starting at index 0, to `pixel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStep`] if `step` is zero, or the auto-write
    /// transport error.
    pub fn fill(&mut self, pixel: impl Into<Pixel>, step: usize) -> Result<(), Error<T::Error>> {
        if step == 0 {
            return Err(Error::InvalidStep);
        }
        let pixel = pixel.into();
        for slot in self.pixels.iter_mut().step_by(step) {
            *slot = pixel;
        }
        self.written()
    }

    /// Set every pixel to `pixel`.
    ///
    /// # Errors
    ///
    /// Returns the auto-write transport error.
    pub fn fill_all(&mut self, pixel: impl Into<Pixel>) -> Result<(), Error<T::Error>> {
        self.fill(pixel, 1)
    }

    /// Set every pixel to [`Pixel::OFF`].
    ///
    /// # Errors
    ///
    /// Returns the auto-write transport error.
    pub fn clear(&mut self) -> Result<(), Error<T::Error>> {
        self.fill_all(Pixel::OFF)
    }

    /// Brightness used for pixels without an explicit brightness.
    #[must_use]
    pub const fn default_brightness(&self) -> u8 {
        self.default_brightness
    }

    /// Change the default brightness. Takes effect on the next frame; never
    /// transmits by itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBrightness`] for values above 31.
    pub fn set_default_brightness(&mut self, brightness: u8) -> Result<(), Error<T::Error>> {
        if brightness > MAX_BRIGHTNESS {
            return Err(Error::InvalidBrightness(brightness));
        }
        self.default_brightness = brightness;
        Ok(())
    }

    /// Whether mutations transmit immediately.
    #[must_use]
    pub const fn auto_write(&self) -> bool {
        self.auto_write
    }

    /// Enable or disable auto-write.
    pub fn set_auto_write(&mut self, auto_write: bool) {
        self.auto_write = auto_write;
    }

    /// Encode the strip and write it to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the transfer fails. Nothing is retried.
    pub fn show(&mut self) -> Result<(), Error<T::Error>> {
        self.show_with_brightness(None)
    }

    /// Like [`show`](Self::show), but pixels without an explicit brightness
    /// are sent at `brightness` instead of the default. The default itself is
    /// not changed, so `Some(0)` blanks those pixels for one frame while
    /// keeping their colours.
    ///
    /// Unlike an explicit pixel brightness, which is stored as given and
    /// masked to five bits on the wire, the override is checked like
    /// [`set_default_brightness`](Self::set_default_brightness): it replaces
    /// the default for the frame and follows the same `0..=31` rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBrightness`] for an override above 31, before
    /// anything is sent, or [`Error::Transport`] if the transfer fails.
    pub fn show_with_brightness(&mut self, brightness: Option<u8>) -> Result<(), Error<T::Error>> {
        if let Some(brightness) = brightness.filter(|&b| b > MAX_BRIGHTNESS) {
            return Err(Error::InvalidBrightness(brightness));
        }
        self.frame
            .encode_from(&self.pixels, self.default_brightness, brightness);
        dotstar_trace!("dotstar: writing {} byte frame", FRAME_LEN);
        self.transport
            .write(self.frame.as_bytes())
            .map_err(|err| {
                dotstar_debug!("dotstar: transport write failed");
                Error::Transport(err)
            })
    }

    /// The most recently encoded frame. All zeros before the first
    /// [`show`](Self::show).
    #[must_use]
    pub const fn frame(&self) -> &Frame<FRAME_LEN> {
        &self.frame
    }

    /// Consume the driver and return the transport.
    pub fn release(self) -> T {
        self.transport
    }

    fn check_range(range: &Range<usize>) -> Result<(), Error<T::Error>> {
        if range.start > range.end || range.end > N {
            return Err(Error::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: N,
            });
        }
        Ok(())
    }

    fn written(&mut self) -> Result<(), Error<T::Error>> {
        if self.auto_write {
            self.show()
        } else {
            Ok(())
        }
    }
}

impl<T: Transport, const N: usize, const FRAME_LEN: usize> OriginDimensions
    for DotStar<T, N, FRAME_LEN>
{
    fn size(&self) -> Size {
        Size::new(N as u32, 1)
    }
}

/// The strip is an `N` x 1 canvas. Drawing replaces colour channels and keeps
/// each pixel's brightness. With auto-write enabled, each `draw_iter` call
/// transmits once.
impl<T: Transport, const N: usize, const FRAME_LEN: usize> DrawTarget
    for DotStar<T, N, FRAME_LEN>
{
    type Color = Color;

    type Error = Error<T::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for embedded_graphics::Pixel(point, color) in pixels {
            if point.y != 0 || point.x < 0 {
                continue;
            }
            if let Some(pixel) = self.pixels.get_mut(point.x as usize) {
                pixel.set_color(color);
            }
        }
        self.written()
    }
}

impl<T: Transport, const N: usize, const FRAME_LEN: usize> core::fmt::Debug
    for DotStar<T, N, FRAME_LEN>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DotStar")
            .field("len", &N)
            .field("frame_len", &FRAME_LEN)
            .field("default_brightness", &self.default_brightness)
            .field("auto_write", &self.auto_write)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl<T: Transport, const N: usize, const FRAME_LEN: usize> defmt::Format
    for DotStar<T, N, FRAME_LEN>
{
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DotStar<{}, {}>", N, FRAME_LEN);
        defmt::write!(f, " default_brightness: {}", self.default_brightness);
        defmt::write!(f, " auto_write: {}", self.auto_write);
    }
}

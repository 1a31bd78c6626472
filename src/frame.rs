//! Wire encoding of a strip's pixels.
//!
//! An APA102 strip is written as one contiguous bit stream:
//!
//! ```text
//! [ 00 00 00 00 ]            start frame, 4 bytes
//! [ 111bbbbb  B  G  R ]      one LED frame per pixel, b = 5-bit brightness
//! ...
//! [ end frame ]              03 00 if fewer than 64 pixels, else 12 x FF
//! ```
//!
//! Every LED delays the data by half a clock, so the end frame only exists to
//! supply enough trailing clock edges for the last pixels to latch.
//!
//! [`encode`] produces that stream lazily from any pixel slice. [`Frame`]
//! stores it in a fixed-size, 4-byte aligned buffer that can be handed to a
//! DMA engine as-is.

use bitfield::bitfield;
#[cfg(not(feature = "esp-dma"))]
use embedded_dma::ReadBuffer;
#[cfg(feature = "esp-dma")]
use esp_hal::dma::ReadBuffer;

use crate::compute_frame_len;
use crate::pixel::{Pixel, MAX_BRIGHTNESS};

/// Start frame sent before the first pixel.
pub const START_FRAME: [u8; 4] = [0x00; 4];

/// End frame for strips shorter than [`LONG_END_FRAME_THRESHOLD`] pixels.
pub const SHORT_END_FRAME: [u8; 2] = [0x03, 0x00];

/// End frame for strips of [`LONG_END_FRAME_THRESHOLD`] pixels or more.
pub const LONG_END_FRAME: [u8; 12] = [0xFF; 12];

/// Pixel count from which [`LONG_END_FRAME`] is used.
pub const LONG_END_FRAME_THRESHOLD: usize = 64;

/// Bytes per LED frame.
pub const BYTES_PER_PIXEL: usize = 4;

bitfield! {
    /// First byte of every LED frame.
    ///
    /// The bit layout is as follows:
    /// - Bits 7-5: Marker, always `0b111`
    /// - Bits 4-0: Global brightness
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    #[repr(transparent)]
    struct Header(u8);
    impl Debug;
    pub u8, marker, set_marker: 7, 5;
    pub u8, brightness, set_brightness: 4, 0;
}

impl Header {
    const MARKER: u8 = 0b111;

    fn new(brightness: u8) -> Self {
        let mut header = Self(0);
        header.set_marker(Self::MARKER);
        // out-of-range values must not leak into the marker bits
        header.set_brightness(brightness & MAX_BRIGHTNESS);
        header
    }
}

/// End frame to send after `pixels` LED frames.
#[must_use]
pub const fn end_frame(pixels: usize) -> &'static [u8] {
    if pixels < LONG_END_FRAME_THRESHOLD {
        &SHORT_END_FRAME
    } else {
        &LONG_END_FRAME
    }
}

/// Encode a single LED frame as `[header, blue, green, red]`.
///
/// `fallback` is the brightness used when the pixel defers to the default.
#[must_use]
pub fn encode_pixel(pixel: &Pixel, fallback: u8) -> [u8; BYTES_PER_PIXEL] {
    let header = Header::new(pixel.brightness.resolve(fallback));
    [header.0, pixel.blue, pixel.green, pixel.red]
}

/// Encode `pixels` into the complete wire byte stream.
///
/// Pixels with [`Brightness::UseDefault`](crate::Brightness::UseDefault) are
/// sent at `brightness_override` when given, otherwise at
/// `default_brightness`. The same value is used for the whole frame. Pixels
/// with an explicit brightness ignore both.
///
/// # Example
/// ```rust
/// use apa102_framebuffer::frame::encode;
/// use apa102_framebuffer::{Brightness, Pixel};
///
/// let pixels = [Pixel::rgb(1, 2, 3), Pixel::new(4, 5, 6, Brightness::Explicit(31))];
/// let bytes: Vec<u8> = encode(&pixels, 3, None).collect();
/// assert_eq!(
///     bytes,
///     [0, 0, 0, 0, 0xE3, 3, 2, 1, 0xFF, 6, 5, 4, 0x03, 0x00]
/// );
/// ```
pub fn encode(
    pixels: &[Pixel],
    default_brightness: u8,
    brightness_override: Option<u8>,
) -> impl Iterator<Item = u8> + '_ {
    let fallback = brightness_override.unwrap_or(default_brightness);
    START_FRAME
        .into_iter()
        .chain(
            pixels
                .iter()
                .flat_map(move |pixel| encode_pixel(pixel, fallback)),
        )
        .chain(end_frame(pixels.len()).iter().copied())
}

/// A fully encoded strip update of `FRAME_LEN` bytes.
///
/// `FRAME_LEN` must be [`compute_frame_len`] of the pixel count; encoding
/// with any other value fails to compile.
///
/// # Example
/// ```rust
/// use apa102_framebuffer::frame::Frame;
/// use apa102_framebuffer::{compute_frame_len, Pixel};
///
/// const PIXELS: usize = 8;
/// const FRAME_LEN: usize = compute_frame_len(PIXELS);
///
/// let pixels = [Pixel::rgb(255, 0, 0); PIXELS];
/// let frame = Frame::<FRAME_LEN>::encode(&pixels, 3, None);
/// assert_eq!(frame.as_bytes().len(), 4 + 4 * PIXELS + 2);
/// ```
///
/// A frame handed to DMA must stay where it is, so `Frame` is not `Copy` and
/// only `&mut Frame` implements `ReadBuffer`:
///
/// ```rust,compile_fail
/// use apa102_framebuffer::frame::Frame;
///
/// let frame = Frame::<6>::new();
/// let borrowed = &frame;
/// let copied: Frame<6> = *borrowed;
/// ```
#[derive(Clone, PartialEq, Eq)]
#[repr(C)]
#[repr(align(4))]
pub struct Frame<const FRAME_LEN: usize> {
    bytes: [u8; FRAME_LEN],
}

impl<const FRAME_LEN: usize> Frame<FRAME_LEN> {
    /// An all-zero frame, not yet encoded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_LEN],
        }
    }

    /// Encode `pixels` into a new frame. See [`encode`] for the brightness rules.
    #[must_use]
    pub fn encode<const N: usize>(
        pixels: &[Pixel; N],
        default_brightness: u8,
        brightness_override: Option<u8>,
    ) -> Self {
        let mut frame = Self::new();
        frame.encode_from(pixels, default_brightness, brightness_override);
        frame
    }

    /// Re-encode `pixels` into this frame, overwriting every byte.
    pub fn encode_from<const N: usize>(
        &mut self,
        pixels: &[Pixel; N],
        default_brightness: u8,
        brightness_override: Option<u8>,
    ) {
        const {
            assert!(
                FRAME_LEN == compute_frame_len(N),
                "FRAME_LEN must equal compute_frame_len(N)"
            );
        }
        let stream = encode(pixels, default_brightness, brightness_override);
        for (dst, src) in self.bytes.iter_mut().zip(stream) {
            *dst = src;
        }
    }

    /// The encoded bytes, in transmission order.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes in the frame.
    #[must_use]
    pub const fn len(&self) -> usize {
        FRAME_LEN
    }

    /// Returns `true` if the frame holds no bytes. Encoded frames never are.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        FRAME_LEN == 0
    }
}

impl<const FRAME_LEN: usize> Default for Frame<FRAME_LEN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const FRAME_LEN: usize> AsRef<[u8]> for Frame<FRAME_LEN> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

unsafe impl<const FRAME_LEN: usize> ReadBuffer for &mut Frame<FRAME_LEN> {
    #[cfg(not(feature = "esp-dma"))]
    type Word = u8;

    unsafe fn read_buffer(&self) -> (*const u8, usize) {
        let ptr = self.bytes.as_ptr();
        let len = core::mem::size_of_val(&self.bytes);
        (ptr, len)
    }
}

impl<const FRAME_LEN: usize> core::fmt::Debug for Frame<FRAME_LEN> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Frame")
            .field("len", &FRAME_LEN)
            .field("bytes", &self.bytes.as_slice())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<const FRAME_LEN: usize> defmt::Format for Frame<FRAME_LEN> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Frame<{}> {=[u8]:x}", FRAME_LEN, &self.bytes[..]);
    }
}

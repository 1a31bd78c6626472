//! Per-pixel colour and brightness records.
//!
//! Every LED on an APA102 strip carries its own 5-bit global brightness in
//! addition to the 8-bit red, green and blue channels. A [`Pixel`] either
//! names that brightness explicitly or defers to the strip's default
//! brightness via [`Brightness::UseDefault`].

use embedded_graphics::pixelcolor::RgbColor;

use crate::Color;

/// Largest brightness value the strip understands (5 bits).
pub const MAX_BRIGHTNESS: u8 = 0b0001_1111;

/// Brightness of a single pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Brightness {
    /// Use the override passed to `show_with_brightness`, or the strip default.
    #[default]
    UseDefault,
    /// Fixed brightness for this pixel. Only the low five bits reach the wire.
    Explicit(u8),
}

impl Brightness {
    /// Resolve to a concrete brightness, using `fallback` for
    /// [`Brightness::UseDefault`].
    #[must_use]
    pub const fn resolve(self, fallback: u8) -> u8 {
        match self {
            Brightness::UseDefault => fallback,
            Brightness::Explicit(value) => value,
        }
    }

    /// Returns `true` for [`Brightness::UseDefault`].
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Brightness::UseDefault)
    }
}

impl From<u8> for Brightness {
    fn from(value: u8) -> Self {
        Brightness::Explicit(value)
    }
}

impl From<Option<u8>> for Brightness {
    fn from(value: Option<u8>) -> Self {
        value.map_or(Brightness::UseDefault, Brightness::Explicit)
    }
}

/// Colour and brightness of one LED.
///
/// Storing a pixel is lossless: whatever is written is read back unchanged.
/// Encoding happens only when the strip is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
    /// Per-pixel brightness
    pub brightness: Brightness,
}

impl Pixel {
    /// Black at the default brightness. Every pixel of a new strip starts here.
    pub const OFF: Self = Self::rgb(0, 0, 0);

    /// Create a pixel with an explicit brightness setting.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8, brightness: Brightness) -> Self {
        Self {
            red,
            green,
            blue,
            brightness,
        }
    }

    /// Create a pixel that uses the default brightness.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, Brightness::UseDefault)
    }

    /// Same colour, different brightness.
    #[must_use]
    pub const fn with_brightness(self, brightness: Brightness) -> Self {
        Self { brightness, ..self }
    }

    /// Colour channels as an `embedded-graphics` colour.
    #[must_use]
    pub const fn color(&self) -> Color {
        Color::new(self.red, self.green, self.blue)
    }

    /// Replace the colour channels, keeping the brightness.
    pub fn set_color(&mut self, color: Color) {
        self.red = color.r();
        self.green = color.g();
        self.blue = color.b();
    }
}

impl From<Color> for Pixel {
    fn from(color: Color) -> Self {
        Self::rgb(color.r(), color.g(), color.b())
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::rgb(red, green, blue)
    }
}

impl From<(u8, u8, u8, Brightness)> for Pixel {
    fn from((red, green, blue, brightness): (u8, u8, u8, Brightness)) -> Self {
        Self::new(red, green, blue, brightness)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Brightness {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Brightness::UseDefault => defmt::write!(f, "UseDefault"),
            Brightness::Explicit(value) => defmt::write!(f, "Explicit({})", value),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Pixel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Pixel({}, {}, {}, {})",
            self.red,
            self.green,
            self.blue,
            self.brightness
        );
    }
}

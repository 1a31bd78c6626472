//! Strip configuration.
//!
//! [`Config`] holds the state the driver itself uses (default brightness,
//! auto-write) and a [`BusConfig`] that is handed untouched to the
//! [`Transport`](crate::Transport) when the driver is created.

use crate::error::ConfigError;
use crate::pixel::MAX_BRIGHTNESS;

/// Default brightness of a new strip.
pub const DEFAULT_BRIGHTNESS: u8 = 3;

/// Default serial bus clock, in hertz.
pub const DEFAULT_FREQUENCY_HZ: u32 = 1_000_000;

/// Serial bus parameters.
///
/// None of these are interpreted by the driver. Pin ids and the bus selector
/// are board specific and may be left unset when the transport was already
/// set up by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// Data (MOSI) pin
    pub data_pin: Option<u8>,
    /// Clock (SCK) pin
    pub clock_pin: Option<u8>,
    /// Bus selector
    pub bus: u8,
    /// Bus clock in hertz
    pub frequency_hz: u32,
}

impl BusConfig {
    /// Bus 0 at [`DEFAULT_FREQUENCY_HZ`], no pins assigned.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data_pin: None,
            clock_pin: None,
            bus: 0,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
        }
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Validated strip configuration. Create one with [`Builder`] or
/// [`Config::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    default_brightness: u8,
    auto_write: bool,
    bus: BusConfig,
}

impl Config {
    /// Brightness used for pixels without an explicit brightness.
    #[must_use]
    pub const fn default_brightness(&self) -> u8 {
        self.default_brightness
    }

    /// Whether every mutation immediately transmits the strip.
    #[must_use]
    pub const fn auto_write(&self) -> bool {
        self.auto_write
    }

    /// Bus parameters passed to the transport.
    #[must_use]
    pub const fn bus(&self) -> &BusConfig {
        &self.bus
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_brightness: DEFAULT_BRIGHTNESS,
            auto_write: false,
            bus: BusConfig::new(),
        }
    }
}

/// Builder for [`Config`].
///
/// # Example
/// ```rust
/// use apa102_framebuffer::Builder;
///
/// let config = Builder::new()
///     .pins(19, 18)
///     .frequency_hz(4_000_000)
///     .default_brightness(15)
///     .auto_write(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.default_brightness(), 15);
/// assert_eq!(config.bus().data_pin, Some(19));
/// assert!(Builder::new().default_brightness(32).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Start from [`Config::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Data and clock pin ids.
    pub fn pins(mut self, data_pin: u8, clock_pin: u8) -> Self {
        self.config.bus.data_pin = Some(data_pin);
        self.config.bus.clock_pin = Some(clock_pin);
        self
    }

    /// Bus selector.
    pub fn bus(mut self, bus: u8) -> Self {
        self.config.bus.bus = bus;
        self
    }

    /// Bus clock in hertz.
    pub fn frequency_hz(mut self, frequency_hz: u32) -> Self {
        self.config.bus.frequency_hz = frequency_hz;
        self
    }

    /// Brightness for pixels without an explicit brightness, `0..=31`.
    pub fn default_brightness(mut self, brightness: u8) -> Self {
        self.config.default_brightness = brightness;
        self
    }

    /// Transmit the strip after every mutation.
    pub fn auto_write(mut self, auto_write: bool) -> Self {
        self.config.auto_write = auto_write;
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBrightness`] if the default brightness is
    /// above 31 and [`ConfigError::InvalidFrequency`] for a zero bus clock.
    pub fn build(self) -> Result<Config, ConfigError> {
        let config = self.config;
        if config.default_brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::InvalidBrightness(config.default_brightness));
        }
        if config.bus.frequency_hz == 0 {
            return Err(ConfigError::InvalidFrequency);
        }
        Ok(config)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "BusConfig {{ data_pin: {}, clock_pin: {}, bus: {}, frequency_hz: {} }}",
            self.data_pin,
            self.clock_pin,
            self.bus,
            self.frequency_hz
        );
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Config {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Config {{ default_brightness: {}, auto_write: {}, bus: {} }}",
            self.default_brightness,
            self.auto_write,
            self.bus
        );
    }
}

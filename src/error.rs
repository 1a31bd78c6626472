//! Error types.

use core::fmt::Debug;

/// Errors returned by [`DotStar`](crate::DotStar) operations.
///
/// `E` is the error type of the underlying [`Transport`](crate::Transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error<E: Debug> {
    /// Pixel index past the end of the strip.
    #[error("pixel index {index} out of bounds for strip of {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Strip length
        len: usize,
    },
    /// Pixel range not contained in the strip, or reversed.
    #[error("pixel range {start}..{end} out of bounds for strip of {len}")]
    RangeOutOfBounds {
        /// Range start
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Strip length
        len: usize,
    },
    /// Number of pixels supplied does not match the target range.
    #[error("expected {expected} pixels, got {actual}")]
    LengthMismatch {
        /// Length of the target range
        expected: usize,
        /// Number of pixels supplied
        actual: usize,
    },
    /// `fill` was called with a step of zero.
    #[error("fill step must be at least 1")]
    InvalidStep,
    /// Brightness above [`MAX_BRIGHTNESS`](crate::MAX_BRIGHTNESS).
    #[error("brightness {0} exceeds 31")]
    InvalidBrightness(u8),
    /// The transport failed to send the frame.
    #[error("transport error: {0:?}")]
    Transport(E),
}

/// Errors returned by [`Builder::build`](crate::Builder::build).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Default brightness above [`MAX_BRIGHTNESS`](crate::MAX_BRIGHTNESS).
    #[error("default brightness {0} exceeds 31")]
    InvalidBrightness(u8),
    /// Bus clock of zero hertz.
    #[error("bus frequency must be non-zero")]
    InvalidFrequency,
}

#[cfg(feature = "defmt")]
impl<E: Debug> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::IndexOutOfBounds { index, len } => {
                defmt::write!(f, "IndexOutOfBounds({}, len {})", index, len);
            }
            Error::RangeOutOfBounds { start, end, len } => {
                defmt::write!(f, "RangeOutOfBounds({}..{}, len {})", start, end, len);
            }
            Error::LengthMismatch { expected, actual } => {
                defmt::write!(f, "LengthMismatch(expected {}, got {})", expected, actual);
            }
            Error::InvalidStep => defmt::write!(f, "InvalidStep"),
            Error::InvalidBrightness(value) => defmt::write!(f, "InvalidBrightness({})", value),
            Error::Transport(_) => defmt::write!(f, "Transport"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::InvalidBrightness(value) => {
                defmt::write!(f, "InvalidBrightness({})", value);
            }
            ConfigError::InvalidFrequency => defmt::write!(f, "InvalidFrequency"),
        }
    }
}

//! Byte sink the encoded frames are written to.

use core::fmt::Debug;

use embedded_hal::spi::SpiBus;

use crate::config::BusConfig;

/// Something that can clock a complete frame out to the strip.
///
/// Every [`embedded_hal::spi::SpiBus<u8>`] is a transport. Implement this
/// directly for anything else, such as a bit-banged pin pair.
pub trait Transport {
    /// Error returned on a failed transfer.
    type Error: Debug;

    /// Called once when the driver is created.
    ///
    /// The default implementation ignores the parameters, which is right for
    /// buses the caller has already set up.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if it cannot apply `bus`.
    fn configure(&mut self, bus: &BusConfig) -> Result<(), Self::Error> {
        let _ = bus;
        Ok(())
    }

    /// Send `bytes` in order. Returns once every byte has been sent.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the transfer fails.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<S: SpiBus<u8>> Transport for S {
    type Error = S::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        SpiBus::write(self, bytes)?;
        SpiBus::flush(self)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    extern crate std;

    use std::vec::Vec;

    use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus};

    /// Records every write as one entry. Fails all writes while `fail` is set.
    #[derive(Debug, Default)]
    pub(crate) struct MockSpi {
        pub(crate) writes: Vec<Vec<u8>>,
        pub(crate) flushes: usize,
        pub(crate) fail: bool,
    }

    impl ErrorType for MockSpi {
        type Error = ErrorKind;
    }

    impl SpiBus<u8> for MockSpi {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.writes.push(words.to_vec());
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            read.fill(0);
            SpiBus::write(self, write)
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            let copy = words.to_vec();
            words.fill(0);
            SpiBus::write(self, &copy)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }
}

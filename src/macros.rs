// Logging shims, in the style of smoltcp's macros.rs. `defmt` wins when both
// logging features are enabled.
#[cfg(feature = "defmt")]
macro_rules! dotstar_log {
    (trace, $($arg:expr),*) => { defmt::trace!($($arg),*) };
    (debug, $($arg:expr),*) => { defmt::debug!($($arg),*) };
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! dotstar_log {
    (trace, $($arg:expr),*) => { log::trace!($($arg),*) };
    (debug, $($arg:expr),*) => { log::debug!($($arg),*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! dotstar_log {
    ($level:ident, $($arg:expr),*) => {{ $( let _ = $arg; )* }}
}

macro_rules! dotstar_trace {
    ($($arg:expr),*) => (dotstar_log!(trace, $($arg),*));
}

macro_rules! dotstar_debug {
    ($($arg:expr),*) => (dotstar_log!(debug, $($arg),*));
}

//! Error handling primitives for the TLE9201SG driver.

use embedded_hal::{digital, pwm};

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Any error reported by the SPI interface (bus or chip-select).
    Interface(E),
    /// The DIS or DIR control line rejected a level change.
    Pin(digital::ErrorKind),
    /// The PWM output rejected a request.
    Pwm(pwm::ErrorKind),
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}

//! Bus and peripheral abstractions used by the TLE9201SG driver.

pub mod pwm;
pub mod spi;

pub use self::pwm::PwmOutput;

/// Abstraction over the single-byte SPI access the TLE9201SG needs.
///
/// Chip-select framing is explicit: callers open a transaction, issue the
/// byte operations and close it again.
pub trait Tle9201sgInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Asserts chip-select.
    fn begin_transaction(&mut self) -> core::result::Result<(), Self::Error>;

    /// Completes pending transfers and deasserts chip-select.
    fn end_transaction(&mut self) -> core::result::Result<(), Self::Error>;

    /// Sends exactly one byte.
    fn write(&mut self, byte: u8) -> core::result::Result<(), Self::Error>;

    /// Receives exactly one byte.
    fn read(&mut self) -> core::result::Result<u8, Self::Error>;

    /// Sends a command byte and clocks the chip's answer back.
    fn write_read(&mut self, command: u8) -> core::result::Result<u8, Self::Error> {
        self.write(command)?;
        self.read()
    }
}

//! SPI interface implementation built on top of `embedded-hal` `SpiBus`.
//!
//! The TLE9201SG sits on one of two SPI master peripherals. The binding owns
//! the bus of that channel together with the chip-select line; which channel
//! is in use is fixed by the [`SpiChannel`] variant chosen at construction.

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use super::Tle9201sgInterface;
use crate::params::ChannelId;

/// Errors raised by [`SpiInterface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceError {
    /// The selected SPI bus failed.
    Spi(spi::ErrorKind),
    /// The chip-select line could not be driven.
    ChipSelect(digital::ErrorKind),
}

/// Bus of one of the two SPI channels.
pub enum SpiChannel<CH1, CH2 = CH1> {
    /// Chip wired to SPI channel 1.
    Channel1(CH1),
    /// Chip wired to SPI channel 2.
    Channel2(CH2),
}

impl<CH1, CH2> SpiChannel<CH1, CH2> {
    /// Returns the identifier of the bound channel.
    pub fn id(&self) -> ChannelId {
        match self {
            Self::Channel1(_) => ChannelId::Channel1,
            Self::Channel2(_) => ChannelId::Channel2,
        }
    }
}

impl<CH1, CH2> SpiChannel<CH1, CH2>
where
    CH1: SpiBus,
    CH2: SpiBus,
{
    fn write(&mut self, data: &[u8]) -> core::result::Result<(), spi::ErrorKind> {
        match self {
            Self::Channel1(bus) => bus.write(data).map_err(|e| spi::Error::kind(&e)),
            Self::Channel2(bus) => bus.write(data).map_err(|e| spi::Error::kind(&e)),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<(), spi::ErrorKind> {
        match self {
            Self::Channel1(bus) => bus.read(buf).map_err(|e| spi::Error::kind(&e)),
            Self::Channel2(bus) => bus.read(buf).map_err(|e| spi::Error::kind(&e)),
        }
    }

    fn flush(&mut self) -> core::result::Result<(), spi::ErrorKind> {
        match self {
            Self::Channel1(bus) => bus.flush().map_err(|e| spi::Error::kind(&e)),
            Self::Channel2(bus) => bus.flush().map_err(|e| spi::Error::kind(&e)),
        }
    }
}

/// SPI-based interface implementation for the TLE9201SG driver.
pub struct SpiInterface<CS, CH1, CH2 = CH1> {
    cs: CS,
    channel: SpiChannel<CH1, CH2>,
}

impl<CS, CH1, CH2> SpiInterface<CS, CH1, CH2> {
    /// Creates a new interface from a chip-select pin and a channel binding.
    pub const fn new(cs: CS, channel: SpiChannel<CH1, CH2>) -> Self {
        Self { cs, channel }
    }

    /// Returns the identifier of the bound channel.
    pub fn channel_id(&self) -> ChannelId {
        self.channel.id()
    }

    /// Provides mutable access to the wrapped channel.
    pub fn channel_mut(&mut self) -> &mut SpiChannel<CH1, CH2> {
        &mut self.channel
    }

    /// Consumes the interface and returns the chip-select pin and channel.
    pub fn release(self) -> (CS, SpiChannel<CH1, CH2>) {
        (self.cs, self.channel)
    }
}

impl<CS, BUS> SpiInterface<CS, BUS, BUS> {
    /// Binds the chip to SPI channel 1.
    pub const fn channel1(cs: CS, bus: BUS) -> Self {
        Self::new(cs, SpiChannel::Channel1(bus))
    }

    /// Binds the chip to SPI channel 2.
    pub const fn channel2(cs: CS, bus: BUS) -> Self {
        Self::new(cs, SpiChannel::Channel2(bus))
    }
}

impl<CS, CH1, CH2> Tle9201sgInterface for SpiInterface<CS, CH1, CH2>
where
    CS: OutputPin,
    CH1: SpiBus,
    CH2: SpiBus,
{
    type Error = InterfaceError;

    fn begin_transaction(&mut self) -> core::result::Result<(), Self::Error> {
        self.cs
            .set_low()
            .map_err(|e| InterfaceError::ChipSelect(digital::Error::kind(&e)))
    }

    fn end_transaction(&mut self) -> core::result::Result<(), Self::Error> {
        let flushed = self.channel.flush().map_err(InterfaceError::Spi);
        self.cs
            .set_high()
            .map_err(|e| InterfaceError::ChipSelect(digital::Error::kind(&e)))?;
        flushed
    }

    fn write(&mut self, byte: u8) -> core::result::Result<(), Self::Error> {
        self.channel
            .write(core::slice::from_ref(&byte))
            .map_err(InterfaceError::Spi)
    }

    fn read(&mut self) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.channel.read(&mut value).map_err(InterfaceError::Spi)?;
        Ok(value[0])
    }
}

#[cfg(test)]
mod tests {
    use super::{InterfaceError, SpiChannel, SpiInterface};
    use crate::interface::Tle9201sgInterface;
    use crate::params::ChannelId;
    use embedded_hal::spi::ErrorKind;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock,
        State as PinState,
        Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    struct FailingBus;

    impl embedded_hal::spi::ErrorType for FailingBus {
        type Error = ErrorKind;
    }

    impl embedded_hal::spi::SpiBus for FailingBus {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Err(ErrorKind::ModeFault)
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
            Err(ErrorKind::Overrun)
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            panic!("transfer is never used by the driver");
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            panic!("transfer_in_place is never used by the driver");
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn write_read_sends_command_then_reads_answer() {
        let mut cs = PinMock::new(&[]);
        let mut bus = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0x20]),
            SpiTransaction::read_vec(vec![0xB3]),
        ]);
        let mut interface = SpiInterface::channel1(cs.clone(), bus.clone());

        assert_eq!(interface.write_read(0x20).unwrap(), 0xB3);

        cs.done();
        bus.done();
    }

    #[test]
    fn transaction_frames_with_chip_select() {
        let mut cs = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let mut bus = SpiMock::new(&[SpiTransaction::flush()]);
        let mut interface = SpiInterface::channel1(cs.clone(), bus.clone());

        interface.begin_transaction().unwrap();
        interface.end_transaction().unwrap();

        cs.done();
        bus.done();
    }

    #[test]
    fn channel2_binding_only_touches_channel2_bus() {
        let mut cs = PinMock::new(&[]);
        let mut bus2 = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0x80]),
            SpiTransaction::read_vec(vec![0x11]),
        ]);
        let mut interface: SpiInterface<_, FailingBus, _> =
            SpiInterface::new(cs.clone(), SpiChannel::Channel2(bus2.clone()));

        assert_eq!(interface.channel_id(), ChannelId::Channel2);
        interface.write(0x80).unwrap();
        assert_eq!(interface.read().unwrap(), 0x11);

        cs.done();
        bus2.done();
    }

    #[test]
    fn bus_errors_are_reported_by_kind() {
        let mut cs = PinMock::new(&[]);
        let mut interface = SpiInterface::channel1(cs.clone(), FailingBus);

        assert_eq!(interface.write(0x00), Err(InterfaceError::Spi(ErrorKind::Overrun)));
        assert_eq!(interface.read(), Err(InterfaceError::Spi(ErrorKind::ModeFault)));

        cs.done();
    }

    #[test]
    fn end_transaction_releases_chip_select_when_flush_fails() {
        let mut cs = PinMock::new(&[PinTransaction::set(PinState::High)]);
        let mut interface = SpiInterface::channel2(cs.clone(), FailingBus);

        assert_eq!(
            interface.end_transaction(),
            Err(InterfaceError::Spi(ErrorKind::Other))
        );

        cs.done();
    }
}

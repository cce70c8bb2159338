//! High-level TLE9201SG device driver implementation.

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm;
use embedded_hal::spi::SpiBus;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::spi::{SpiChannel, SpiInterface};
use crate::interface::{PwmOutput, Tle9201sgInterface};
use crate::params::Direction;
use crate::registers::{
    Control,
    Diagnosis,
    CMD_RD_CTRL,
    CMD_RD_DIA,
    CMD_RD_REV,
    CMD_RES_DIA,
    CMD_WR_CTRL,
    CMD_WR_CTRL_RD_DIA,
};

/// High-level synchronous driver for one TLE9201SG H-bridge.
///
/// `DIS` is the active-high disable line, `DIR` the direction line and `PWM`
/// the timer output wired to the bridge's PWM input.
pub struct Tle9201sg<IFACE, DIS, DIR, PWM> {
    id: u8,
    interface: IFACE,
    dis: DIS,
    dir: DIR,
    pwm: PWM,
    config: Config,
}

impl<IFACE, DIS, DIR, PWM> Tle9201sg<IFACE, DIS, DIR, PWM> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from its control lines and bus interface.
    pub fn new(id: u8, interface: IFACE, dis: DIS, dir: DIR, pwm: PWM, config: Config) -> Self {
        Self {
            id,
            interface,
            dis,
            dir,
            pwm,
            config,
        }
    }

    /// Identifier given to this bridge at construction.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Returns a shared reference to the start-up configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Consumes the driver and returns the owned peripherals.
    pub fn release(self) -> (IFACE, DIS, DIR, PWM) {
        (self.interface, self.dis, self.dir, self.pwm)
    }
}

impl<CS, CH1, CH2, DIS, DIR, PWM> Tle9201sg<SpiInterface<CS, CH1, CH2>, DIS, DIR, PWM>
where
    CS: OutputPin,
    CH1: SpiBus,
    CH2: SpiBus,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor binding the chip to `channel` with `cs` as chip-select.
    pub fn new_spi(
        id: u8,
        cs: CS,
        channel: SpiChannel<CH1, CH2>,
        dis: DIS,
        dir: DIR,
        pwm: PWM,
        config: Config,
    ) -> Self {
        Self::new(id, SpiInterface::new(cs, channel), dis, dir, pwm, config)
    }
}

impl<CS, BUS, DIS, DIR, PWM> Tle9201sg<SpiInterface<CS, BUS>, DIS, DIR, PWM>
where
    CS: OutputPin,
    BUS: SpiBus,
{
    /// Binds the chip to SPI channel 1 with `cs` as chip-select.
    pub fn new_spi_channel1(
        id: u8,
        cs: CS,
        bus: BUS,
        dis: DIS,
        dir: DIR,
        pwm: PWM,
        config: Config,
    ) -> Self {
        Self::new(id, SpiInterface::channel1(cs, bus), dis, dir, pwm, config)
    }

    /// Binds the chip to SPI channel 2 with `cs` as chip-select.
    pub fn new_spi_channel2(
        id: u8,
        cs: CS,
        bus: BUS,
        dis: DIS,
        dir: DIR,
        pwm: PWM,
        config: Config,
    ) -> Self {
        Self::new(id, SpiInterface::channel2(cs, bus), dis, dir, pwm, config)
    }
}

impl<IFACE, CommE, DIS, DIR, PWM> Tle9201sg<IFACE, DIS, DIR, PWM>
where
    IFACE: Tle9201sgInterface<Error = CommE>,
    DIS: OutputPin,
    DIR: OutputPin,
    PWM: PwmOutput,
{
    // ==================================================================
    // == Initialization =================================================
    // ==================================================================
    /// Puts the bridge into its safe state and applies the configuration.
    ///
    /// The duty cycle is zeroed and the output disabled before the
    /// configuration is even checked, so a rejected configuration still
    /// leaves the motor stopped.
    pub fn init(&mut self) -> Result<(), CommE> {
        self.set_duty_cycle(0)?;
        self.disable()?;

        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        let config = self.config;
        if let Some(hz) = config.frequency_hz {
            self.set_frequency(hz)?;
        }
        if let Some(direction) = config.direction {
            self.set_direction(direction)?;
        }
        if let Some(control) = config.control {
            self.write_control(control)?;
        }

        debug!("tle9201sg[{}]: initialized", self.id);
        Ok(())
    }

    // ==================================================================
    // == Output Stage ===================================================
    // ==================================================================
    /// Enables the output stage by pulling DIS low.
    pub fn enable(&mut self) -> Result<(), CommE> {
        self.dis.set_low().map_err(pin_error)
    }

    /// Disables the output stage by driving DIS high.
    pub fn disable(&mut self) -> Result<(), CommE> {
        self.dis.set_high().map_err(pin_error)
    }

    /// Latches the rotation direction on the DIR pin.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), CommE> {
        let latched = match direction {
            Direction::Forward => self.dir.set_high(),
            Direction::Backward => self.dir.set_low(),
        };
        latched.map_err(pin_error)
    }

    /// Latches `direction`, then enables the output.
    pub fn start_motor(&mut self, direction: Direction) -> Result<(), CommE> {
        // DIR must settle before the bridge drives, or the motor kicks the old way.
        self.set_direction(direction)?;
        self.enable()?;
        debug!("tle9201sg[{}]: motor started {}", self.id, direction);
        Ok(())
    }

    /// Disables the output. The DIR pin keeps its last level.
    pub fn stop_motor(&mut self) -> Result<(), CommE> {
        self.disable()?;
        debug!("tle9201sg[{}]: motor stopped", self.id);
        Ok(())
    }

    // ==================================================================
    // == PWM ============================================================
    // ==================================================================
    /// Forwards `value` to the PWM output. Not range-checked.
    pub fn set_duty_cycle(&mut self, value: u32) -> Result<(), CommE> {
        self.pwm.set_duty(value).map_err(pwm_error)
    }

    /// Returns the duty cycle reported by the PWM output.
    pub fn duty_cycle(&self) -> Result<u32, CommE> {
        self.pwm.duty().map_err(pwm_error)
    }

    /// Forwards the PWM frequency in hertz.
    pub fn set_frequency(&mut self, hz: u32) -> Result<(), CommE> {
        self.pwm.set_frequency(hz).map_err(pwm_error)
    }

    /// Returns the PWM frequency in hertz.
    pub fn frequency(&self) -> Result<u32, CommE> {
        self.pwm.frequency().map_err(pwm_error)
    }

    // ==================================================================
    // == SPI Register Access ===========================================
    // ==================================================================
    /// Asserts chip-select.
    pub fn begin_transaction(&mut self) -> Result<(), CommE> {
        self.interface.begin_transaction().map_err(Error::from)
    }

    /// Deasserts chip-select.
    pub fn end_transaction(&mut self) -> Result<(), CommE> {
        self.interface.end_transaction().map_err(Error::from)
    }

    /// Sends `command` inside one chip-select frame and returns the answer.
    pub fn read_register(&mut self, command: u8) -> Result<u8, CommE> {
        let value = self.framed(|iface| iface.write_read(command))?;
        trace!("tle9201sg[{}]: reg {=u8:#x} -> {=u8:#x}", self.id, command, value);
        Ok(value)
    }

    /// Reads the revision register.
    pub fn read_revision(&mut self) -> Result<u8, CommE> {
        self.read_register(CMD_RD_REV)
    }

    /// Reads the raw control register.
    pub fn read_control(&mut self) -> Result<u8, CommE> {
        self.read_register(CMD_RD_CTRL)
    }

    /// Reads the raw diagnosis register.
    pub fn read_diagnosis(&mut self) -> Result<u8, CommE> {
        self.read_register(CMD_RD_DIA)
    }

    /// Reads and decodes the diagnosis register.
    pub fn diagnosis(&mut self) -> Result<Diagnosis, CommE> {
        let diagnosis = Diagnosis::from(self.read_diagnosis()?);
        if diagnosis.over_temperature() {
            warn!("tle9201sg[{}]: over-temperature", self.id);
        }
        Ok(diagnosis)
    }

    /// Reads and decodes the control register.
    pub fn control(&mut self) -> Result<Control, CommE> {
        self.read_control().map(Control::from)
    }

    /// Clears the latched diagnosis bits.
    pub fn reset_diagnosis(&mut self) -> Result<(), CommE> {
        self.framed(|iface| iface.write(CMD_RES_DIA))
    }

    /// Writes the control register.
    pub fn write_control(&mut self, control: Control) -> Result<(), CommE> {
        let command = control.command_byte(CMD_WR_CTRL);
        self.framed(|iface| iface.write(command))
    }

    /// Writes the control register and reads the diagnosis register back.
    pub fn write_control_read_diagnosis(&mut self, control: Control) -> Result<Diagnosis, CommE> {
        let command = control.command_byte(CMD_WR_CTRL_RD_DIA);
        self.framed(|iface| iface.write_read(command))
            .map(Diagnosis::from)
    }

    // ==================================================================
    // == Internal Helpers ===============================================
    // ==================================================================
    /// Runs `op` between chip-select assertion and release.
    ///
    /// Chip-select is released even if `op` fails; the first error wins.
    fn framed<T, F>(&mut self, op: F) -> Result<T, CommE>
    where
        F: FnOnce(&mut IFACE) -> core::result::Result<T, CommE>,
    {
        self.begin_transaction()?;
        let result = op(&mut self.interface).map_err(Error::from);
        let released = self.end_transaction();
        let value = result?;
        released?;
        Ok(value)
    }
}

fn pin_error<E: digital::Error, CommE>(err: E) -> Error<CommE> {
    Error::Pin(err.kind())
}

fn pwm_error<E: pwm::Error, CommE>(err: E) -> Error<CommE> {
    Error::Pwm(err.kind())
}

//! SPI command codes and register layouts of the TLE9201SG.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

/// Read the diagnosis register `DIA_REG`.
pub const CMD_RD_DIA: u8 = 0x00;
/// Reset the latched diagnosis bits.
pub const CMD_RES_DIA: u8 = 0x80;
/// Read the revision register `REV_REG`.
pub const CMD_RD_REV: u8 = 0x20;
/// Read the control register `CTRL_REG`.
pub const CMD_RD_CTRL: u8 = 0x60;
/// Write the control register `CTRL_REG`; the payload sits in the low bits.
pub const CMD_WR_CTRL: u8 = 0xE0;
/// Write the control register and read back `DIA_REG` in the same frame.
pub const CMD_WR_CTRL_RD_DIA: u8 = 0xC0;

/// Bits of the command byte that carry `CTRL_REG` payload on writes.
pub const CTRL_PAYLOAD_MASK: u8 = 0x1F;

/// Bitfield representation of the diagnosis register.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnosis {
    // Diagnosis code of the output stage (bits 3:0).
    pub code: B4,
    // Current limitation active (bit 4).
    pub current_limit: bool,
    // Transmission validation flag of the previous frame (bit 5).
    pub transmission_valid: bool,
    // Over-temperature shutdown (bit 6).
    pub over_temperature: bool,
    // Output stage enabled (bit 7).
    pub enabled: bool,
}

impl From<u8> for Diagnosis {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Diagnosis> for u8 {
    fn from(value: Diagnosis) -> Self {
        value.into_bytes()[0]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Diagnosis {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Diagnosis {{ EN: {}, OT: {}, TV: {}, CL: {}, DIA: {=u8} }}",
            self.enabled(),
            self.over_temperature(),
            self.transmission_valid(),
            self.current_limit(),
            self.code()
        );
    }
}

/// Bitfield representation of the control register.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    // PWM taken from SPI instead of the PWM pin (bit 0).
    pub spi_pwm: bool,
    // Direction taken from SPI instead of the DIR pin (bit 1).
    pub spi_dir: bool,
    // Output enable when driven from SPI (bit 2).
    pub spi_enable: bool,
    // Select SPI as the input source (bit 3).
    pub spi_inputs: bool,
    // Disable open-load detection in off state (bit 4).
    pub open_load_disable: bool,
    #[skip]
    __: B3,
}

impl Control {
    /// Builds the command byte that writes this value with `command`.
    pub fn command_byte(self, command: u8) -> u8 {
        command | (u8::from(self) & CTRL_PAYLOAD_MASK)
    }
}

impl From<u8> for Control {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Control> for u8 {
    fn from(value: Control) -> Self {
        value.into_bytes()[0]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Control {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Control {{ SPWM: {}, SDIR: {}, SEN: {}, SIN: {}, OLDIS: {} }}",
            self.spi_pwm(),
            self.spi_dir(),
            self.spi_enable(),
            self.spi_inputs(),
            self.open_load_disable()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnosis_layout() {
        let dia = Diagnosis::from(0b1010_0101);
        assert!(dia.enabled());
        assert!(!dia.over_temperature());
        assert!(dia.transmission_valid());
        assert!(!dia.current_limit());
        assert_eq!(dia.code(), 0b0101);
    }

    #[test]
    fn control_command_keeps_only_payload_bits() {
        let ctrl = Control::new()
            .with_spi_pwm(true)
            .with_spi_enable(true)
            .with_open_load_disable(true);

        assert_eq!(u8::from(ctrl), 0b0001_0101);
        assert_eq!(ctrl.command_byte(CMD_WR_CTRL), 0xF5);
        assert_eq!(ctrl.command_byte(CMD_WR_CTRL_RD_DIA), 0xD5);

        // Reserved bits read back from the chip never leak into the command.
        let read_back = Control::from(0b1110_0010);
        assert!(read_back.spi_dir());
        assert_eq!(read_back.command_byte(CMD_WR_CTRL), 0xE2);
    }
}

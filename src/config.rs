//! Start-up configuration for the TLE9201SG driver.

use crate::params::Direction;
use crate::registers::Control;

/// Settings applied by [`Tle9201sg::init`](crate::Tle9201sg::init) once the
/// bridge is in its safe state (duty 0, output disabled).
///
/// Every field is optional; the default configuration only establishes the
/// safe state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// PWM frequency to program, in hertz.
    pub frequency_hz: Option<u32>,
    /// Direction to latch on the DIR pin.
    pub direction: Option<Direction>,
    /// Control register value written over SPI.
    pub control: Option<Control>,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration can be applied.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.frequency_hz == Some(0) {
            return Err(ConfigError::ZeroFrequency);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the PWM frequency.
    pub fn frequency_hz(mut self, hz: u32) -> Self {
        self.config.frequency_hz = Some(hz);
        self
    }

    /// Sets the initial direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = Some(direction);
        self
    }

    /// Sets the control register value.
    pub fn control(mut self, control: Control) -> Self {
        self.config.control = Some(control);
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A PWM frequency of 0 Hz was requested.
    ZeroFrequency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_empty() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.frequency_hz, None);
        assert_eq!(config.direction, None);
        assert_eq!(config.control, None);
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let config = Config::new().frequency_hz(0).build();
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrequency));

        let config = Config::new()
            .frequency_hz(20_000)
            .direction(Direction::Backward)
            .build();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.direction, Some(Direction::Backward));
    }
}

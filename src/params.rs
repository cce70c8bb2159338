//! Strongly typed parameter enumerations for the TLE9201SG driver.
//!
//! Raw numeric selectors coming from board configuration tables go through
//! the `TryFrom<u8>` impls here, so an unknown direction or SPI channel is
//! rejected up front instead of silently doing nothing later.
//!
//! # Examples
//!
//! ```rust
//! use tle9201sg::params::{ChannelId, Direction, UnknownValue};
//!
//! assert_eq!(Direction::try_from(1), Ok(Direction::Backward));
//! assert_eq!(ChannelId::try_from(2), Ok(ChannelId::Channel2));
//! assert_eq!(ChannelId::try_from(3), Err(UnknownValue(3)));
//! ```

/// Raw selector value that does not map to any known variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownValue(pub u8);

/// Motor rotation direction, latched on the DIR pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    /// DIR driven high.
    Forward = 0,
    /// DIR driven low.
    Backward = 1,
}

impl TryFrom<u8> for Direction {
    type Error = UnknownValue;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Forward),
            1 => Ok(Self::Backward),
            other => Err(UnknownValue(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(value: Direction) -> Self {
        value as u8
    }
}

/// Hardware SPI channel a TLE9201SG is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ChannelId {
    /// First SPI master peripheral.
    Channel1 = 1,
    /// Second SPI master peripheral.
    Channel2 = 2,
}

impl TryFrom<u8> for ChannelId {
    type Error = UnknownValue;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Channel1),
            2 => Ok(Self::Channel2),
            other => Err(UnknownValue(other)),
        }
    }
}

impl From<ChannelId> for u8 {
    fn from(value: ChannelId) -> Self {
        value as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_accepts_only_known_values() {
        assert_eq!(Direction::try_from(0), Ok(Direction::Forward));
        assert_eq!(Direction::try_from(1), Ok(Direction::Backward));
        assert_eq!(Direction::try_from(2), Err(UnknownValue(2)));
        assert_eq!(Direction::try_from(0xFF), Err(UnknownValue(0xFF)));
    }

    #[test]
    fn channel_rejects_zero_and_out_of_range() {
        assert_eq!(ChannelId::try_from(0), Err(UnknownValue(0)));
        assert_eq!(ChannelId::try_from(1), Ok(ChannelId::Channel1));
        assert_eq!(ChannelId::try_from(2), Ok(ChannelId::Channel2));
        assert_eq!(ChannelId::try_from(3), Err(UnknownValue(3)));
    }

    #[test]
    fn direction_encodes_to_ordinal() {
        assert_eq!(u8::from(Direction::Forward), 0);
        assert_eq!(u8::from(Direction::Backward), 1);
    }
}

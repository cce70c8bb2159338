//! PWM capability driving the TLE9201SG `PWM` input.

use embedded_hal::pwm::ErrorType;

/// Timer output that feeds the bridge's PWM pin.
///
/// Duty values are in whatever unit the board uses (percent by convention);
/// the driver forwards them untouched.
pub trait PwmOutput: ErrorType {
    /// Sets the duty cycle.
    fn set_duty(&mut self, duty: u32) -> core::result::Result<(), Self::Error>;

    /// Returns the active duty cycle.
    fn duty(&self) -> core::result::Result<u32, Self::Error>;

    /// Sets the PWM frequency in hertz.
    fn set_frequency(&mut self, hz: u32) -> core::result::Result<(), Self::Error>;

    /// Returns the active PWM frequency in hertz.
    fn frequency(&self) -> core::result::Result<u32, Self::Error>;
}

impl<T: PwmOutput + ?Sized> PwmOutput for &mut T {
    #[inline]
    fn set_duty(&mut self, duty: u32) -> core::result::Result<(), Self::Error> {
        T::set_duty(self, duty)
    }

    #[inline]
    fn duty(&self) -> core::result::Result<u32, Self::Error> {
        T::duty(self)
    }

    #[inline]
    fn set_frequency(&mut self, hz: u32) -> core::result::Result<(), Self::Error> {
        T::set_frequency(self, hz)
    }

    #[inline]
    fn frequency(&self) -> core::result::Result<u32, Self::Error> {
        T::frequency(self)
    }
}

//! Actuator sink abstraction.
//!
//! The servo driver (e.g. a PCA9685 board) is outside this crate; anything
//! that can set a command on a numbered channel can drive the arm.

/// Fire-and-forget command output, one value per channel.
pub trait ActuatorSink {
    /// Error reported by the underlying driver.
    type Error: core::fmt::Debug;

    /// Set the command value (e.g. PWM off-tick count) of one channel.
    fn set_command(&mut self, channel: u8, command: u16) -> Result<(), Self::Error>;
}

impl<T: ActuatorSink + ?Sized> ActuatorSink for &mut T {
    type Error = T::Error;

    #[inline]
    fn set_command(&mut self, channel: u8, command: u16) -> Result<(), Self::Error> {
        T::set_command(self, channel, command)
    }
}

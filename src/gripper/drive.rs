//! Timed DC-motor gripper on a TB6612-style H-bridge.
//!
//! An action raises standby, sets the bridge inputs for the pulse direction,
//! applies the pulse speed as PWM duty, waits the configured time and then
//! stops the motor (standby low, duty zero).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use super::EndEffector;
use crate::config::{DriveDirection, DrivePulse, GripAction, GripperConfig};
use crate::error::{ConfigError, Error, GripperError, Result};
use crate::sink::ActuatorSink;

/// Scoped motor enable.
///
/// While engaged the bridge is out of standby. Dropping an engaged guard stops
/// the motor, so an error between enable and the end of the pulse never leaves
/// it running.
pub struct DriveGuard<'a, STBY, PWM>
where
    STBY: OutputPin,
    PWM: SetDutyCycle,
{
    standby: &'a mut STBY,
    pwm: &'a mut PWM,
    engaged: bool,
}

impl<'a, STBY, PWM> DriveGuard<'a, STBY, PWM>
where
    STBY: OutputPin,
    PWM: SetDutyCycle,
{
    /// Take the bridge out of standby.
    pub fn engage(standby: &'a mut STBY, pwm: &'a mut PWM) -> Result<Self> {
        let mut guard = Self {
            standby,
            pwm,
            engaged: true,
        };
        guard.standby.set_high().map_err(|_| GripperError::PinError)?;
        Ok(guard)
    }

    /// Apply a speed as duty cycle out of 255.
    pub fn set_speed(&mut self, speed: u8) -> Result<()> {
        self.pwm
            .set_duty_cycle_fraction(u16::from(speed), 255)
            .map_err(|_| GripperError::PwmError)?;
        Ok(())
    }

    /// Stop the motor and disarm the guard.
    pub fn stop(mut self) -> Result<()> {
        self.engaged = false;
        brake(&mut *self.standby, &mut *self.pwm)
    }
}

impl<STBY, PWM> Drop for DriveGuard<'_, STBY, PWM>
where
    STBY: OutputPin,
    PWM: SetDutyCycle,
{
    fn drop(&mut self) {
        if self.engaged {
            warn!("gripper drive interrupted, stopping motor");
            let _ = brake(&mut *self.standby, &mut *self.pwm);
        }
    }
}

// Both writes are attempted even if the first fails.
fn brake<STBY, PWM>(standby: &mut STBY, pwm: &mut PWM) -> Result<()>
where
    STBY: OutputPin,
    PWM: SetDutyCycle,
{
    let pin = standby.set_low().map_err(|_| GripperError::PinError);
    let duty = pwm.set_duty_cycle_fully_off().map_err(|_| GripperError::PwmError);
    pin.and(duty).map_err(Error::from)
}

/// DC gripper motor driven for a fixed time per action.
///
/// Generic over:
/// - `STBY`: bridge standby pin
/// - `IN1`, `IN2`: bridge direction inputs
/// - `PWM`: speed channel
pub struct TimedDriveGripper<STBY, IN1, IN2, PWM>
where
    STBY: OutputPin,
    IN1: OutputPin,
    IN2: OutputPin,
    PWM: SetDutyCycle,
{
    standby: STBY,
    in1: IN1,
    in2: IN2,
    pwm: PWM,
    open: DrivePulse,
    close: DrivePulse,
    duration_ms: u32,
}

impl<STBY, IN1, IN2, PWM> TimedDriveGripper<STBY, IN1, IN2, PWM>
where
    STBY: OutputPin,
    IN1: OutputPin,
    IN2: OutputPin,
    PWM: SetDutyCycle,
{
    /// Create with the default pulses (open 132 counter-clockwise, close 133
    /// clockwise, 500 ms).
    pub fn new(standby: STBY, in1: IN1, in2: IN2, pwm: PWM) -> Self {
        Self {
            standby,
            in1,
            in2,
            pwm,
            open: DrivePulse::OPEN,
            close: DrivePulse::CLOSE,
            duration_ms: DrivePulse::DEFAULT_DURATION_MS,
        }
    }

    /// Create from the gripper section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::GripperVariantMismatch` if the configuration
    /// describes a direct servo gripper.
    pub fn from_config(
        config: &GripperConfig,
        standby: STBY,
        in1: IN1,
        in2: IN2,
        pwm: PWM,
    ) -> Result<Self> {
        match *config {
            GripperConfig::TimedDrive {
                open,
                close,
                duration_ms,
            } => Ok(Self::new(standby, in1, in2, pwm).with_pulses(open, close, duration_ms)),
            GripperConfig::Direct { .. } => Err(Error::Config(ConfigError::GripperVariantMismatch)),
        }
    }

    /// Replace the open/close pulses and drive time.
    pub fn with_pulses(mut self, open: DrivePulse, close: DrivePulse, duration_ms: u32) -> Self {
        self.open = open;
        self.close = close;
        self.duration_ms = duration_ms;
        self
    }

    /// Pulse issued for an action.
    #[inline]
    pub fn pulse_for(&self, action: GripAction) -> DrivePulse {
        match action {
            GripAction::Open => self.open,
            GripAction::Close => self.close,
        }
    }

    /// Drive time per action (milliseconds).
    #[inline]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Stop the motor immediately.
    pub fn stop(&mut self) -> Result<()> {
        brake(&mut self.standby, &mut self.pwm)
    }

    /// Release the pins and PWM channel.
    pub fn release(self) -> (STBY, IN1, IN2, PWM) {
        (self.standby, self.in1, self.in2, self.pwm)
    }

    /// Run the motor in a direction for a time, outside the open/close pulses.
    pub fn jog<D: DelayNs>(
        &mut self,
        direction: DriveDirection,
        speed: u8,
        duration_ms: u32,
        delay: &mut D,
    ) -> Result<()> {
        self.drive(
            DrivePulse { speed, direction },
            duration_ms,
            delay,
        )
    }

    fn drive<D: DelayNs>(&mut self, pulse: DrivePulse, duration_ms: u32, delay: &mut D) -> Result<()> {
        debug!("gripper drive speed {} for {} ms", pulse.speed, duration_ms);

        let (in1_high, in2_high) = pulse.direction.input_levels();
        let mut guard = DriveGuard::engage(&mut self.standby, &mut self.pwm)?;
        set_level(&mut self.in1, in1_high)?;
        set_level(&mut self.in2, in2_high)?;
        guard.set_speed(pulse.speed)?;
        delay.delay_ms(duration_ms);
        guard.stop()
    }
}

fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<()> {
    let res = if high { pin.set_high() } else { pin.set_low() };
    res.map_err(|_| GripperError::PinError)?;
    Ok(())
}

impl<STBY, IN1, IN2, PWM> EndEffector for TimedDriveGripper<STBY, IN1, IN2, PWM>
where
    STBY: OutputPin,
    IN1: OutputPin,
    IN2: OutputPin,
    PWM: SetDutyCycle,
{
    fn begin(&mut self) -> Result<()> {
        self.stop()
    }

    fn actuate<S, D>(&mut self, action: GripAction, _sink: &mut S, delay: &mut D) -> Result<()>
    where
        S: ActuatorSink,
        D: DelayNs,
    {
        let pulse = self.pulse_for(action);
        self.drive(pulse, self.duration_ms, delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

    #[derive(Default)]
    struct RecordingPwm {
        duties: Vec<u16>,
    }

    impl embedded_hal::pwm::ErrorType for RecordingPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for RecordingPwm {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
            self.duties.push(duty);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingDelay {
        total_ns: u64,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    struct FailingPin;

    impl ErrorType for FailingPin {
        type Error = ErrorKind;
    }

    impl OutputPin for FailingPin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    struct NullSink;

    impl ActuatorSink for NullSink {
        type Error = Infallible;

        fn set_command(&mut self, _channel: u8, _command: u16) -> core::result::Result<(), Infallible> {
            Ok(())
        }
    }

    fn pin(states: &[State]) -> PinMock {
        let expectations: Vec<PinTransaction> =
            states.iter().map(|s| PinTransaction::set(*s)).collect();
        PinMock::new(&expectations)
    }

    #[test]
    fn test_close_pulse_sequence() {
        let standby = pin(&[State::High, State::Low]);
        let in1 = pin(&[State::Low]);
        let in2 = pin(&[State::High]);
        let mut gripper = TimedDriveGripper::new(standby, in1, in2, RecordingPwm::default());
        let mut delay = RecordingDelay::default();

        gripper.close(&mut NullSink, &mut delay).unwrap();

        assert_eq!(delay.total_ns, 500_000_000);
        let (mut standby, mut in1, mut in2, pwm) = gripper.release();
        assert_eq!(pwm.duties, [133, 0]);
        standby.done();
        in1.done();
        in2.done();
    }

    #[test]
    fn test_open_uses_configured_pulse() {
        let config = GripperConfig::TimedDrive {
            open: DrivePulse {
                speed: 200,
                direction: DriveDirection::Clockwise,
            },
            close: DrivePulse {
                speed: 133,
                direction: DriveDirection::Clockwise,
            },
            duration_ms: 120,
        };
        let standby = pin(&[State::Low, State::High, State::Low]);
        let in1 = pin(&[State::Low]);
        let in2 = pin(&[State::High]);
        let mut gripper =
            TimedDriveGripper::from_config(&config, standby, in1, in2, RecordingPwm::default())
                .unwrap();
        let mut delay = RecordingDelay::default();

        gripper.begin().unwrap();
        gripper.open(&mut NullSink, &mut delay).unwrap();

        assert_eq!(delay.total_ns, 120_000_000);
        let (mut standby, mut in1, mut in2, pwm) = gripper.release();
        assert_eq!(pwm.duties, [0, 200, 0]);
        standby.done();
        in1.done();
        in2.done();
    }

    #[test]
    fn test_guard_stops_motor_on_pin_error() {
        let standby = pin(&[State::High, State::Low]);
        let in2 = pin(&[]);
        let mut gripper = TimedDriveGripper::new(standby, FailingPin, in2, RecordingPwm::default());
        let mut delay = RecordingDelay::default();

        let result = gripper.open(&mut NullSink, &mut delay);

        assert_eq!(result, Err(Error::Gripper(GripperError::PinError)));
        assert_eq!(delay.total_ns, 0);
        let (mut standby, _, mut in2, pwm) = gripper.release();
        assert_eq!(pwm.duties, [0]);
        standby.done();
        in2.done();
    }

    #[test]
    fn test_rejects_direct_config() {
        let mut standby = pin(&[]);
        let mut in1 = pin(&[]);
        let mut in2 = pin(&[]);
        let result = TimedDriveGripper::from_config(
            &GripperConfig::direct(),
            standby.clone(),
            in1.clone(),
            in2.clone(),
            RecordingPwm::default(),
        );
        standby.done();
        in1.done();
        in2.done();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::GripperVariantMismatch))
        ));
    }

    #[test]
    fn test_jog_runs_requested_pulse() {
        let standby = pin(&[State::High, State::Low]);
        let in1 = pin(&[State::High]);
        let in2 = pin(&[State::Low]);
        let mut gripper = TimedDriveGripper::new(standby, in1, in2, RecordingPwm::default());
        let mut delay = RecordingDelay::default();

        gripper
            .jog(DriveDirection::CounterClockwise, 255, 10, &mut delay)
            .unwrap();

        assert_eq!(delay.total_ns, 10_000_000);
        let (mut standby, mut in1, mut in2, pwm) = gripper.release();
        assert_eq!(pwm.duties, [255, 0]);
        standby.done();
        in1.done();
        in2.done();
    }
}

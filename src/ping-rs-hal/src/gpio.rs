//! GPIO traits and types used for single-line sensor interfaces.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::time::MicrosDuration;

/// Digital level of a GPIO.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Low level.
    Low,
    /// High level.
    High,
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => false,
            Level::High => true,
        }
    }
}

impl From<bool> for Level {
    fn from(boolean: bool) -> Self {
        if boolean {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// A GPIO whose direction can be switched at runtime.
///
/// Single-pin sensors use the same line to send the trigger and to receive the reply, so the
/// driver has to turn the pin around between the two phases.
pub trait FlexPin: InputPin + OutputPin {
    /// Configures the pin as a push-pull output.
    ///
    /// The output level is unspecified until the next call to
    /// [`set_low()`](OutputPin::set_low) or [`set_high()`](OutputPin::set_high).
    ///
    /// # Errors
    ///
    /// Returns the pin error if the pin cannot be reconfigured.
    fn set_as_output(&mut self) -> Result<(), Self::Error>;

    /// Configures the pin as a floating input.
    ///
    /// # Errors
    ///
    /// Returns the pin error if the pin cannot be reconfigured.
    fn set_as_input(&mut self) -> Result<(), Self::Error>;
}

/// Measures the width of a pulse on an input.
pub trait PulseCapture {
    /// Waits for the input to reach `level`, then returns how long it stays there.
    ///
    /// Returns `None` if the pulse did not complete within `timeout`, counted from the call.
    /// A pulse that starts and ends within a single sampling period is reported as zero-width.
    fn pulse_width(&mut self, level: Level, timeout: MicrosDuration) -> Option<MicrosDuration>;
}

impl<T: FlexPin + ?Sized> FlexPin for &mut T {
    fn set_as_output(&mut self) -> Result<(), Self::Error> {
        T::set_as_output(self)
    }

    fn set_as_input(&mut self) -> Result<(), Self::Error> {
        T::set_as_input(self)
    }
}

impl<T: PulseCapture + ?Sized> PulseCapture for &mut T {
    fn pulse_width(&mut self, level: Level, timeout: MicrosDuration) -> Option<MicrosDuration> {
        T::pulse_width(self, level, timeout)
    }
}

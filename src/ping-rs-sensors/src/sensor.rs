//! The interface between the host and sensor drivers.

use embedded_hal::digital::ErrorKind;
use ping_rs_hal::time::Instant;

use crate::{SensorDescriptor, Value};

/// Represents a sensor driver, attached by the host to the interfaces listed in its
/// [`SensorDescriptor`].
///
/// The host calls [`setup()`](Driver::setup) once after attaching the sensor, then
/// [`acquire()`](Driver::acquire) on each sampling cycle.
/// [`set()`](Driver::set) may be called at any time in between; the new property values are used
/// from the next acquisition on.
pub trait Driver {
    /// Reading produced by [`acquire()`](Driver::acquire).
    type Reading: Reading;

    /// Returns the registration metadata of this driver.
    #[must_use]
    fn descriptor(&self) -> &'static SensorDescriptor;

    /// Brings the sensor into a known state and resets its properties to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if the sensor is unusable; transient failures are absorbed.
    fn setup(&mut self) -> DriverResult<()>;

    /// Performs a measurement.
    ///
    /// Blocks until the reading is ready.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Timeout`] if the sensor did not answer in time.
    fn acquire(&mut self) -> DriverResult<Self::Reading>;

    /// Performs a measurement and writes its values to `values`, in the order of the data
    /// channels of the [`SensorDescriptor`].
    ///
    /// Returns the number of values written; values that do not fit are dropped.
    ///
    /// # Errors
    ///
    /// Same as [`acquire()`](Driver::acquire); `values` is left untouched on error.
    fn acquire_values(&mut self, values: &mut [Value]) -> DriverResult<usize> {
        let reading = self.acquire()?;

        let mut count = 0;
        for (slot, value) in values.iter_mut().zip(reading.values()) {
            *slot = value;
            count += 1;
        }
        Ok(count)
    }

    /// Sets the property named `id`.
    ///
    /// Names are compared exactly, case included.
    ///
    /// # Errors
    ///
    /// Drivers may report invalid values; unknown names are not an error.
    fn set(&mut self, id: &str, value: Value) -> DriverResult<()>;

    /// Returns the current value of the property named `id`, if it exists.
    #[must_use]
    fn get(&self, id: &str) -> Option<Value>;

    /// Returns the earliest time at which the next acquisition is expected to yield a valid
    /// reading.
    ///
    /// This is advisory: drivers do not refuse earlier acquisitions.
    #[must_use]
    fn next_acquisition(&self) -> Option<Instant>;
}

/// Implemented on readings returned by [`Driver::acquire()`].
pub trait Reading: core::fmt::Debug {
    /// Returns the first value returned by [`Reading::values()`].
    fn value(&self) -> Value;

    /// Returns an iterator over [`Value`]s of a sensor reading.
    ///
    /// The order of [`Value`]s follows the data channels of the
    /// [`SensorDescriptor`].
    ///
    /// # For implementors
    ///
    /// The default implementation must be overridden on types containing multiple
    /// [`Value`]s.
    fn values(&self) -> impl ExactSizeIterator<Item = Value> {
        [self.value()].into_iter()
    }
}

/// Errors returned by sensor drivers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum DriverError {
    /// The sensor did not answer within its measurement window.
    ///
    /// For ranging sensors this usually means no object is in range.
    Timeout,
    /// A GPIO the sensor is attached to reported an error.
    Gpio(ErrorKind),
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Timeout => write!(f, "sensor timeout"),
            Self::Gpio(kind) => write!(f, "GPIO error: {kind}"),
        }
    }
}

impl core::error::Error for DriverError {}

impl DriverError {
    /// Wraps a GPIO error.
    #[must_use]
    pub fn gpio<E: embedded_hal::digital::Error>(err: &E) -> Self {
        Self::Gpio(err.kind())
    }
}

/// Result type of sensor driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Pair(i32, i32);

    impl Reading for Pair {
        fn value(&self) -> Value {
            Value::Integer(self.0)
        }

        fn values(&self) -> impl ExactSizeIterator<Item = Value> {
            [Value::Integer(self.0), Value::Integer(self.1)].into_iter()
        }
    }

    struct Counter {
        next: i32,
        fail: bool,
    }

    static COUNTER: SensorDescriptor = SensorDescriptor {
        id: "COUNTER",
        category: crate::Category::Temperature,
        interfaces: &[],
        data: &[],
        properties: &[],
    };

    impl Driver for Counter {
        type Reading = Pair;

        fn descriptor(&self) -> &'static SensorDescriptor {
            &COUNTER
        }

        fn setup(&mut self) -> DriverResult<()> {
            self.next = 0;
            Ok(())
        }

        fn acquire(&mut self) -> DriverResult<Pair> {
            if self.fail {
                return Err(DriverError::Timeout);
            }
            self.next += 2;
            Ok(Pair(self.next - 1, self.next))
        }

        fn set(&mut self, _id: &str, _value: Value) -> DriverResult<()> {
            Ok(())
        }

        fn get(&self, _id: &str) -> Option<Value> {
            None
        }

        fn next_acquisition(&self) -> Option<Instant> {
            None
        }
    }

    #[test]
    fn acquire_values_fills_the_provided_slots() {
        let mut counter = Counter {
            next: 0,
            fail: false,
        };

        let mut values = [Value::Integer(0); 3];
        assert_eq!(counter.acquire_values(&mut values), Ok(2));
        assert_eq!(values, [Value::Integer(1), Value::Integer(2), Value::Integer(0)]);

        let mut single = [Value::Integer(0)];
        assert_eq!(counter.acquire_values(&mut single), Ok(1));
        assert_eq!(single, [Value::Integer(3)]);
    }

    #[test]
    fn acquire_values_leaves_slots_untouched_on_error() {
        let mut counter = Counter {
            next: 0,
            fail: true,
        };

        let mut values = [Value::Double(-1.0)];
        assert_eq!(counter.acquire_values(&mut values), Err(DriverError::Timeout));
        assert_eq!(values, [Value::Double(-1.0)]);
    }

    #[test]
    fn gpio_errors_keep_their_kind() {
        assert_eq!(
            DriverError::gpio(&ErrorKind::Other),
            DriverError::Gpio(ErrorKind::Other)
        );
    }
}

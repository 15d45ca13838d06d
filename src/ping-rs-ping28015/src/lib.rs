//! Driver for the Parallax PING))) #28015 ultrasonic distance sensor.
//!
//! The sensor uses a single line, named `SIG`, for both the trigger and the echo: the host sends a
//! short high pulse, then the sensor holds the line high for as long as the ultrasonic burst took
//! to come back.
//! Distances are compensated for the air temperature and offset by a user calibration, both set
//! as properties through [`Driver::set()`].
//!
//! The echo is measured by a hardware timing channel when the host provides one, and by polling
//! the pin inside a critical section otherwise.
//!
//! # Cargo features
#![doc = document_features::document_features!(feature_label = r#"<span class="stab portability"><code>{feature}</code></span>"#)]
#![cfg_attr(not(test), no_std)]
#![deny(clippy::pedantic)]
#![deny(missing_docs)]

mod backend;
pub mod config;
pub mod distance;

use embedded_hal::delay::DelayNs;
use ping_rs_hal::{
    gpio::{FlexPin, PulseCapture},
    time::{self, Clock, Instant},
    timing::{NoTimingChannel, TimingChannel},
};
use ping_rs_log::{debug, trace};
use ping_rs_sensors::{
    descriptor::{DataDescriptor, InterfaceDescriptor, InterfaceKind, PropertyDescriptor},
    Category, DataType, Driver, DriverError, DriverResult, MeasurementUnit, Reading,
    SensorDescriptor, Value,
};

pub use backend::Backend;
pub use config::Config;

/// Registration metadata of the PING))) #28015.
pub static DESCRIPTOR: SensorDescriptor = SensorDescriptor {
    id: "PING28015",
    category: Category::Distance,
    interfaces: &[InterfaceDescriptor {
        name: "SIG",
        kind: InterfaceKind::Gpio,
    }],
    data: &[DataDescriptor {
        id: "distance",
        data_type: DataType::Double,
        unit: MeasurementUnit::Centimeter,
    }],
    properties: &[
        PropertyDescriptor {
            id: Property::Calibration.id(),
            data_type: DataType::Double,
            unit: MeasurementUnit::Centimeter,
        },
        PropertyDescriptor {
            id: Property::Temperature.id(),
            data_type: DataType::Double,
            unit: MeasurementUnit::Celsius,
        },
    ],
};

#[linkme::distributed_slice(ping_rs_sensors::SENSOR_DESCRIPTORS)]
static DESCRIPTOR_REF: &SensorDescriptor = &DESCRIPTOR;

/// A settable property of the driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Property {
    /// Offset added to every distance, in cm.
    Calibration,
    /// Air temperature used to compute the speed of sound, in °C.
    Temperature,
}

impl Property {
    /// Returns the property named `id`; names are compared exactly, case included.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "calibration" => Some(Self::Calibration),
            "temperature" => Some(Self::Temperature),
            _ => None,
        }
    }

    /// Returns the name of the property.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Calibration => "calibration",
            Self::Temperature => "temperature",
        }
    }
}

/// Current values of the driver properties.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Properties {
    /// Offset added to every distance, in cm.
    pub calibration: f64,
    /// Air temperature, in °C.
    pub temperature: f64,
}

impl Properties {
    /// Returns the value of `property`.
    #[must_use]
    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::Calibration => self.calibration,
            Property::Temperature => self.temperature,
        }
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            calibration: 0.0,
            temperature: 20.0,
        }
    }
}

/// A distance measurement.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceReading(f64);

impl DistanceReading {
    /// Returns the distance in cm, with one decimal.
    #[must_use]
    pub fn distance_cm(&self) -> f64 {
        self.0
    }
}

impl Reading for DistanceReading {
    fn value(&self) -> Value {
        Value::Double(self.0)
    }
}

/// A PING))) #28015 attached to a pin.
///
/// `T` provides the hardware timing channels of the pin; [`NoTimingChannel`] makes the driver
/// bit-bang every measurement.
///
/// The driver does nothing before [`setup()`](Driver::setup) is called.
pub struct Ping28015<P, D, C, T = NoTimingChannel> {
    pin: P,
    delay: D,
    clock: C,
    channels: T,
    config: Config,
    properties: Properties,
    backend: Backend,
    next: Option<Instant>,
}

impl<P, D, C> Ping28015<P, D, C> {
    /// Creates a driver for the sensor attached to `pin`, without hardware timing channel.
    #[must_use]
    pub fn new(pin: P, delay: D, clock: C) -> Self {
        Self {
            pin,
            delay,
            clock,
            channels: NoTimingChannel,
            config: Config::default(),
            properties: Properties::default(),
            backend: Backend::BitBang,
            next: None,
        }
    }
}

impl<P, D, C, T: TimingChannel> Ping28015<P, D, C, T> {
    /// Replaces the timing channel allocator.
    ///
    /// A channel reserved from the previous allocator is released, and the driver bit-bangs until
    /// the next [`setup()`](Driver::setup).
    #[must_use]
    pub fn with_timing_channel<U: TimingChannel>(mut self, channels: U) -> Ping28015<P, D, C, U> {
        self.release_channel();

        Ping28015 {
            pin: self.pin,
            delay: self.delay,
            clock: self.clock,
            channels,
            config: self.config,
            properties: self.properties,
            backend: self.backend,
            next: self.next,
        }
    }

    /// Releases the timing channel, if any, and returns the resources of the driver.
    #[must_use]
    pub fn release(mut self) -> (P, D, C, T) {
        self.release_channel();
        (self.pin, self.delay, self.clock, self.channels)
    }

    fn release_channel(&mut self) {
        if let Backend::TimingChannel(channel) = self.backend {
            debug!("releasing timing channel {:?}", channel);
            self.channels.release(channel);
            self.backend = Backend::BitBang;
        }
    }
}

impl<P, D, C, T> Ping28015<P, D, C, T> {
    /// Replaces the timing configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Returns the timing configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the backend selected by the last [`setup()`](Driver::setup).
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the current property values.
    #[must_use]
    pub fn properties(&self) -> Properties {
        self.properties
    }

    /// Returns whether the sensor has settled since the last reading, at time `now`.
    ///
    /// Acquiring earlier is allowed but may return a stale echo.
    #[must_use]
    pub fn is_ready(&self, now: Instant) -> bool {
        match self.next {
            Some(next) => now >= next,
            None => true,
        }
    }
}

impl<P, D, C, T> Driver for Ping28015<P, D, C, T>
where
    P: FlexPin + PulseCapture,
    D: DelayNs,
    C: Clock,
    T: TimingChannel,
{
    type Reading = DistanceReading;

    fn descriptor(&self) -> &'static SensorDescriptor {
        &DESCRIPTOR
    }

    fn setup(&mut self) -> DriverResult<()> {
        self.properties = Properties::default();
        self.next = None;

        self.release_channel();
        self.backend = backend::select(&mut self.channels, &self.config);

        self.pin.set_as_output().map_err(|err| DriverError::gpio(&err))?;
        self.pin.set_low().map_err(|err| DriverError::gpio(&err))?;

        // The first echoes after power-up are unreliable.
        for _ in 0..self.config.warmup_reads {
            if let Err(err) = self.acquire() {
                debug!("discarding warm-up failure: {}", err);
            }
            self.delay.delay_us(self.config.settle_time.ticks());
        }

        Ok(())
    }

    fn acquire(&mut self) -> DriverResult<DistanceReading> {
        let echo = match self.backend {
            Backend::TimingChannel(channel) => {
                backend::measure_with_channel(&mut self.channels, channel, &self.config)
            }
            Backend::BitBang => {
                backend::measure_bit_bang(&mut self.pin, &mut self.delay, &self.config)
            }
        };
        let echo = match echo {
            Ok(echo) => echo,
            Err(err) => {
                debug!("no echo: {}", err);
                return Err(err);
            }
        };

        let distance = distance::distance_cm(
            echo,
            self.properties.temperature,
            self.properties.calibration,
        );
        trace!("echo of {} us, {} cm", echo.ticks(), distance);

        self.next = Some(time::after(self.clock.now(), self.config.settle_time));

        Ok(DistanceReading(distance))
    }

    fn set(&mut self, id: &str, value: Value) -> DriverResult<()> {
        match Property::from_id(id) {
            Some(Property::Calibration) => self.properties.calibration = value.as_f64(),
            Some(Property::Temperature) => self.properties.temperature = value.as_f64(),
            None => trace!("ignoring unknown property {}", id),
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Option<Value> {
        Property::from_id(id).map(|property| Value::Double(self.properties.get(property)))
    }

    fn next_acquisition(&self) -> Option<Instant> {
        self.next
    }
}

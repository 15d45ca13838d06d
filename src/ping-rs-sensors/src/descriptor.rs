//! Static metadata describing a sensor driver to the host.
//!
//! The host uses a [`SensorDescriptor`] to know which interfaces to bind before attaching the
//! sensor, which data channels a reading contains, and which properties can be set.

use crate::{Category, DataType, MeasurementUnit};

/// Kind of hardware interface a sensor is attached through.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum InterfaceKind {
    /// A single digital I/O pin.
    Gpio,
    /// An ADC channel.
    Adc,
    /// An I2C bus.
    I2c,
    /// A 1-Wire bus.
    OneWire,
}

/// An interface slot the host has to bind before setting the sensor up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceDescriptor {
    /// Name of the slot, as printed on the sensor (e.g., `"SIG"`).
    pub name: &'static str,
    /// Kind of interface expected.
    pub kind: InterfaceKind,
}

/// A data channel of the readings produced by a sensor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataDescriptor {
    /// Identifier of the channel.
    pub id: &'static str,
    /// Type of the values of this channel.
    pub data_type: DataType,
    /// Unit of the values of this channel.
    pub unit: MeasurementUnit,
}

/// A settable property of a sensor driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PropertyDescriptor {
    /// Identifier of the property, matched exactly by [`Driver::set()`](crate::Driver::set).
    pub id: &'static str,
    /// Type of the property.
    pub data_type: DataType,
    /// Unit of the property.
    pub unit: MeasurementUnit,
}

/// Registration metadata of a sensor driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorDescriptor {
    /// Identifier of the sensor, usually its part number.
    pub id: &'static str,
    /// Category of the sensor.
    pub category: Category,
    /// Interface slots, in binding order.
    pub interfaces: &'static [InterfaceDescriptor],
    /// Data channels, in the order used by
    /// [`Driver::acquire_values()`](crate::Driver::acquire_values).
    pub data: &'static [DataDescriptor],
    /// Settable properties.
    pub properties: &'static [PropertyDescriptor],
}

impl SensorDescriptor {
    /// Returns the data channel named `id`.
    #[must_use]
    pub fn data_channel(&self, id: &str) -> Option<&'static DataDescriptor> {
        self.data.iter().find(|data| data.id == id)
    }

    /// Returns the property named `id`.
    ///
    /// Names are compared exactly, case included.
    #[must_use]
    pub fn property(&self, id: &str) -> Option<&'static PropertyDescriptor> {
        self.properties.iter().find(|property| property.id == id)
    }

    /// Returns the number of values in a reading of this sensor.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.data.len()
    }
}

//! Provides a sensor abstraction layer.
//!
//! Sensor drivers must implement the [`Driver`] trait, and must register their
//! [`SensorDescriptor`] into the [`static@SENSOR_DESCRIPTORS`] [distributed slice](linkme).

#![cfg_attr(not(test), no_std)]
#![deny(unused_must_use)]
#![deny(clippy::pedantic)]

mod category;
pub mod descriptor;
mod measurement_unit;
pub mod registry;
pub mod sensor;
mod value;

pub use category::Category;
pub use descriptor::SensorDescriptor;
pub use measurement_unit::MeasurementUnit;
pub use registry::{REGISTRY, SENSOR_DESCRIPTORS};
pub use sensor::{Driver, DriverError, DriverResult, Reading};
pub use value::{DataType, Value};

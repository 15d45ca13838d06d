//! Provides a registry of the sensor drivers linked into the firmware.

use crate::SensorDescriptor;

/// Descriptors of all registered sensor drivers.
///
/// Drivers register with
/// `#[linkme::distributed_slice(ping_rs_sensors::SENSOR_DESCRIPTORS)]` on a
/// `static: &SensorDescriptor`.
#[linkme::distributed_slice]
pub static SENSOR_DESCRIPTORS: [&'static SensorDescriptor] = [..];

/// The global registry instance.
pub static REGISTRY: Registry = Registry::new();

/// The sensor driver registry.
///
/// Only exposes the metadata of the registered drivers: instantiating and attaching them is up to
/// the host.
pub struct Registry {}

impl Registry {
    const fn new() -> Self {
        Self {}
    }

    /// Returns the descriptors of all registered drivers.
    ///
    /// The order is unspecified but stable for a given build.
    #[must_use]
    pub fn descriptors(&self) -> impl ExactSizeIterator<Item = &'static SensorDescriptor> {
        SENSOR_DESCRIPTORS.iter().copied()
    }

    /// Returns the descriptor of the driver with identifier `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'static SensorDescriptor> {
        self.descriptors().find(|descriptor| descriptor.id == id)
    }
}

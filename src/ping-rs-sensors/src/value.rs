/// Type of a [`Value`], as declared in a [`SensorDescriptor`](crate::SensorDescriptor).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataType {
    /// 32-bit signed integer.
    Integer,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
}

/// Represents a value read from, or written to, a sensor device.
///
/// Used both for the data channels of a reading and for the properties of a driver.
///
/// # Unit of measurement
///
/// The unit of measurement is declared in the [`SensorDescriptor`](crate::SensorDescriptor) of
/// the sensor driver, next to the data channel or property this value belongs to.
// NOTE(derive): no `Eq` or `PartialOrd`, values carry floats and comparing values of different
// types is meaningless.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    /// 32-bit signed integer.
    Integer(i32),
    /// Single-precision float.
    Float(f32),
    /// Double-precision float.
    Double(f64),
}

impl Value {
    /// Returns the type of this value.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Integer(_) => DataType::Integer,
            Self::Float(_) => DataType::Float,
            Self::Double(_) => DataType::Double,
        }
    }

    /// Returns the value widened to an `f64`.
    ///
    /// The conversion is lossless for every variant.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(value) => f64::from(value),
            Self::Float(value) => f64::from(value),
            Self::Double(value) => value,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

/// Represents a unit of measurement.
///
/// # For sensor driver implementors
///
/// Missing variants can be added when required.
// Built upon https://doc.riot-os.org/phydat_8h_source.html
// and https://www.iana.org/assignments/senml/senml.xhtml
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum MeasurementUnit {
    /// Degrees Celsius (°C).
    Celsius,
    /// Centimeter (cm).
    Centimeter,
    /// Meter (m).
    Meter,
    /// Millimeter (mm).
    Millimeter,
    /// Pascal (Pa).
    Pascal,
    /// %RH.
    PercentageRelativeHumidity,
    /// Second (s).
    Second,
}

impl core::fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Celsius => write!(f, "°C"), // The Unicode Standard v15 recommends using U+00B0 + U+0043.
            Self::Centimeter => write!(f, "cm"),
            Self::Meter => write!(f, "m"),
            Self::Millimeter => write!(f, "mm"),
            Self::Pascal => write!(f, "Pa"),
            Self::PercentageRelativeHumidity => write!(f, "%RH"),
            Self::Second => write!(f, "s"),
        }
    }
}

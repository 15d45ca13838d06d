/// Categories a sensor driver can be part of.
///
/// # For sensor driver implementors
///
/// Missing variants can be added when required.
// Built upon https://doc.riot-os.org/group__drivers__saul.html#ga8f2dfec7e99562dbe5d785467bb71bbb
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Category {
    /// Distance sensor (ultrasonic or time-of-flight ranging).
    Distance,
    /// Humidity sensor.
    Humidity,
    /// Pressure sensor.
    Pressure,
    /// Temperature sensor.
    Temperature,
}

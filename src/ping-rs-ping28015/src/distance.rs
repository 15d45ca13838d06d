//! Conversion of echo widths into distances.
//!
//! The speed of sound depends on the air temperature:
//!
//! ```text
//! c = 331.5 + 0.6 * T  [m/s]  =  331500 + 60 * T  [mm/s]
//! ```
//!
//! This linear approximation is accurate near room temperature and drifts at the extremes of the
//! sensor's operating range.
//! The echo covers the distance twice, so only half of its width is used.

use ping_rs_hal::time::MicrosDuration;

/// Speed of sound in dry air at 0 °C, in mm/s.
pub const SPEED_OF_SOUND_AT_0C: f64 = 331_500.0;

/// Increase of the speed of sound per °C, in mm/s.
pub const SPEED_OF_SOUND_PER_C: f64 = 60.0;

/// Distance reported for a zero-width echo, in cm.
///
/// A zero-width echo happens when an object touches the transducer.
pub const MIN_DISTANCE_CM: f64 = 2.0;

/// Returns the speed of sound at `temperature_c`, in mm/µs.
#[must_use]
pub fn mm_per_us(temperature_c: f64) -> f64 {
    (SPEED_OF_SOUND_AT_0C + SPEED_OF_SOUND_PER_C * temperature_c) / 1_000_000.0
}

/// Rounds to one decimal, halves away from zero.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    libm::round(value * 10.0) / 10.0
}

/// Converts an echo width into a distance in cm, rounded to one decimal.
///
/// `calibration_cm` is added before rounding. A zero width yields [`MIN_DISTANCE_CM`],
/// uncalibrated.
#[must_use]
pub fn distance_cm(echo: MicrosDuration, temperature_c: f64, calibration_cm: f64) -> f64 {
    let echo_us = echo.ticks();
    if echo_us == 0 {
        return MIN_DISTANCE_CM;
    }

    let one_way_mm = f64::from(echo_us) / 2.0 * mm_per_us(temperature_c);
    round_to_tenth(one_way_mm / 10.0 + calibration_cm)
}

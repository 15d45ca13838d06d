//! Timing configuration of the driver.
//!
//! The defaults can be changed at build time through the following environment variables, all in
//! microseconds except for the warm-up count:
//!
//! - `CONFIG_PING28015_TRIGGER_WIDTH_US`
//! - `CONFIG_PING28015_ECHO_MIN_US`
//! - `CONFIG_PING28015_ECHO_TIMEOUT_US`
//! - `CONFIG_PING28015_SETTLE_TIME_US`
//! - `CONFIG_PING28015_WARMUP_READS`

use ping_rs_hal::time::MicrosDuration;

/// Default width of the trigger pulse.
///
/// The datasheet asks for 2 µs minimum, 5 µs typical.
pub const TRIGGER_WIDTH: MicrosDuration = MicrosDuration::from_ticks(
    ping_rs_utils::u32_from_env_or!("CONFIG_PING28015_TRIGGER_WIDTH_US", 5),
);

/// Default shortest echo accepted by a timing channel; shorter pulses are glitches.
pub const ECHO_MIN: MicrosDuration = MicrosDuration::from_ticks(
    ping_rs_utils::u32_from_env_or!("CONFIG_PING28015_ECHO_MIN_US", 10),
);

/// Default echo capture window.
///
/// The sensor holds the line high for at most 18.5 ms when nothing is in range.
pub const ECHO_TIMEOUT: MicrosDuration = MicrosDuration::from_ticks(
    ping_rs_utils::u32_from_env_or!("CONFIG_PING28015_ECHO_TIMEOUT_US", 22_000),
);

/// Default delay between the end of a measurement and the next trigger.
pub const SETTLE_TIME: MicrosDuration = MicrosDuration::from_ticks(
    ping_rs_utils::u32_from_env_or!("CONFIG_PING28015_SETTLE_TIME_US", 200),
);

/// Default number of readings discarded by setup.
pub const WARMUP_READS: usize =
    ping_rs_utils::usize_from_env_or!("CONFIG_PING28015_WARMUP_READS", 2);

/// Timing configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub struct Config {
    /// Width of the trigger pulse.
    pub trigger_width: MicrosDuration,
    /// Shortest echo a timing channel accepts.
    pub echo_min: MicrosDuration,
    /// Longest time to wait for the echo to complete.
    pub echo_timeout: MicrosDuration,
    /// Time the sensor needs between two measurements.
    pub settle_time: MicrosDuration,
    /// Number of readings discarded by setup.
    pub warmup_reads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trigger_width: TRIGGER_WIDTH,
            echo_min: ECHO_MIN,
            echo_timeout: ECHO_TIMEOUT,
            settle_time: SETTLE_TIME,
            warmup_reads: WARMUP_READS,
        }
    }
}

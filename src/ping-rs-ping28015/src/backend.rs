use embedded_hal::delay::DelayNs;
use ping_rs_hal::{
    gpio::{FlexPin, Level, PulseCapture},
    time::MicrosDuration,
    timing::{ChannelId, IdleLevel, PulseItem, PulseRangeUnit, RxConfig, TimingChannel, TxConfig},
};
use ping_rs_log::debug;
use ping_rs_sensors::{DriverError, DriverResult};

use crate::config::Config;

/// Timing mechanism used to trigger the sensor and measure its echo.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Backend {
    /// A hardware timing channel sends the trigger and captures the echo.
    TimingChannel(ChannelId),
    /// The CPU drives the trigger and polls the echo inside a critical section.
    BitBang,
}

/// Reserves a timing channel for the sensor line, or falls back to bit-banging.
pub(crate) fn select<T: TimingChannel>(channels: &mut T, config: &Config) -> Backend {
    let tx_config = TxConfig {
        unit: PulseRangeUnit::Microseconds,
        idle: IdleLevel::Low,
    };
    let channel = match channels.setup_tx(tx_config) {
        Ok(channel) => channel,
        Err(err) => {
            debug!("no timing channel ({}), using bit-bang", err);
            return Backend::BitBang;
        }
    };

    let rx_config = RxConfig {
        unit: PulseRangeUnit::Microseconds,
        filter: saturating_u16(config.echo_min),
        idle_threshold: saturating_u16(config.echo_timeout),
    };
    if let Err(err) = channels.setup_rx(channel, rx_config) {
        debug!("timing channel receiver setup failed ({}), using bit-bang", err);
        channels.release(channel);
        return Backend::BitBang;
    }

    debug!("using timing channel {:?}", channel);
    Backend::TimingChannel(channel)
}

/// Triggers the sensor and captures the echo through a reserved timing channel.
///
/// Every channel failure is reported as [`DriverError::Timeout`].
pub(crate) fn measure_with_channel<T: TimingChannel>(
    channels: &mut T,
    channel: ChannelId,
    config: &Config,
) -> DriverResult<MicrosDuration> {
    let trigger_width = saturating_u16(config.trigger_width);
    let trigger = PulseItem {
        level0: Level::Low,
        duration0: trigger_width,
        level1: Level::High,
        duration1: trigger_width,
    };
    let mut echo = [PulseItem::EMPTY];

    match channels.tx_rx(channel, &[trigger], &mut echo, config.echo_timeout) {
        Ok(0) => {
            debug!("timing channel captured nothing");
            Err(DriverError::Timeout)
        }
        Ok(_) => {
            let [item] = echo;
            Ok(MicrosDuration::from_ticks(u32::from(echo_width(item))))
        }
        Err(err) => {
            debug!("timing channel exchange failed: {}", err);
            Err(DriverError::Timeout)
        }
    }
}

/// Triggers the sensor and measures the echo by driving and polling the pin.
///
/// The trigger and the capture run in a single critical section, so that the echo is not
/// stretched by interrupt handlers.
pub(crate) fn measure_bit_bang<P, D>(
    pin: &mut P,
    delay: &mut D,
    config: &Config,
) -> DriverResult<MicrosDuration>
where
    P: FlexPin + PulseCapture,
    D: DelayNs,
{
    pin.set_as_output().map_err(|err| DriverError::gpio(&err))?;
    pin.set_low().map_err(|err| DriverError::gpio(&err))?;

    critical_section::with(|_| {
        pin.set_high().map_err(|err| DriverError::gpio(&err))?;
        delay.delay_us(config.trigger_width.ticks());
        pin.set_low().map_err(|err| DriverError::gpio(&err))?;

        pin.set_as_input().map_err(|err| DriverError::gpio(&err))?;
        pin.pulse_width(Level::High, config.echo_timeout)
            .ok_or(DriverError::Timeout)
    })
}

/// Returns the width of the high phase of a captured item.
///
/// The capture may start on the tail of the trigger, in which case the echo is the second phase.
fn echo_width(item: PulseItem) -> u16 {
    if item.level0 == Level::Low {
        item.duration1
    } else {
        item.duration0
    }
}

fn saturating_u16(duration: MicrosDuration) -> u16 {
    u16::try_from(duration.ticks()).unwrap_or(u16::MAX)
}

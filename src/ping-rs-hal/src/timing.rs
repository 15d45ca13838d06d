//! Hardware timing channels.
//!
//! A timing channel is a peripheral able to send a train of timed pulses on a line and then
//! capture the pulses coming back on that same line, without CPU involvement (e.g., the ESP32
//! RMT).
//! Using one avoids disabling interrupts while measuring microsecond-scale pulses.

use crate::{gpio::Level, time::MicrosDuration};

/// Identifies a reserved timing channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(u8);

impl ChannelId {
    /// Creates a channel identifier.
    ///
    /// This constructor is intended for timing channel implementors only.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Unit of the durations stored in [`PulseItem`]s.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseRangeUnit {
    /// Durations are expressed in nanoseconds.
    Nanoseconds,
    /// Durations are expressed in microseconds.
    Microseconds,
    /// Durations are expressed in milliseconds.
    Milliseconds,
}

/// Level of the line while the transmitter is idle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdleLevel {
    /// The line is driven low.
    Low,
    /// The line is driven high.
    High,
}

/// Transmit-side configuration of a timing channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxConfig {
    /// Unit of the transmitted durations.
    pub unit: PulseRangeUnit,
    /// Line level between transmissions.
    pub idle: IdleLevel,
}

/// Receive-side configuration of a timing channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxConfig {
    /// Unit of the captured durations.
    pub unit: PulseRangeUnit,
    /// Pulses shorter than this are filtered out as glitches, in `unit`.
    pub filter: u16,
    /// A level held for longer than this ends the capture, in `unit`.
    pub idle_threshold: u16,
}

/// A pair of timed levels, the element exchanged with a timing channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseItem {
    /// Level of the first phase.
    pub level0: Level,
    /// Duration of the first phase.
    pub duration0: u16,
    /// Level of the second phase.
    pub level1: Level,
    /// Duration of the second phase.
    pub duration1: u16,
}

impl PulseItem {
    /// An item holding the line low for both phases, with zero durations.
    pub const EMPTY: Self = Self {
        level0: Level::Low,
        duration0: 0,
        level1: Level::Low,
        duration1: 0,
    };
}

/// A timing channel error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// No channel is free, or the platform has no timing peripheral.
    NoChannelAvailable,
    /// The channel was not reserved, or has been released.
    InvalidChannel,
    /// Nothing was received before the timeout elapsed.
    Timeout,
    /// An other error occurred.
    Other,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoChannelAvailable => write!(f, "no timing channel available"),
            Self::InvalidChannel => write!(f, "invalid timing channel"),
            Self::Timeout => write!(f, "timing channel timeout"),
            Self::Other => write!(f, "timing channel error"),
        }
    }
}

impl core::error::Error for Error {}

/// Allocator and driver of the timing channels attached to one line.
///
/// Implementations are created by the host for the line bound to a sensor; every channel they
/// reserve drives and samples that line.
pub trait TimingChannel {
    /// Reserves a channel and configures its transmit side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoChannelAvailable`] if no channel can be reserved.
    fn setup_tx(&mut self, config: TxConfig) -> Result<ChannelId, Error>;

    /// Configures the receive side of a channel reserved with
    /// [`setup_tx()`](TimingChannel::setup_tx).
    ///
    /// # Errors
    ///
    /// Returns an error if the receiver cannot be configured; the channel stays reserved.
    fn setup_rx(&mut self, channel: ChannelId, config: RxConfig) -> Result<(), Error>;

    /// Sends `tx`, then captures into `rx` until it is full, the line goes idle, or `timeout`
    /// elapses.
    ///
    /// Returns the number of items written to `rx`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if nothing was captured in time.
    fn tx_rx(
        &mut self,
        channel: ChannelId,
        tx: &[PulseItem],
        rx: &mut [PulseItem],
        timeout: MicrosDuration,
    ) -> Result<usize, Error>;

    /// Releases a reserved channel.
    fn release(&mut self, channel: ChannelId);
}

impl<T: TimingChannel + ?Sized> TimingChannel for &mut T {
    fn setup_tx(&mut self, config: TxConfig) -> Result<ChannelId, Error> {
        T::setup_tx(self, config)
    }

    fn setup_rx(&mut self, channel: ChannelId, config: RxConfig) -> Result<(), Error> {
        T::setup_rx(self, channel, config)
    }

    fn tx_rx(
        &mut self,
        channel: ChannelId,
        tx: &[PulseItem],
        rx: &mut [PulseItem],
        timeout: MicrosDuration,
    ) -> Result<usize, Error> {
        T::tx_rx(self, channel, tx, rx, timeout)
    }

    fn release(&mut self, channel: ChannelId) {
        T::release(self, channel);
    }
}

/// A [`TimingChannel`] for platforms without a timing peripheral.
///
/// Reservations always fail, so drivers fall back to software timing.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoTimingChannel;

impl TimingChannel for NoTimingChannel {
    fn setup_tx(&mut self, _config: TxConfig) -> Result<ChannelId, Error> {
        Err(Error::NoChannelAvailable)
    }

    fn setup_rx(&mut self, _channel: ChannelId, _config: RxConfig) -> Result<(), Error> {
        Err(Error::InvalidChannel)
    }

    fn tx_rx(
        &mut self,
        _channel: ChannelId,
        _tx: &[PulseItem],
        _rx: &mut [PulseItem],
        _timeout: MicrosDuration,
    ) -> Result<usize, Error> {
        Err(Error::InvalidChannel)
    }

    fn release(&mut self, _channel: ChannelId) {}
}

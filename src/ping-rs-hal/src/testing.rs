//! Scripted test doubles for the host primitives.
//!
//! The doubles record what drivers do to them, and replay pulse widths and channel replies queued
//! by the test beforehand.
//! They panic when their fixed-size logs overflow, which only happens with runaway drivers.

use core::cell::Cell;

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorKind, ErrorType, InputPin, OutputPin},
};
use heapless::{Deque, Vec};

use crate::{
    gpio::{FlexPin, Level, PulseCapture},
    time::{Clock, Instant, MicrosDuration},
    timing::{ChannelId, Error, PulseItem, RxConfig, TimingChannel, TxConfig},
};

const LOG_CAPACITY: usize = 64;
const SCRIPT_CAPACITY: usize = 8;

/// Something a driver did to a [`FakePin`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinEvent {
    /// Switched to output.
    Output,
    /// Switched to input.
    Input,
    /// Drove the line high.
    High,
    /// Drove the line low.
    Low,
    /// Captured a pulse.
    Capture {
        /// Level of the awaited pulse.
        level: Level,
        /// Timeout passed to the capture.
        timeout: MicrosDuration,
    },
}

/// A [`FlexPin`] and [`PulseCapture`] replaying queued pulse widths.
///
/// Captures return the queued widths in order; once the queue is empty every capture times out.
#[derive(Debug)]
pub struct FakePin {
    events: Vec<PinEvent, LOG_CAPACITY>,
    pulses: Deque<Option<MicrosDuration>, SCRIPT_CAPACITY>,
    level: Level,
    error: Option<ErrorKind>,
}

impl FakePin {
    /// Creates a pin with no queued pulses.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            pulses: Deque::new(),
            level: Level::Low,
            error: None,
        }
    }

    /// Creates a pin replaying `widths`, in microseconds; `None` stands for a capture timeout.
    #[must_use]
    pub fn with_pulses(widths: &[Option<u32>]) -> Self {
        let mut pin = Self::new();
        for width in widths {
            pin.push_pulse(*width);
        }
        pin
    }

    /// Queues the result of a future capture; `None` stands for a timeout.
    ///
    /// # Panics
    ///
    /// Panics if too many captures are queued.
    pub fn push_pulse(&mut self, width: Option<u32>) {
        self.pulses
            .push_back(width.map(MicrosDuration::from_ticks))
            .expect("too many queued pulses");
    }

    /// Makes every subsequent pin operation fail with `kind`.
    pub fn fail_with(&mut self, kind: ErrorKind) {
        self.error = Some(kind);
    }

    /// Returns the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PinEvent] {
        &self.events
    }

    /// Forgets the recorded events.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Returns the level last driven on the line.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    fn record(&mut self, event: PinEvent) -> Result<(), ErrorKind> {
        if let Some(kind) = self.error {
            return Err(kind);
        }
        self.events.push(event).expect("pin event log is full");
        Ok(())
    }
}

impl Default for FakePin {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for FakePin {
    type Error = ErrorKind;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(PinEvent::Low)?;
        self.level = Level::Low;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(PinEvent::High)?;
        self.level = Level::High;
        Ok(())
    }
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level == Level::High)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level == Level::Low)
    }
}

impl FlexPin for FakePin {
    fn set_as_output(&mut self) -> Result<(), Self::Error> {
        self.record(PinEvent::Output)
    }

    fn set_as_input(&mut self) -> Result<(), Self::Error> {
        self.record(PinEvent::Input)
    }
}

impl PulseCapture for FakePin {
    fn pulse_width(&mut self, level: Level, timeout: MicrosDuration) -> Option<MicrosDuration> {
        self.events
            .push(PinEvent::Capture { level, timeout })
            .expect("pin event log is full");
        self.pulses.pop_front().flatten()
    }
}

/// A [`DelayNs`] recording the requested delays instead of waiting.
#[derive(Debug, Default)]
pub struct FakeDelay {
    delays_us: Vec<u32, LOG_CAPACITY>,
}

impl FakeDelay {
    /// Creates a delay with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the requested delays in microseconds, rounded up, oldest first.
    #[must_use]
    pub fn delays_us(&self) -> &[u32] {
        &self.delays_us
    }

    /// Forgets the recorded delays.
    pub fn clear(&mut self) {
        self.delays_us.clear();
    }

    fn record(&mut self, us: u32) {
        self.delays_us.push(us).expect("delay log is full");
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.record(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(ms.saturating_mul(1_000));
    }
}

/// A [`Clock`] that only moves when told to.
#[derive(Debug, Default)]
pub struct FakeClock {
    now: Cell<u64>,
}

impl FakeClock {
    /// Creates a clock reading `start_us` microseconds.
    #[must_use]
    pub fn new(start_us: u64) -> Self {
        Self {
            now: Cell::new(start_us),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, us: u64) {
        self.now.set(self.now.get() + us);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.now.get())
    }
}

/// A [`TimingChannel`] replaying queued replies.
///
/// Each [`tx_rx()`](TimingChannel::tx_rx) consumes one queued reply; once the queue is empty
/// every exchange times out.
#[derive(Debug)]
pub struct FakeTimingChannel {
    tx_result: Result<ChannelId, Error>,
    rx_result: Result<(), Error>,
    replies: Deque<Result<Option<PulseItem>, Error>, SCRIPT_CAPACITY>,
    reserved: Option<ChannelId>,
    released: Vec<ChannelId, SCRIPT_CAPACITY>,
    sent: Vec<PulseItem, LOG_CAPACITY>,
    tx_config: Option<TxConfig>,
    rx_config: Option<RxConfig>,
    last_timeout: Option<MicrosDuration>,
}

impl FakeTimingChannel {
    /// Creates a channel allocator that hands out channel `id`.
    #[must_use]
    pub fn new(id: u8) -> Self {
        Self::with_results(Ok(ChannelId::new(id)), Ok(()))
    }

    /// Creates a channel allocator whose reservations fail.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::with_results(Err(Error::NoChannelAvailable), Ok(()))
    }

    /// Creates a channel allocator handing out channel `id` whose receive side cannot be
    /// configured.
    #[must_use]
    pub fn without_receiver(id: u8, error: Error) -> Self {
        Self::with_results(Ok(ChannelId::new(id)), Err(error))
    }

    fn with_results(tx_result: Result<ChannelId, Error>, rx_result: Result<(), Error>) -> Self {
        Self {
            tx_result,
            rx_result,
            replies: Deque::new(),
            reserved: None,
            released: Vec::new(),
            sent: Vec::new(),
            tx_config: None,
            rx_config: None,
            last_timeout: None,
        }
    }

    /// Queues a reply capturing `item`.
    ///
    /// # Panics
    ///
    /// Panics if too many replies are queued.
    pub fn push_item(&mut self, item: PulseItem) {
        self.push_reply(Ok(Some(item)));
    }

    /// Queues a raw reply: `Ok(None)` captures nothing, `Err(_)` fails the exchange.
    ///
    /// # Panics
    ///
    /// Panics if too many replies are queued.
    pub fn push_reply(&mut self, reply: Result<Option<PulseItem>, Error>) {
        self.replies
            .push_back(reply)
            .expect("too many queued replies");
    }

    /// Returns the channel currently reserved, if any.
    #[must_use]
    pub fn reserved(&self) -> Option<ChannelId> {
        self.reserved
    }

    /// Returns the channels released so far.
    #[must_use]
    pub fn released(&self) -> &[ChannelId] {
        &self.released
    }

    /// Returns every item transmitted so far.
    #[must_use]
    pub fn sent(&self) -> &[PulseItem] {
        &self.sent
    }

    /// Returns the last transmit configuration requested.
    #[must_use]
    pub fn tx_config(&self) -> Option<TxConfig> {
        self.tx_config
    }

    /// Returns the last receive configuration requested.
    #[must_use]
    pub fn rx_config(&self) -> Option<RxConfig> {
        self.rx_config
    }

    /// Returns the timeout passed to the last exchange.
    #[must_use]
    pub fn last_timeout(&self) -> Option<MicrosDuration> {
        self.last_timeout
    }
}

impl TimingChannel for FakeTimingChannel {
    fn setup_tx(&mut self, config: TxConfig) -> Result<ChannelId, Error> {
        self.tx_config = Some(config);
        let channel = self.tx_result?;
        self.reserved = Some(channel);
        Ok(channel)
    }

    fn setup_rx(&mut self, channel: ChannelId, config: RxConfig) -> Result<(), Error> {
        if self.reserved != Some(channel) {
            return Err(Error::InvalidChannel);
        }
        self.rx_config = Some(config);
        self.rx_result
    }

    fn tx_rx(
        &mut self,
        channel: ChannelId,
        tx: &[PulseItem],
        rx: &mut [PulseItem],
        timeout: MicrosDuration,
    ) -> Result<usize, Error> {
        if self.reserved != Some(channel) {
            return Err(Error::InvalidChannel);
        }
        self.sent
            .extend_from_slice(tx)
            .expect("transmitted item log is full");
        self.last_timeout = Some(timeout);

        match self.replies.pop_front() {
            Some(Ok(Some(item))) => match rx.first_mut() {
                Some(slot) => {
                    *slot = item;
                    Ok(1)
                }
                None => Ok(0),
            },
            Some(Ok(None)) => Ok(0),
            Some(Err(err)) => Err(err),
            None => Err(Error::Timeout),
        }
    }

    fn release(&mut self, channel: ChannelId) {
        self.released
            .push(channel)
            .expect("released channel log is full");
        if self.reserved == Some(channel) {
            self.reserved = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::{IdleLevel, PulseRangeUnit};

    #[test]
    fn fake_pin_replays_pulses_then_times_out() {
        let mut pin = FakePin::with_pulses(&[Some(42), None]);
        let timeout = MicrosDuration::from_ticks(100);

        assert_eq!(
            pin.pulse_width(Level::High, timeout),
            Some(MicrosDuration::from_ticks(42))
        );
        assert_eq!(pin.pulse_width(Level::High, timeout), None);
        assert_eq!(pin.pulse_width(Level::High, timeout), None);
        assert_eq!(pin.events().len(), 3);
    }

    #[test]
    fn fake_pin_reports_injected_errors() {
        let mut pin = FakePin::new();
        pin.fail_with(ErrorKind::Other);

        assert_eq!(pin.set_high(), Err(ErrorKind::Other));
        assert!(pin.events().is_empty());
        assert_eq!(pin.level(), Level::Low);
    }

    #[test]
    fn fake_channel_rejects_unreserved_channels() {
        let mut channels = FakeTimingChannel::new(3);
        let mut rx = [PulseItem::EMPTY];

        assert_eq!(
            channels.tx_rx(ChannelId::new(3), &[], &mut rx, MicrosDuration::from_ticks(1)),
            Err(Error::InvalidChannel)
        );

        let id = channels
            .setup_tx(TxConfig {
                unit: PulseRangeUnit::Microseconds,
                idle: IdleLevel::Low,
            })
            .unwrap();
        assert_eq!(id, ChannelId::new(3));
        assert_eq!(
            channels.tx_rx(id, &[], &mut rx, MicrosDuration::from_ticks(1)),
            Err(Error::Timeout)
        );

        channels.release(id);
        assert_eq!(channels.reserved(), None);
        assert_eq!(channels.released(), &[id]);
    }

    #[test]
    fn fake_delay_records_microseconds() {
        let mut delay = FakeDelay::new();
        delay.delay_us(5);
        delay.delay_ns(1_500);
        delay.delay_ms(1);

        assert_eq!(delay.delays_us(), &[5, 2, 1_000]);
    }
}

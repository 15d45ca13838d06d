use embedded_hal::digital::ErrorKind;
use ping_rs_hal::{
    gpio::Level,
    testing::{FakeClock, FakeDelay, FakePin, FakeTimingChannel, PinEvent},
    time::{Instant, MicrosDuration},
    timing::{self, ChannelId, PulseItem},
};
use ping_rs_ping28015::{Backend, Config, Ping28015, Properties, DESCRIPTOR};
use ping_rs_sensors::{Driver, DriverError, Value, REGISTRY};

const BIT_BANG_READ: [PinEvent; 6] = [
    PinEvent::Output,
    PinEvent::Low,
    PinEvent::High,
    PinEvent::Low,
    PinEvent::Input,
    PinEvent::Capture {
        level: Level::High,
        timeout: MicrosDuration::from_ticks(22_000),
    },
];

fn echo(width: u16) -> PulseItem {
    PulseItem {
        level0: Level::Low,
        duration0: 2,
        level1: Level::High,
        duration1: width,
    }
}

#[test]
fn setup_survives_warm_up_timeouts() {
    let mut pin = FakePin::new();
    let mut delay = FakeDelay::new();
    let clock = FakeClock::new(0);

    let mut sensor = Ping28015::new(&mut pin, &mut delay, &clock);
    assert_eq!(sensor.setup(), Ok(()));
    assert_eq!(sensor.backend(), Backend::BitBang);
    assert_eq!(sensor.next_acquisition(), None);

    let mut expected = vec![PinEvent::Output, PinEvent::Low];
    expected.extend(BIT_BANG_READ);
    expected.extend(BIT_BANG_READ);
    assert_eq!(pin.events(), expected.as_slice());
    assert_eq!(delay.delays_us(), &[5, 200, 5, 200]);
}

#[test]
fn setup_discards_successful_warm_up_readings() {
    let clock = FakeClock::new(0);
    let mut sensor = Ping28015::new(
        FakePin::with_pulses(&[Some(500), Some(700), Some(1_000)]),
        FakeDelay::new(),
        &clock,
    );

    sensor.setup().unwrap();

    assert_eq!(sensor.acquire().unwrap().distance_cm(), 16.6);
}

#[test]
fn setup_reports_pin_failures() {
    let mut pin = FakePin::new();
    pin.fail_with(ErrorKind::Other);
    let clock = FakeClock::new(0);

    let mut sensor = Ping28015::new(pin, FakeDelay::new(), &clock);

    assert_eq!(sensor.setup(), Err(DriverError::Gpio(ErrorKind::Other)));
}

#[test]
fn setup_resets_properties() {
    let clock = FakeClock::new(0);
    let mut sensor = Ping28015::new(FakePin::new(), FakeDelay::new(), &clock);

    sensor.set("temperature", Value::Double(-5.0)).unwrap();
    sensor.set("calibration", Value::Double(3.0)).unwrap();
    sensor.setup().unwrap();

    assert_eq!(sensor.properties(), Properties::default());
    assert_eq!(sensor.get("temperature"), Some(Value::Double(20.0)));
    assert_eq!(sensor.get("calibration"), Some(Value::Double(0.0)));
}

#[test]
fn warm_up_count_follows_config() {
    let mut pin = FakePin::new();
    let clock = FakeClock::new(0);
    let mut config = Config::default();
    config.warmup_reads = 0;

    let mut sensor = Ping28015::new(&mut pin, FakeDelay::new(), &clock).with_config(config);
    sensor.setup().unwrap();
    assert_eq!(sensor.config().warmup_reads, 0);

    assert_eq!(pin.events(), &[PinEvent::Output, PinEvent::Low]);
}

#[test]
fn readings_follow_temperature_and_calibration() {
    let clock = FakeClock::new(0);
    let pin = FakePin::with_pulses(&[None, None, Some(1_000), Some(1_000), Some(2_000)]);
    let mut sensor = Ping28015::new(pin, FakeDelay::new(), &clock);
    sensor.setup().unwrap();

    assert_eq!(sensor.acquire().unwrap().distance_cm(), 16.6);

    sensor.set("calibration", Value::Double(5.0)).unwrap();
    assert_eq!(sensor.acquire().unwrap().distance_cm(), 21.6);

    sensor.set("calibration", Value::Double(0.0)).unwrap();
    sensor.set("temperature", Value::Double(0.0)).unwrap();
    assert_eq!(sensor.acquire().unwrap().distance_cm(), 33.2);
}

#[test]
fn zero_width_echo_is_the_minimum_distance() {
    let clock = FakeClock::new(0);
    let pin = FakePin::with_pulses(&[None, None, Some(0)]);
    let mut sensor = Ping28015::new(pin, FakeDelay::new(), &clock);
    sensor.setup().unwrap();
    sensor.set("calibration", Value::Double(10.0)).unwrap();

    assert_eq!(sensor.acquire().unwrap().distance_cm(), 2.0);
}

#[test]
fn unknown_properties_are_ignored() {
    let clock = FakeClock::new(0);
    let mut sensor = Ping28015::new(FakePin::new(), FakeDelay::new(), &clock);
    sensor.setup().unwrap();

    for id in ["Temperature", "CALIBRATION", "distance", "", "temperature "] {
        assert_eq!(sensor.set(id, Value::Double(99.0)), Ok(()));
        assert_eq!(sensor.get(id), None);
    }

    assert_eq!(sensor.properties(), Properties::default());
}

#[test]
fn next_acquisition_is_advisory() {
    let clock = FakeClock::new(1_000);
    let pin = FakePin::with_pulses(&[None, None, Some(1_000), Some(1_000)]);
    let mut sensor = Ping28015::new(pin, FakeDelay::new(), &clock);
    sensor.setup().unwrap();

    sensor.acquire().unwrap();
    let next = Instant::from_ticks(1_200);
    assert_eq!(sensor.next_acquisition(), Some(next));
    assert!(!sensor.is_ready(Instant::from_ticks(1_100)));
    assert!(sensor.is_ready(next));

    // Acquiring early is not refused.
    assert!(sensor.acquire().is_ok());

    clock.advance(5_000);
    assert_eq!(sensor.acquire(), Err(DriverError::Timeout));
    assert_eq!(sensor.next_acquisition(), Some(next));
}

#[test]
fn bit_bang_timeout_leaves_the_critical_section() {
    let clock = FakeClock::new(0);
    let mut sensor = Ping28015::new(FakePin::new(), FakeDelay::new(), &clock);
    sensor.setup().unwrap();

    assert_eq!(sensor.acquire(), Err(DriverError::Timeout));

    // Blocks forever if the section was left held.
    let entered = std::thread::spawn(|| critical_section::with(|_| true))
        .join()
        .unwrap();
    assert!(entered);
}

#[test]
fn timing_channel_is_preferred() {
    let mut pin = FakePin::new();
    let clock = FakeClock::new(0);
    let mut channels = FakeTimingChannel::new(3);
    // Both warm-up reads fail, in the two ways a channel can fail.
    channels.push_reply(Ok(None));
    channels.push_reply(Err(timing::Error::Other));
    channels.push_item(echo(1_000));
    channels.push_item(PulseItem {
        level0: Level::High,
        duration0: 2_000,
        level1: Level::Low,
        duration1: 0,
    });

    let mut sensor =
        Ping28015::new(&mut pin, FakeDelay::new(), &clock).with_timing_channel(&mut channels);
    sensor.setup().unwrap();
    assert_eq!(sensor.backend(), Backend::TimingChannel(ChannelId::new(3)));

    assert_eq!(sensor.acquire().unwrap().distance_cm(), 16.6);
    sensor.set("temperature", Value::Integer(0)).unwrap();
    assert_eq!(sensor.acquire().unwrap().distance_cm(), 33.2);
    assert_eq!(sensor.acquire(), Err(DriverError::Timeout));

    let _ = sensor.release();
    assert_eq!(channels.released(), &[ChannelId::new(3)]);
    assert_eq!(channels.reserved(), None);
    assert_eq!(channels.sent().len(), 5);
    // The pin is only forced low, the channel does the rest.
    assert_eq!(pin.events(), &[PinEvent::Output, PinEvent::Low]);
}

#[test]
fn unavailable_timing_channel_falls_back_to_bit_bang() {
    let clock = FakeClock::new(0);
    let mut channels = FakeTimingChannel::unavailable();

    let pin = FakePin::with_pulses(&[None, None, Some(1_000)]);

    let mut sensor =
        Ping28015::new(pin, FakeDelay::new(), &clock).with_timing_channel(&mut channels);
    sensor.setup().unwrap();

    assert_eq!(sensor.backend(), Backend::BitBang);
    assert_eq!(sensor.acquire().unwrap().distance_cm(), 16.6);
    let _ = sensor.release();
    assert!(channels.released().is_empty());
}

#[test]
fn half_configured_channel_is_released() {
    let clock = FakeClock::new(0);
    let mut channels = FakeTimingChannel::without_receiver(1, timing::Error::Other);

    let mut sensor = Ping28015::new(FakePin::new(), FakeDelay::new(), &clock)
        .with_timing_channel(&mut channels);
    sensor.setup().unwrap();
    assert_eq!(sensor.backend(), Backend::BitBang);

    drop(sensor);
    assert_eq!(channels.released(), &[ChannelId::new(1)]);
    assert_eq!(channels.reserved(), None);
}

#[test]
fn repeated_setup_releases_the_previous_channel() {
    let clock = FakeClock::new(0);
    let mut channels = FakeTimingChannel::new(7);

    let mut sensor = Ping28015::new(FakePin::new(), FakeDelay::new(), &clock)
        .with_timing_channel(&mut channels);
    sensor.setup().unwrap();
    sensor.setup().unwrap();
    assert_eq!(sensor.backend(), Backend::TimingChannel(ChannelId::new(7)));

    drop(sensor);
    assert_eq!(channels.released(), &[ChannelId::new(7)]);
    assert_eq!(channels.reserved(), Some(ChannelId::new(7)));
}

#[test]
fn acquire_values_writes_the_distance() {
    let clock = FakeClock::new(0);
    let pin = FakePin::with_pulses(&[None, None, Some(1_000)]);
    let mut sensor = Ping28015::new(pin, FakeDelay::new(), &clock);
    sensor.setup().unwrap();

    let mut values = [Value::Integer(0)];
    assert_eq!(sensor.acquire_values(&mut values), Ok(1));
    assert_eq!(values, [Value::Double(16.6)]);

    assert_eq!(sensor.acquire_values(&mut values), Err(DriverError::Timeout));
    assert_eq!(values, [Value::Double(16.6)]);
}

#[test]
fn descriptor_is_registered() {
    let descriptor = REGISTRY.get("PING28015").unwrap();
    assert_eq!(descriptor, &DESCRIPTOR);

    assert_eq!(descriptor.interfaces.len(), 1);
    assert_eq!(descriptor.interfaces.first().map(|i| i.name), Some("SIG"));
    assert_eq!(descriptor.value_count(), 1);
    assert!(descriptor.data_channel("distance").is_some());
    assert!(descriptor.property("calibration").is_some());
    assert!(descriptor.property("temperature").is_some());
    assert!(descriptor.property("Temperature").is_none());

    let clock = FakeClock::new(0);
    let sensor = Ping28015::new(FakePin::new(), FakeDelay::new(), &clock);
    assert!(core::ptr::eq(sensor.descriptor(), &DESCRIPTOR));
}

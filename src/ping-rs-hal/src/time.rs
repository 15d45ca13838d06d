//! Time types with microsecond resolution.

/// A point in time, in microseconds since an arbitrary epoch chosen by the [`Clock`].
pub type Instant = fugit::TimerInstantU64<1_000_000>;

/// A short duration in microseconds.
pub type MicrosDuration = fugit::MicrosDurationU32;

/// Provides the current time.
pub trait Clock {
    /// Returns the current time.
    ///
    /// Must be monotonic.
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        T::now(self)
    }
}

/// Returns `instant` shifted forward by `duration`.
#[must_use]
pub fn after(instant: Instant, duration: MicrosDuration) -> Instant {
    instant + fugit::MicrosDurationU64::from_ticks(u64::from(duration.ticks()))
}

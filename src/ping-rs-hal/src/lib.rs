//! Host primitives needed by ping-rs sensor drivers.
//!
//! The host platform implements these traits for its pins, timing peripherals and clocks; drivers
//! only ever see the traits.
//! Critical sections are provided through the [`critical_section`](https://docs.rs/critical-section)
//! crate and delays through [`embedded_hal::delay::DelayNs`], so neither has a trait here.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::pedantic)]
#![deny(missing_docs)]

pub mod gpio;
pub mod time;
pub mod timing;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use embedded_hal;
pub use fugit;

//! ping-rs measures distances with ultrasonic echo-ranging sensors.
//!
//! The host platform implements the primitives of [`hal`] for its pins, timing peripherals and
//! clock, then drives sensors through the [`sensors::Driver`] trait.
//! Every linked driver registers its metadata in [`sensors::REGISTRY`].
//!
//! # Cargo features
#![doc = document_features::document_features!(feature_label = r#"<span class="stab portability"><code>{feature}</code></span>"#)]
#![no_std]
#![deny(missing_docs)]

#[doc(inline)]
pub use ping_rs_hal as hal;
#[doc(inline)]
pub use ping_rs_log as log;
#[cfg(feature = "ping28015")]
#[doc(inline)]
pub use ping_rs_ping28015 as ping28015;
#[doc(inline)]
pub use ping_rs_sensors as sensors;

/// This module contains all third party crates as used by ping-rs.
pub mod reexports {
    pub use ping_rs_hal::{embedded_hal, fugit};
    // Needed by drivers registering their descriptors.
    pub use linkme;
}

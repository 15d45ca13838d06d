//! Build-time helpers shared by the ping-rs crates.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::pedantic)]
#![deny(missing_docs)]

pub mod env;

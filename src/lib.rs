//! Device abstractions for 3-D voxel displays built from chained
//! NeoPixel-style (WS2812) LED panels.
//!
//! The core is the [`cube`] engine: it maps logical `(x, y, z)` voxel writes
//! onto physical LED positions across one or more serially wired panel
//! chains, mirrors every write in a shadow buffer for hardware-free reads,
//! and flushes only the chains that changed. Animations ([`animations`]) and
//! the input button (`button`, embedded builds) are collaborators around
//! that engine.
//!
//! # Glossary
//!
//! - **Voxel:** one addressable display cell, identified by `(x, y, z)`.
//! - **Face:** one panel's worth of voxels at a fixed `z`.
//! - **Chain:** one independently wired, independently flushed string of
//!   panels (see [`chain`]).
//! - **Serpentine wiring:** alternating left-right/right-left physical LED
//!   ordering per row, shortening wiring runs.
//! - **Dirty chain:** a chain with at least one staged change not yet
//!   flushed.
//! - **Shadow buffer:** the in-memory mirror of requested (not necessarily
//!   hardware-confirmed) voxel colors.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: embedded builds must select exactly one board; the
// host feature replaces the board entirely.
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[cfg(all(feature = "host", any(feature = "pico1", feature = "pico2")))]
compile_error!(
    "'host' excludes the board features; build embedded targets with --no-default-features"
);

pub mod animations;
#[cfg(not(feature = "host"))]
pub mod button;
pub mod chain;
pub mod cube;
mod error;
#[cfg(not(feature = "host"))]
pub mod pio_irqs;
#[cfg(feature = "host")]
pub mod preview;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};

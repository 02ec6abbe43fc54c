//! The per-chain transport abstraction: an opaque handle that stages pixels
//! and flushes a whole chain at once.
//!
//! The engine in [`cube`](crate::cube) is generic over [`ChainHandle`], so the
//! same addressing and refresh logic drives PIO hardware (`pio`), SPI
//! hardware (`spi`), or an in-memory double on a development machine
//! (`host`).

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`.
#[doc(inline)]
pub use smart_leds::colors;

use smart_leds::RGB8;

use crate::Result;

#[cfg(feature = "host")]
pub mod host;
#[cfg(not(feature = "host"))]
pub mod pio;
#[cfg(not(feature = "host"))]
pub mod spi;

/// RGB color type used by all pixel operations, re-exported from `smart_leds`.
pub type Rgb = RGB8;

/// One independently wired, independently flushed string of LED panels.
///
/// Implementations own the transport-level pixel buffer for their chain.
/// `set_pixel` and `clear` only stage data; nothing reaches the LEDs until
/// [`refresh`](Self::refresh) runs.
///
/// `refresh` retransmits the *entire* staged buffer, never a delta. The
/// engine's dirty-flag bookkeeping depends on this: once any flush of a chain
/// succeeds, every previously staged pixel on that chain is on the wire,
/// including pixels whose individual `set_pixel` call had failed earlier.
pub trait ChainHandle {
    /// Stage `color` at physical position `led_index` in the transmit buffer.
    fn set_pixel(&mut self, led_index: usize, color: Rgb) -> Result<()>;

    /// Stage black at every LED position.
    fn clear(&mut self) -> Result<()>;

    /// Transmit the whole staged buffer to the hardware.
    ///
    /// Bounded-time: implementations block (or await) only for the duration
    /// of one chain transmission.
    async fn refresh(&mut self) -> Result<()>;
}

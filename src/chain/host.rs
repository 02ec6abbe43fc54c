#![cfg(feature = "host")]
//! In-memory chain for host-side testing: same contract as the hardware
//! transports, plus call counters and failure injection.

use heapless::Vec;

use crate::Result;
use crate::chain::{ChainHandle, Rgb};
use crate::cube::{MAX_FACES, MAX_PANEL_HEIGHT, MAX_PANEL_WIDTH};
use crate::error::Error;

/// Most LEDs any single chain can carry (every face on one wire).
pub const MAX_CHAIN_LEDS: usize = MAX_FACES * MAX_PANEL_WIDTH * MAX_PANEL_HEIGHT;

/// A fake chain that records staged pixels and flush activity.
///
/// `staged` mirrors the transmit buffer; `displayed` is what the pretend
/// hardware last received, updated only by a successful [`refresh`]. Set
/// [`fail_set_pixel`](Self::fail_set_pixel) or
/// [`fail_refresh`](Self::fail_refresh) to make the transport refuse the
/// corresponding operation.
///
/// [`refresh`]: ChainHandle::refresh
pub struct HostChain {
    staged: Vec<Rgb, MAX_CHAIN_LEDS>,
    displayed: Vec<Rgb, MAX_CHAIN_LEDS>,
    /// Successful flushes so far.
    pub flush_count: usize,
    /// Hardware clears so far.
    pub clear_count: usize,
    /// When true, `set_pixel` reports [`Error::PixelWrite`].
    pub fail_set_pixel: bool,
    /// When true, `refresh` reports [`Error::Flush`] and leaves `displayed`
    /// untouched.
    pub fail_refresh: bool,
}

impl HostChain {
    /// Create a chain of `len` LEDs, all black, nothing flushed yet.
    ///
    /// # Panics
    ///
    /// Panics when `len` exceeds [`MAX_CHAIN_LEDS`].
    #[must_use]
    pub fn new(len: usize) -> Self {
        assert!(len <= MAX_CHAIN_LEDS, "chain length exceeds capacity");
        let mut staged = Vec::new();
        let mut displayed = Vec::new();
        staged
            .resize(len, Rgb::new(0, 0, 0))
            .expect("len checked against capacity");
        displayed
            .resize(len, Rgb::new(0, 0, 0))
            .expect("len checked against capacity");
        Self {
            staged,
            displayed,
            flush_count: 0,
            clear_count: 0,
            fail_set_pixel: false,
            fail_refresh: false,
        }
    }

    /// Number of LEDs on this chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Whether the chain has zero LEDs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// The staged (not necessarily transmitted) color at `led_index`.
    #[must_use]
    pub fn staged(&self, led_index: usize) -> Rgb {
        *self
            .staged
            .get(led_index)
            .expect("led_index within chain length")
    }

    /// The color the pretend hardware last received at `led_index`.
    #[must_use]
    pub fn displayed(&self, led_index: usize) -> Rgb {
        *self
            .displayed
            .get(led_index)
            .expect("led_index within chain length")
    }
}

impl ChainHandle for HostChain {
    fn set_pixel(&mut self, led_index: usize, color: Rgb) -> Result<()> {
        if self.fail_set_pixel {
            return Err(Error::PixelWrite);
        }
        let slot = self.staged.get_mut(led_index).ok_or(Error::PixelWrite)?;
        *slot = color;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        for slot in &mut self.staged {
            *slot = Rgb::new(0, 0, 0);
        }
        self.clear_count += 1;
        Ok(())
    }

    async fn refresh(&mut self) -> Result<()> {
        if self.fail_refresh {
            return Err(Error::Flush);
        }
        // Whole-buffer resend, exactly like the hardware transports.
        self.displayed.clear();
        self.displayed
            .extend_from_slice(&self.staged)
            .expect("displayed has the same capacity as staged");
        self.flush_count += 1;
        Ok(())
    }
}

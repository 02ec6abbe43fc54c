#![cfg(not(feature = "host"))]
//! A WS2812 chain on a plain SPI peripheral (data line on MOSI, clock unused).
//!
//! The bus must run at [`SPI_FREQUENCY_HZ`]; each WS2812 data bit is
//! stretched to three SPI bits (`1 → 0b110`, `0 → 0b100`) so the pulse widths
//! land inside the LED's timing window. One LED's 24 GRB bits therefore
//! occupy [`BYTES_PER_LED`] encoded bytes. An SPI peripheral drives exactly
//! one chain, which is the SPI backend's chain ceiling.

use embedded_hal::spi::SpiBus;

use crate::Result;
use crate::chain::{ChainHandle, Rgb};
use crate::error::Error;

/// SPI clock rate the 3-bits-per-bit encoding assumes.
pub const SPI_FREQUENCY_HZ: u32 = 2_400_000;

/// Encoded bytes per LED: 24 data bits × 3 SPI bits each.
pub const BYTES_PER_LED: usize = 9;

/// Idle bytes after a frame; > 50 µs of low line latches the LEDs.
const LATCH: [u8; 16] = [0; 16];

/// A WS2812 chain behind any [`SpiBus`] implementation.
///
/// `N` is the compile-time LED capacity and `BUF` the encoded buffer size;
/// `BUF` must equal `N * BYTES_PER_LED` (checked at construction).
pub struct SpiChain<B: SpiBus, const N: usize, const BUF: usize> {
    bus: B,
    len: usize,
    encoded: [u8; BUF],
}

impl<B: SpiBus, const N: usize, const BUF: usize> SpiChain<B, N, BUF> {
    /// Take ownership of `bus` for a chain of `len` LEDs, staged all-black.
    ///
    /// # Panics
    ///
    /// Panics when `BUF != N * BYTES_PER_LED` or `len` exceeds `N`.
    #[must_use]
    pub fn new(bus: B, len: usize) -> Self {
        assert!(BUF == N * BYTES_PER_LED, "BUF must equal N * BYTES_PER_LED");
        assert!(len <= N, "chain length exceeds buffer capacity");
        defmt::debug!("spi chain: {} LEDs, {} encoded bytes", len, BUF);
        let mut chain = Self {
            bus,
            len,
            encoded: [0; BUF],
        };
        for led_index in 0..len {
            chain.stage(led_index, Rgb::new(0, 0, 0));
        }
        chain
    }

    fn stage(&mut self, led_index: usize, color: Rgb) {
        let start = led_index * BYTES_PER_LED;
        let slot = self
            .encoded
            .get_mut(start..start + BYTES_PER_LED)
            .expect("led_index bounded by chain length");
        for (chunk, channel) in slot.chunks_mut(3).zip([color.g, color.r, color.b]) {
            chunk.copy_from_slice(&expand(channel));
        }
    }
}

/// Stretch one color byte into its 24-bit (3-byte) SPI pulse train.
fn expand(channel: u8) -> [u8; 3] {
    let mut bits = 0_u32;
    for bit in (0..8).rev() {
        bits <<= 3;
        bits |= if channel & (1 << bit) == 0 { 0b100 } else { 0b110 };
    }
    [(bits >> 16) as u8, (bits >> 8) as u8, bits as u8]
}

impl<B: SpiBus, const N: usize, const BUF: usize> ChainHandle for SpiChain<B, N, BUF> {
    fn set_pixel(&mut self, led_index: usize, color: Rgb) -> Result<()> {
        if led_index >= self.len {
            return Err(Error::PixelWrite);
        }
        self.stage(led_index, color);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        for led_index in 0..self.len {
            self.stage(led_index, Rgb::new(0, 0, 0));
        }
        Ok(())
    }

    async fn refresh(&mut self) -> Result<()> {
        let frame = self
            .encoded
            .get(..self.len * BYTES_PER_LED)
            .expect("len bounded by capacity");
        self.bus.write(frame).map_err(|_| Error::Flush)?;
        self.bus.write(&LATCH).map_err(|_| Error::Flush)?;
        self.bus.flush().map_err(|_| Error::Flush)
    }
}

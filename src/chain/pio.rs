#![cfg(not(feature = "host"))]
//! WS2812 chains driven by RP2040/RP2350 PIO state machines.
//!
//! One PIO block runs the WS2812 program on up to four state machines, so one
//! block drives up to four independent chains, which is the PIO backend's
//! chain ceiling. Each chain keeps a full frame buffer and retransmits all of
//! it on refresh via DMA.

use embassy_rp::Peri;
use embassy_rp::dma::Channel;
use embassy_rp::pio::{Common, Instance, PioPin, StateMachine};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};

use crate::Result;
use crate::chain::{ChainHandle, Rgb};
use crate::error::Error;

/// One chain bound to a specific state machine `S`.
///
/// `N` is the compile-time buffer capacity; the configured chain length may
/// be anything up to it.
pub struct PioChainLeg<'d, P: Instance, const S: usize, const N: usize> {
    frame: [Rgb; N],
    len: usize,
    driver: PioWs2812<'d, P, S, N>,
}

impl<'d, P: Instance, const S: usize, const N: usize> PioChainLeg<'d, P, S, N> {
    /// Bind the WS2812 program to state machine `S` for a chain of `len`
    /// LEDs on `pin`, transmitting through `dma`.
    ///
    /// # Panics
    ///
    /// Panics when `len` exceeds the buffer capacity `N`.
    #[must_use]
    pub fn new(
        common: &mut Common<'d, P>,
        state_machine: StateMachine<'d, P, S>,
        dma: Peri<'d, impl Channel>,
        pin: Peri<'d, impl PioPin>,
        program: &PioWs2812Program<'d, P>,
        len: usize,
    ) -> Self {
        assert!(len <= N, "chain length exceeds buffer capacity");
        defmt::debug!("pio chain: {} LEDs on state machine {}", len, S);
        Self {
            frame: [Rgb::new(0, 0, 0); N],
            len,
            driver: PioWs2812::new(common, state_machine, dma, pin, program),
        }
    }
}

impl<P: Instance, const S: usize, const N: usize> ChainHandle for PioChainLeg<'_, P, S, N> {
    fn set_pixel(&mut self, led_index: usize, color: Rgb) -> Result<()> {
        if led_index >= self.len {
            return Err(Error::PixelWrite);
        }
        let slot = self.frame.get_mut(led_index).ok_or(Error::PixelWrite)?;
        *slot = color;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.frame = [Rgb::new(0, 0, 0); N];
        Ok(())
    }

    async fn refresh(&mut self) -> Result<()> {
        self.driver.write(&self.frame).await;
        Ok(())
    }
}

/// A PIO-driven chain on any of a block's four state machines.
///
/// The engine stores chains homogeneously, so the state machine index is
/// folded into this enum rather than the type. Build one variant per wired
/// chain with [`sm0`](Self::sm0)..[`sm3`](Self::sm3), in configuration order.
pub enum PioChain<'d, P: Instance, const N: usize> {
    /// Chain on state machine 0.
    Sm0(PioChainLeg<'d, P, 0, N>),
    /// Chain on state machine 1.
    Sm1(PioChainLeg<'d, P, 1, N>),
    /// Chain on state machine 2.
    Sm2(PioChainLeg<'d, P, 2, N>),
    /// Chain on state machine 3.
    Sm3(PioChainLeg<'d, P, 3, N>),
}

macro_rules! pio_chain_constructor {
    ($name:ident, $variant:ident, $sm:literal) => {
        /// Build a chain on this state machine. See [`PioChainLeg::new`].
        #[must_use]
        pub fn $name(
            common: &mut Common<'d, P>,
            state_machine: StateMachine<'d, P, $sm>,
            dma: Peri<'d, impl Channel>,
            pin: Peri<'d, impl PioPin>,
            program: &PioWs2812Program<'d, P>,
            len: usize,
        ) -> Self {
            Self::$variant(PioChainLeg::new(
                common,
                state_machine,
                dma,
                pin,
                program,
                len,
            ))
        }
    };
}

impl<'d, P: Instance, const N: usize> PioChain<'d, P, N> {
    pio_chain_constructor!(sm0, Sm0, 0);
    pio_chain_constructor!(sm1, Sm1, 1);
    pio_chain_constructor!(sm2, Sm2, 2);
    pio_chain_constructor!(sm3, Sm3, 3);
}

impl<P: Instance, const N: usize> ChainHandle for PioChain<'_, P, N> {
    fn set_pixel(&mut self, led_index: usize, color: Rgb) -> Result<()> {
        match self {
            Self::Sm0(leg) => leg.set_pixel(led_index, color),
            Self::Sm1(leg) => leg.set_pixel(led_index, color),
            Self::Sm2(leg) => leg.set_pixel(led_index, color),
            Self::Sm3(leg) => leg.set_pixel(led_index, color),
        }
    }

    fn clear(&mut self) -> Result<()> {
        match self {
            Self::Sm0(leg) => leg.clear(),
            Self::Sm1(leg) => leg.clear(),
            Self::Sm2(leg) => leg.clear(),
            Self::Sm3(leg) => leg.clear(),
        }
    }

    async fn refresh(&mut self) -> Result<()> {
        match self {
            Self::Sm0(leg) => leg.refresh().await,
            Self::Sm1(leg) => leg.refresh().await,
            Self::Sm2(leg) => leg.refresh().await,
            Self::Sm3(leg) => leg.refresh().await,
        }
    }
}

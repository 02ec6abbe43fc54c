//! The voxel display engine: chain topology, the write-through shadow buffer,
//! and the dirty-chain refresh controller.
//!
//! A cube is a stack of 8×8-style LED panel *faces* spread across one or more
//! serially wired *chains*. Animation code addresses voxels as `(x, y, z)`;
//! the engine resolves each write to a physical LED on one chain, mirrors the
//! color in the [shadow buffer](Cube::read), and tracks which chains have
//! staged changes so [`refresh`](Cube::refresh) retransmits only those.
//!
//! # Example
//!
//! ```rust
//! use cube_kit::chain::{colors, host::HostChain};
//! use cube_kit::cube::{Backend, ChainConfig, Cube, CubeConfig};
//! use heapless::Vec;
//!
//! # fn example() -> cube_kit::Result<()> {
//! let config = CubeConfig {
//!     backend: Backend::Pio,
//!     chains: Vec::from_slice(&[ChainConfig {
//!         pin: 5,
//!         panels: 2,
//!         first_row_backwards: false,
//!     }])
//!     .expect("one chain fits"),
//!     panel_width: 8,
//!     panel_height: 8,
//! };
//! let mut cube = Cube::new(config, |_, chain| Ok(HostChain::new(chain.panels as usize * 64)))?;
//!
//! cube.write(3, 1, 0, colors::BLUE)?;
//! assert_eq!(cube.read(3, 1, 0), colors::BLUE);
//! # Ok(())
//! # }
//! # example().unwrap_or_else(|_| panic!("host chains do not fail"));
//! ```

pub mod mapping;
mod shadow;

pub use shadow::ShadowDump;

use heapless::Vec;

use crate::Result;
use crate::chain::{ChainHandle, Rgb};
use crate::cube::shadow::Shadow;

/// Most chains any backend can drive; sizes the bounded chain containers.
pub const MAX_CHAINS: usize = MAX_PIO_CHAINS;

/// Chain ceiling for the PIO backend: one WS2812 program per state machine,
/// four state machines per PIO block.
pub const MAX_PIO_CHAINS: usize = 4;

/// Chain ceiling for the SPI backend: one chain per SPI peripheral.
pub const MAX_SPI_CHAINS: usize = 1;

/// Hard capacity ceiling on total panel faces across all chains.
pub const MAX_FACES: usize = 8;

/// Widest supported panel face.
pub const MAX_PANEL_WIDTH: usize = 8;

/// Tallest supported panel face.
pub const MAX_PANEL_HEIGHT: usize = 8;

/// Which transport family drives the chains.
///
/// The choice affects only validation ceilings (how many chains may be
/// configured); the addressing algorithm is identical for both.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum Backend {
    /// WS2812 over PIO state machines; up to [`MAX_PIO_CHAINS`] chains.
    Pio,
    /// WS2812 over an SPI peripheral; exactly one chain.
    Spi,
}

impl Backend {
    /// Most chains this transport family can drive.
    #[must_use]
    pub const fn max_chains(self) -> usize {
        match self {
            Self::Pio => MAX_PIO_CHAINS,
            Self::Spi => MAX_SPI_CHAINS,
        }
    }
}

/// Wiring description of one physical chain. Immutable after construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct ChainConfig {
    /// GPIO number the chain's data line is soldered to. Descriptive: chain
    /// devices are built by the caller from concrete pin peripherals, in
    /// configuration order.
    pub pin: u8,
    /// Number of panel faces carried by this chain.
    pub panels: u16,
    /// Whether the chain's row 0 runs in reversed physical order
    /// (serpentine wiring orientation).
    pub first_row_backwards: bool,
}

/// Construction input for [`Cube::new`]. Immutable after creation.
#[derive(Clone, Debug)]
pub struct CubeConfig {
    /// Transport family; sets the chain-count ceiling.
    pub backend: Backend,
    /// Chains in wiring order; face indices run contiguously across them.
    pub chains: Vec<ChainConfig, MAX_CHAINS>,
    /// Columns per face.
    pub panel_width: usize,
    /// Rows per face.
    pub panel_height: usize,
}

impl CubeConfig {
    /// Whether this configuration can construct a cube.
    ///
    /// Checks, in order: non-empty chain list, chain count within the
    /// backend's ceiling, every chain carrying at least one panel, panel
    /// dimensions at least 1 and within the capacity ceiling, and total
    /// faces within [`MAX_FACES`]. Pure; no side effects.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.chains.is_empty() || self.chains.len() > self.backend.max_chains() {
            return false;
        }
        if self.chains.iter().any(|chain| chain.panels == 0) {
            return false;
        }
        if self.panel_width == 0 || self.panel_width > MAX_PANEL_WIDTH {
            return false;
        }
        if self.panel_height == 0 || self.panel_height > MAX_PANEL_HEIGHT {
            return false;
        }
        self.total_faces() <= MAX_FACES
    }

    /// Sum of panel faces across all chains.
    #[must_use]
    pub fn total_faces(&self) -> usize {
        self.chains
            .iter()
            .map(|chain| chain.panels as usize)
            .sum()
    }
}

/// The voxel display engine. Generic over the chain transport `C`.
///
/// Owns one transport handle per configured chain plus the shadow buffer, so
/// the type is move-only; handles are released exactly once when the cube is
/// dropped. Designed for a single owner: one control loop alternates writes
/// and a [`refresh`](Self::refresh) per frame (no internal locking, no
/// internal tasks).
pub struct Cube<C: ChainHandle> {
    config: CubeConfig,
    shadow: Shadow,
    chains: Vec<C, MAX_CHAINS>,
    dirty: [bool; MAX_CHAINS],
}

impl<C: ChainHandle> Cube<C> {
    /// Build the engine from a validated configuration, opening one transport
    /// handle per chain via `open_chain` (called in configuration order with
    /// the chain's index and config).
    ///
    /// All dirty flags start false and the shadow starts black. Whether the
    /// *hardware* also starts black is transport-dependent; call
    /// [`clear`](Self::clear) once at startup to force it.
    ///
    /// # Errors
    ///
    /// Returns the first error from `open_chain`.
    ///
    /// # Panics
    ///
    /// Panics when `config` fails [`CubeConfig::is_valid`]. Passing invalid
    /// configuration is a construction-time contract breach, not a runtime
    /// condition; validate first if the input is not hard-coded.
    pub fn new(
        config: CubeConfig,
        mut open_chain: impl FnMut(usize, &ChainConfig) -> Result<C>,
    ) -> Result<Self> {
        assert!(config.is_valid(), "invalid cube configuration");
        let mut chains: Vec<C, MAX_CHAINS> = Vec::new();
        for (chain_index, chain_config) in config.chains.iter().enumerate() {
            let handle = open_chain(chain_index, chain_config)?;
            assert!(
                chains.push(handle).is_ok(),
                "chain count bounded by validation"
            );
        }
        let shadow = Shadow::new(config.panel_width, config.panel_height, config.total_faces());
        Ok(Self {
            config,
            shadow,
            chains,
            dirty: [false; MAX_CHAINS],
        })
    }

    /// Total panel faces across all chains.
    #[must_use]
    pub fn total_faces(&self) -> usize {
        self.config.total_faces()
    }

    /// Total LEDs across all chains.
    #[must_use]
    pub fn total_leds(&self) -> usize {
        self.total_faces() * self.config.panel_width * self.config.panel_height
    }

    /// Columns per face.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.config.panel_width
    }

    /// Rows per face.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.config.panel_height
    }

    /// Transport family the cube was configured with.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.config.backend
    }

    /// Number of configured chains.
    #[must_use]
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Borrow a chain's transport handle (diagnostics and tests).
    #[must_use]
    pub fn chain(&self, chain_index: usize) -> Option<&C> {
        self.chains.get(chain_index)
    }

    /// Mutably borrow a chain's transport handle (diagnostics and tests).
    #[must_use]
    pub fn chain_mut(&mut self, chain_index: usize) -> Option<&mut C> {
        self.chains.get_mut(chain_index)
    }

    /// The last color written to `(x, y, z)`.
    ///
    /// Reads the shadow buffer only; never touches hardware, constant time.
    /// Reflects *requested* state: a write whose hardware leg failed still
    /// reads back.
    ///
    /// # Panics
    ///
    /// Panics when any coordinate is out of range, in release builds too.
    /// Out-of-range coordinates are a bug in the caller, not a runtime
    /// condition.
    #[must_use]
    pub fn read(&self, x: usize, y: usize, z: usize) -> Rgb {
        self.shadow.get(x, y, z)
    }

    /// Write `color` to voxel `(x, y, z)`.
    ///
    /// The shadow buffer is updated *before* the hardware attempt, so a read
    /// immediately after a write always returns `color`, even when the
    /// transport refused the pixel. On transport acceptance the owning chain
    /// is marked dirty for the next [`refresh`](Self::refresh).
    ///
    /// # Errors
    ///
    /// Returns the transport's error when the staged pixel write is rejected.
    /// The shadow keeps the requested color either way; since a later flush
    /// resends the whole chain, the color still reaches the hardware once any
    /// write to the same chain lands and is flushed.
    ///
    /// # Panics
    ///
    /// Panics when any coordinate is out of range, as [`read`](Self::read)
    /// does.
    pub fn write(&mut self, x: usize, y: usize, z: usize, color: Rgb) -> Result<()> {
        self.shadow.set(x, y, z, color);
        let target = mapping::voxel_to_led(
            &self.config.chains,
            x,
            y,
            z,
            self.config.panel_width,
            self.config.panel_height,
        )
        .expect("coordinates bound-checked by the shadow buffer");
        let handle = self
            .chains
            .get_mut(target.chain_index)
            .expect("mapper only returns configured chains");
        handle.set_pixel(target.led_index, color)?;
        if let Some(flag) = self.dirty.get_mut(target.chain_index) {
            *flag = true;
        }
        Ok(())
    }

    /// Flush every chain with staged changes; skip clean chains entirely.
    ///
    /// A chain's dirty flag is cleared only when its flush succeeds; a failed
    /// chain stays dirty so the caller's next refresh retries it. The sweep
    /// continues past failures (one bad chain cannot starve the rest).
    ///
    /// # Errors
    ///
    /// Returns the first flush failure encountered, after attempting every
    /// dirty chain.
    pub async fn refresh(&mut self) -> Result<()> {
        let mut first_failure = None;
        for (handle, dirty) in self.chains.iter_mut().zip(self.dirty.iter_mut()) {
            if !*dirty {
                continue;
            }
            match handle.refresh().await {
                Ok(()) => *dirty = false,
                Err(error) => {
                    if first_failure.is_none() {
                        first_failure = Some(error);
                    }
                }
            }
        }
        first_failure.map_or(Ok(()), Err)
    }

    /// Reset every voxel to black, on the shadow and the hardware.
    ///
    /// Zeroes the shadow, stages a hardware clear on every chain, marks every
    /// chain dirty (a clear is an implicit write to every LED), then runs
    /// [`refresh`](Self::refresh) so the blank state is immediately visible.
    ///
    /// # Errors
    ///
    /// Returns the first failure among the clears and the refresh; failed
    /// chains stay dirty.
    pub async fn clear(&mut self) -> Result<()> {
        self.shadow.fill(Rgb::new(0, 0, 0));
        let mut first_failure = None;
        for (handle, dirty) in self.chains.iter_mut().zip(self.dirty.iter_mut()) {
            *dirty = true;
            if let Err(error) = handle.clear() {
                if first_failure.is_none() {
                    first_failure = Some(error);
                }
            }
        }
        let refresh_result = self.refresh().await;
        match first_failure {
            Some(error) => Err(error),
            None => refresh_result,
        }
    }

    /// Human-readable rendering of the shadow buffer, face by face.
    ///
    /// Diagnostic only; no stability guarantee on the format.
    #[must_use]
    pub const fn dump(&self) -> ShadowDump<'_> {
        self.shadow.dump()
    }
}

//! Animation collaborators for the voxel display engine.
//!
//! Each animation implements [`Animation`]: reset against a display, then
//! render one frame per call using only the engine's public voxel operations.
//! The driving loop owns pacing and hardware refresh:
//!
//! ```rust
//! use cube_kit::animations::{Animation, Pcg32};
//! use cube_kit::animations::rain::Rain;
//! # use cube_kit::chain::host::HostChain;
//! # use cube_kit::cube::{Backend, ChainConfig, Cube, CubeConfig};
//! # use embassy_futures::block_on;
//! # use heapless::Vec;
//!
//! # fn example() -> cube_kit::Result<()> {
//! # let config = CubeConfig {
//! #     backend: Backend::Pio,
//! #     chains: Vec::from_slice(&[ChainConfig { pin: 5, panels: 2, first_row_backwards: false }])
//! #         .expect("one chain fits"),
//! #     panel_width: 8,
//! #     panel_height: 8,
//! # };
//! # let mut cube =
//! #     Cube::new(config, |_, chain| Ok(HostChain::new(chain.panels as usize * 64)))?;
//! let mut rain = Rain::light(Pcg32::new(0x5eed, 1));
//! block_on(cube.clear())?;
//! rain.init(&mut cube);
//! for _frame in 0..3 {
//!     let _pacing = rain.step(&mut cube)?;
//!     block_on(cube.refresh())?;
//!     // sleep for `_pacing` between frames
//! }
//! # Ok(())
//! # }
//! # example().expect("host chains do not fail");
//! ```

pub mod bounce;
pub mod countdown;
pub mod disc;
pub mod rain;

use embassy_time::Duration;

use crate::Result;
use crate::chain::{ChainHandle, Rgb};
use crate::cube::Cube;

/// One selectable display animation.
///
/// Implementations keep their own frame state; the driving loop clears the
/// display when switching animations, calls [`init`](Self::init) once, then
/// alternates [`step`](Self::step), a hardware refresh, and a sleep for the
/// pacing delay `step` returned. Object-safe so applications can hold an
/// ordered list of `&mut dyn Animation<_>` and cycle through it.
pub trait Animation<C: ChainHandle> {
    /// Reset internal state against a freshly cleared display.
    fn init(&mut self, cube: &mut Cube<C>);

    /// Render one frame of voxel writes; returns how long the driving loop
    /// should sleep before the next frame.
    ///
    /// # Errors
    ///
    /// Propagates the first rejected voxel write; the caller's next refresh
    /// retries the owning chain either way.
    fn step(&mut self, cube: &mut Cube<C>) -> Result<Duration>;
}

const PCG32_DEFAULT_STATE: u64 = 0x853c_49e6_748f_ea9b;
const PCG32_MULT: u64 = 0x5851_f42d_4c95_7f2d;

/// Small seeded PCG32 stream generator for animation randomness.
///
/// Deterministic per `(seed, stream)` pair, so host tests can replay frames.
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Create a generator for the given seed and stream selector.
    #[must_use]
    pub const fn new(seed: u64, stream: u64) -> Self {
        Self {
            state: seed.wrapping_add(PCG32_DEFAULT_STATE),
            inc: (stream << 1) | 1,
        }
    }

    /// Next value in `[0, u32::MAX]`.
    pub fn next_u32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        (xorshifted >> rot) | (xorshifted << ((!rot).wrapping_add(1) & 31))
    }

    /// Next value in `[0, bound)`. `bound` must be nonzero.
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }

    /// A random color that avoids too-dim channels: each in `[32, 255]`.
    pub fn color(&mut self) -> Rgb {
        let r = 32 + self.below(224) as u8;
        let g = 32 + self.below(224) as u8;
        let b = 32 + self.below(224) as u8;
        Rgb::new(r, g, b)
    }
}

/// Scale each channel by `factor / 255` (fixed-point brightness).
pub(crate) fn scaled(color: Rgb, factor: u8) -> Rgb {
    Rgb::new(
        ((u16::from(color.r) * u16::from(factor)) / 255) as u8,
        ((u16::from(color.g) * u16::from(factor)) / 255) as u8,
        ((u16::from(color.b) * u16::from(factor)) / 255) as u8,
    )
}

/// Fade every voxel toward black by `factor / 255`, for soft trails.
pub(crate) fn fade_toward_black<C: ChainHandle>(cube: &mut Cube<C>, factor: u8) -> Result<()> {
    for z in 0..cube.total_faces() {
        for y in 0..cube.height() {
            for x in 0..cube.width() {
                let faded = scaled(cube.read(x, y, z), factor);
                cube.write(x, y, z, faded)?;
            }
        }
    }
    Ok(())
}

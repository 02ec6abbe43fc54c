//! A single dot ricocheting off the display walls, cycling through the hue
//! wheel and leaving a short fading trail.

use embassy_time::Duration;
use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::Result;
use crate::animations::{Animation, Pcg32, fade_toward_black};
use crate::chain::ChainHandle;
use crate::cube::Cube;

const FADE: u8 = 200;
const HUE_STEP: u32 = 2;

/// Bouncing-dot animation.
pub struct Bounce {
    x: usize,
    y: usize,
    z: usize,
    dir_x: isize,
    dir_y: isize,
    dir_z: isize,
    frame: u32,
    rng: Pcg32,
}

impl Bounce {
    /// Start from a random position once initialized against a display.
    #[must_use]
    pub const fn new(rng: Pcg32) -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            dir_x: 1,
            dir_y: 1,
            dir_z: 1,
            frame: 0,
            rng,
        }
    }
}

/// Advance one axis, reflecting at the walls. `limit` is exclusive.
fn advance(position: usize, direction: isize, limit: usize) -> (usize, isize) {
    debug_assert!(position < limit);
    if direction >= 0 {
        if position + 1 < limit {
            (position + 1, direction)
        } else {
            (position.saturating_sub(1), -1)
        }
    } else if position > 0 {
        (position - 1, direction)
    } else {
        ((1).min(limit - 1), 1)
    }
}

impl<C: ChainHandle> Animation<C> for Bounce {
    fn init(&mut self, cube: &mut Cube<C>) {
        self.x = self.rng.below(cube.width() as u32) as usize;
        self.y = self.rng.below(cube.height() as u32) as usize;
        self.z = self.rng.below(cube.total_faces() as u32) as usize;
        self.dir_x = 1;
        self.dir_y = 1;
        self.dir_z = 1;
        self.frame = 0;
    }

    fn step(&mut self, cube: &mut Cube<C>) -> Result<Duration> {
        fade_toward_black(cube, FADE)?;

        (self.x, self.dir_x) = advance(self.x, self.dir_x, cube.width());
        (self.y, self.dir_y) = advance(self.y, self.dir_y, cube.height());
        (self.z, self.dir_z) = advance(self.z, self.dir_z, cube.total_faces());

        let color = hsv2rgb(Hsv {
            hue: self.frame.wrapping_mul(HUE_STEP) as u8,
            sat: 255,
            val: 255,
        });
        cube.write(self.x, self.y, self.z, color)?;
        self.frame = self.frame.wrapping_add(1);
        Ok(Duration::from_millis(50))
    }
}

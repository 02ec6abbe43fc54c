//! Colored droplets falling through the cube with soft fading trails.

use embassy_time::Duration;

use crate::Result;
use crate::animations::{Animation, Pcg32, fade_toward_black};
use crate::chain::{ChainHandle, Rgb};
use crate::cube::Cube;

const MAX_DROPLETS: usize = 256;

#[derive(Clone, Copy)]
struct Droplet {
    x: usize,
    y: usize,
    z: usize,
    color: Rgb,
    active: bool,
}

const INACTIVE: Droplet = Droplet {
    x: 0,
    y: 0,
    z: 0,
    color: Rgb::new(0, 0, 0),
    active: false,
};

/// Rain animation: droplets spawn on the top layer, fall along −y one step
/// per frame, and leave trails that fade toward black.
pub struct Rain {
    drops: [Droplet; MAX_DROPLETS],
    density: f32,
    trail: u8,
    delay: Duration,
    rng: Pcg32,
}

impl Rain {
    /// Configure a rain animation.
    ///
    /// `density` in `[0, 1]` sets how many droplets spawn per frame (1.0
    /// spawns roughly `width × faces / 2`). `trail_strength` in `(0, 1]`
    /// controls trail fade, closer to 1 fading slower. Out-of-range values
    /// are clamped; the fall delay is floored at 10 ms.
    #[must_use]
    pub fn new(density: f32, fall_delay: Duration, trail_strength: f32, rng: Pcg32) -> Self {
        let density = density.clamp(0.0, 1.0);
        let trail_strength = trail_strength.clamp(0.1, 1.0);
        let delay = fall_delay.max(Duration::from_millis(10));
        Self {
            drops: [INACTIVE; MAX_DROPLETS],
            density,
            trail: (trail_strength * 255.0) as u8,
            delay,
            rng,
        }
    }

    /// A sparse drizzle.
    #[must_use]
    pub fn light(rng: Pcg32) -> Self {
        Self::new(0.04, Duration::from_millis(60), 0.55, rng)
    }

    /// A downpour.
    #[must_use]
    pub fn heavy(rng: Pcg32) -> Self {
        Self::new(0.9, Duration::from_millis(60), 0.55, rng)
    }
}

impl<C: ChainHandle> Animation<C> for Rain {
    fn init(&mut self, _cube: &mut Cube<C>) {
        self.drops = [INACTIVE; MAX_DROPLETS];
    }

    fn step(&mut self, cube: &mut Cube<C>) -> Result<Duration> {
        let width = cube.width();
        let height = cube.height();
        let faces = cube.total_faces();

        fade_toward_black(cube, self.trail)?;

        // Advance active droplets one step down; retire them past the floor.
        for drop in &mut self.drops {
            if !drop.active {
                continue;
            }
            if drop.y == 0 {
                drop.active = false;
                continue;
            }
            drop.y -= 1;
            cube.write(drop.x, drop.y, drop.z, drop.color)?;
        }

        // Spawn on the top layer; the fractional part of the spawn budget is
        // settled probabilistically so low densities still rain now and then.
        let exact_spawn = self.density * (width * faces) as f32 * 0.5;
        let mut spawn_count = exact_spawn as usize;
        let fraction_permille = ((exact_spawn - spawn_count as f32) * 1000.0) as u32;
        if self.rng.below(1000) < fraction_permille {
            spawn_count += 1;
        }

        for _ in 0..spawn_count {
            let Some(slot) = self.drops.iter_mut().find(|drop| !drop.active) else {
                break;
            };
            *slot = Droplet {
                x: self.rng.below(width as u32) as usize,
                y: height - 1,
                z: self.rng.below(faces as u32) as usize,
                color: self.rng.color(),
                active: true,
            };
            cube.write(slot.x, slot.y, slot.z, slot.color)?;
        }
        Ok(self.delay)
    }
}

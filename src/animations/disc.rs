//! A filled disc spinning around the vertical axis, sweeping through the
//! faces while its color cycles around the hue wheel.

use embassy_time::Duration;
use libm::{cosf, fabsf, sinf};
use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::Result;
use crate::animations::{Animation, fade_toward_black};
use crate::chain::ChainHandle;
use crate::cube::Cube;

/// Radians the disc turns per frame.
const SPIN_STEP: f32 = 0.15;
/// Hue wheel steps per frame (of 256).
const HUE_STEP: u32 = 3;
/// Disc radius in voxels.
const RADIUS: f32 = 3.5;
/// How thick the disc is along its normal.
const PLANE_THICKNESS: f32 = 0.6;
/// Per-frame fade factor; close to 255 keeps longer ghost trails.
const FADE: u8 = 230;

/// Spinning-disc animation.
#[derive(Default)]
pub struct DiscSpin {
    frame: u32,
}

impl DiscSpin {
    /// Start at frame zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { frame: 0 }
    }
}

impl<C: ChainHandle> Animation<C> for DiscSpin {
    fn init(&mut self, _cube: &mut Cube<C>) {
        self.frame = 0;
    }

    fn step(&mut self, cube: &mut Cube<C>) -> Result<Duration> {
        let width = cube.width();
        let height = cube.height();
        let faces = cube.total_faces();

        // Soft fade instead of hard clears, so the disc leaves no flicker.
        fade_toward_black(cube, FADE)?;

        let center_x = (width - 1) as f32 * 0.5;
        let center_y = (height - 1) as f32 * 0.5;
        let center_z = (faces - 1) as f32 * 0.5;
        let radius_squared = RADIUS * RADIUS;

        let hue = self.frame.wrapping_mul(HUE_STEP) as u8;
        let color = hsv2rgb(Hsv {
            hue,
            sat: 255,
            val: 255,
        });

        // Rotate the sample points backwards so the disc spins forward.
        let angle = self.frame as f32 * SPIN_STEP;
        let cos_angle = cosf(-angle);
        let sin_angle = sinf(-angle);

        for z in 0..faces {
            for y in 0..height {
                for x in 0..width {
                    let dx = x as f32 - center_x;
                    let dy = y as f32 - center_y;
                    let dz = z as f32 - center_z;

                    // Rotate around Y; the base disc lies in the plane z' = 0.
                    let rotated_x = dx * cos_angle + dz * sin_angle;
                    let rotated_y = dy;
                    let rotated_z = -dx * sin_angle + dz * cos_angle;

                    if fabsf(rotated_z) > PLANE_THICKNESS {
                        continue;
                    }
                    if rotated_x * rotated_x + rotated_y * rotated_y > radius_squared {
                        continue;
                    }
                    cube.write(x, y, z, color)?;
                }
            }
        }

        self.frame = self.frame.wrapping_add(1);
        Ok(Duration::from_millis(60))
    }
}

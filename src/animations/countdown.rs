//! Countdown: digits 9 through 0 fly through the faces, then the cube goes up
//! in a radial explosion and the count restarts.

use embassy_time::Duration;
use libm::{fabsf, roundf, sqrtf};

use crate::Result;
use crate::animations::{Animation, Pcg32, scaled};
use crate::chain::{ChainHandle, Rgb};
use crate::cube::Cube;

/// 8×8 bitmaps for digits 0–9; MSB is `x = 0`, row 0 is the glyph's top.
const DIGIT_FONT: [[u8; 8]; 10] = [
    // 0
    [
        0b0011_1100,
        0b0110_0110,
        0b0110_1110,
        0b0111_0110,
        0b0110_0110,
        0b0110_0110,
        0b0011_1100,
        0b0000_0000,
    ],
    // 1
    [
        0b0001_1000,
        0b0011_1000,
        0b0001_1000,
        0b0001_1000,
        0b0001_1000,
        0b0001_1000,
        0b0011_1100,
        0b0000_0000,
    ],
    // 2
    [
        0b0011_1100,
        0b0110_0110,
        0b0000_0110,
        0b0000_1100,
        0b0011_0000,
        0b0110_0000,
        0b0111_1110,
        0b0000_0000,
    ],
    // 3
    [
        0b0011_1100,
        0b0110_0110,
        0b0000_0110,
        0b0001_1100,
        0b0000_0110,
        0b0110_0110,
        0b0011_1100,
        0b0000_0000,
    ],
    // 4
    [
        0b0000_1100,
        0b0001_1100,
        0b0010_1100,
        0b0100_1100,
        0b0111_1110,
        0b0000_1100,
        0b0000_1100,
        0b0000_0000,
    ],
    // 5
    [
        0b0111_1110,
        0b0110_0000,
        0b0111_1100,
        0b0000_0110,
        0b0000_0110,
        0b0110_0110,
        0b0011_1100,
        0b0000_0000,
    ],
    // 6
    [
        0b0011_1100,
        0b0110_0110,
        0b0110_0000,
        0b0111_1100,
        0b0110_0110,
        0b0110_0110,
        0b0011_1100,
        0b0000_0000,
    ],
    // 7
    [
        0b0111_1110,
        0b0000_0110,
        0b0000_1100,
        0b0001_1000,
        0b0011_0000,
        0b0011_0000,
        0b0011_0000,
        0b0000_0000,
    ],
    // 8
    [
        0b0011_1100,
        0b0110_0110,
        0b0110_0110,
        0b0011_1100,
        0b0110_0110,
        0b0110_0110,
        0b0011_1100,
        0b0000_0000,
    ],
    // 9
    [
        0b0011_1100,
        0b0110_0110,
        0b0110_0110,
        0b0011_1110,
        0b0000_0110,
        0b0110_0110,
        0b0011_1100,
        0b0000_0000,
    ],
];

const DIGIT_COLOR: Rgb = Rgb::new(0, 0, 255);
/// Trail-layer fade factor while a digit flies.
const TRAIL_FADE: u8 = 220;
const EXPLOSION_STEPS: u32 = 20;
const SHELL_BAND: f32 = 1.0;
const SPARK_COUNT: u32 = 30;
const RAY_COUNT: u32 = 6;

#[derive(Clone, Copy, Eq, PartialEq)]
enum Phase {
    DigitFly,
    Explosion,
}

/// Countdown animation state machine.
pub struct Countdown {
    digit: u8,
    phase: Phase,
    face_pos: usize,
    explosion_step: u32,
    rng: Pcg32,
}

impl Countdown {
    /// Start at digit 9 on the first face.
    #[must_use]
    pub const fn new(rng: Pcg32) -> Self {
        Self {
            digit: 9,
            phase: Phase::DigitFly,
            face_pos: 0,
            explosion_step: 0,
            rng,
        }
    }

    fn step_digit_fly<C: ChainHandle>(&mut self, cube: &mut Cube<C>) -> Result<()> {
        let faces = cube.total_faces();
        let previous = self.face_pos.checked_sub(1);

        // Fade only the trail layers; hard-clear every other face so digits
        // from earlier passes never overlap the new one.
        for z in 0..faces {
            let is_trail = z == self.face_pos || Some(z) == previous;
            for y in 0..cube.height() {
                for x in 0..cube.width() {
                    let color = if is_trail {
                        scaled(cube.read(x, y, z), TRAIL_FADE)
                    } else {
                        Rgb::new(0, 0, 0)
                    };
                    cube.write(x, y, z, color)?;
                }
            }
        }

        draw_digit(cube, self.digit, self.face_pos, 255)?;
        if let Some(previous_face) = previous {
            draw_digit(cube, self.digit, previous_face, 128)?;
        }

        if self.face_pos + 1 < faces {
            self.face_pos += 1;
        } else if self.digit == 0 {
            self.phase = Phase::Explosion;
            self.explosion_step = 0;
        } else {
            self.digit -= 1;
            self.face_pos = 0;
        }
        Ok(())
    }

    fn step_explosion<C: ChainHandle>(&mut self, cube: &mut Cube<C>) -> Result<()> {
        let progress = self.explosion_step as f32 / EXPLOSION_STEPS as f32;
        let width = cube.width();
        let height = cube.height();
        let faces = cube.total_faces();
        let diagonal = ((width - 1) * (width - 1)
            + (height - 1) * (height - 1)
            + (faces - 1) * (faces - 1)) as f32;
        let radius = progress * sqrtf(diagonal) / 2.0;
        let brightness = ((1.0 - progress) * 255.0) as u8;

        self.draw_explosion(cube, radius, brightness, progress)?;

        if self.explosion_step >= EXPLOSION_STEPS {
            self.phase = Phase::DigitFly;
            self.digit = 9;
            self.face_pos = 0;
        } else {
            self.explosion_step += 1;
        }
        Ok(())
    }

    fn draw_explosion<C: ChainHandle>(
        &mut self,
        cube: &mut Cube<C>,
        radius: f32,
        brightness: u8,
        progress: f32,
    ) -> Result<()> {
        let width = cube.width();
        let height = cube.height();
        let faces = cube.total_faces();
        let center_x = (width - 1) as f32 * 0.5;
        let center_y = (height - 1) as f32 * 0.5;
        let center_z = (faces - 1) as f32 * 0.5;
        let radius_squared = radius * radius;

        // Color over time: bluish, through green at the midpoint, to red.
        let green_peak = 1.0 - fabsf(progress - 0.5) * 2.0;
        let base = Rgb::new(
            (255.0 * progress) as u8,
            (255.0 * green_peak) as u8,
            (255.0 * (1.0 - progress)) as u8,
        );

        // Main symmetric shell; everything off the shell goes black.
        for z in 0..faces {
            for y in 0..height {
                for x in 0..width {
                    let dx = x as f32 - center_x;
                    let dy = y as f32 - center_y;
                    let dz = z as f32 - center_z;
                    let distance_squared = dx * dx + dy * dy + dz * dz;
                    let in_shell = distance_squared >= radius_squared - SHELL_BAND
                        && distance_squared <= radius_squared + SHELL_BAND;
                    let color = if in_shell {
                        scaled(base, brightness)
                    } else {
                        Rgb::new(0, 0, 0)
                    };
                    cube.write(x, y, z, color)?;
                }
            }
        }

        // Bright spark clusters scattered around the shell.
        let spark_band = SHELL_BAND * 2.5;
        let spark_color = Rgb::new(
            base.r.saturating_add(120),
            base.g.saturating_add(120),
            base.b.saturating_add(120),
        );
        for _ in 0..SPARK_COUNT {
            let x = self.rng.below(width as u32) as usize;
            let y = self.rng.below(height as u32) as usize;
            let z = self.rng.below(faces as u32) as usize;
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dz = z as f32 - center_z;
            let distance_squared = dx * dx + dy * dy + dz * dz;
            if distance_squared < radius_squared - spark_band
                || distance_squared > radius_squared + spark_band
            {
                continue;
            }
            cube.write(x, y, z, scaled(spark_color, brightness))?;
        }

        // Coarse rays shooting outward, fading along their length.
        let ray_color = Rgb::new(
            base.r.saturating_add(80),
            base.g.saturating_add(80),
            base.b.saturating_add(80),
        );
        for _ in 0..RAY_COUNT {
            let seed_x = self.rng.below(width as u32) as f32;
            let seed_y = self.rng.below(height as u32) as f32;
            let seed_z = self.rng.below(faces as u32) as f32;
            let mut dx = seed_x - center_x;
            let mut dy = seed_y - center_y;
            let mut dz = seed_z - center_z;
            let length = sqrtf(dx * dx + dy * dy + dz * dz);
            if length < 0.001 {
                continue;
            }
            dx /= length;
            dy /= length;
            dz /= length;

            let steps = (radius * 0.7) as u32;
            for step in 0..steps {
                let along = step as f32 / steps as f32;
                let ray_x = roundf(center_x + dx * radius * along);
                let ray_y = roundf(center_y + dy * radius * along);
                let ray_z = roundf(center_z + dz * radius * along);
                if ray_x < 0.0 || ray_y < 0.0 || ray_z < 0.0 {
                    continue;
                }
                let (ray_x, ray_y, ray_z) = (ray_x as usize, ray_y as usize, ray_z as usize);
                if ray_x >= width || ray_y >= height || ray_z >= faces {
                    continue;
                }
                let fade = ((1.0 - along) * brightness as f32) as u8;
                cube.write(ray_x, ray_y, ray_z, scaled(ray_color, fade))?;
            }
        }
        Ok(())
    }
}

impl<C: ChainHandle> Animation<C> for Countdown {
    fn init(&mut self, _cube: &mut Cube<C>) {
        self.digit = 9;
        self.phase = Phase::DigitFly;
        self.face_pos = 0;
        self.explosion_step = 0;
    }

    fn step(&mut self, cube: &mut Cube<C>) -> Result<Duration> {
        match self.phase {
            Phase::DigitFly => {
                self.step_digit_fly(cube)?;
                Ok(Duration::from_millis(80))
            }
            Phase::Explosion => {
                self.step_explosion(cube)?;
                Ok(Duration::from_millis(60))
            }
        }
    }
}

/// Render `digit` onto `face`, brightness-scaled; off-pixels are written
/// black so the glyph fully owns the face.
fn draw_digit<C: ChainHandle>(
    cube: &mut Cube<C>,
    digit: u8,
    face: usize,
    brightness: u8,
) -> Result<()> {
    let glyph = DIGIT_FONT
        .get(digit as usize)
        .expect("digits stay within 0..=9");
    let color = scaled(DIGIT_COLOR, brightness);
    for y in 0..cube.height() {
        // Flip so glyph row 0 lands at the top of the face.
        let glyph_row = cube.height() - 1 - y;
        let row_bits = glyph.get(glyph_row).copied().unwrap_or(0);
        for x in 0..cube.width() {
            let lit = x < 8 && row_bits & (1 << (7 - x)) != 0;
            cube.write(x, y, face, if lit { color } else { Rgb::new(0, 0, 0) })?;
        }
    }
    Ok(())
}

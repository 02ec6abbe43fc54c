//! The shadow buffer: an in-memory mirror of every voxel's last *requested*
//! color, readable without touching hardware.

use core::fmt;

use crate::chain::Rgb;
use crate::cube::{MAX_FACES, MAX_PANEL_HEIGHT, MAX_PANEL_WIDTH};

pub(crate) const MAX_VOXELS: usize = MAX_FACES * MAX_PANEL_WIDTH * MAX_PANEL_HEIGHT;

const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Dense `(z, y, x)`-indexed color store sized to the display's capacity
/// ceiling. Holds whatever the caller last asked for, whether or not the
/// hardware ever confirmed it.
pub(crate) struct Shadow {
    colors: [Rgb; MAX_VOXELS],
    width: usize,
    height: usize,
    faces: usize,
}

impl Shadow {
    pub(crate) const fn new(width: usize, height: usize, faces: usize) -> Self {
        Self {
            colors: [BLACK; MAX_VOXELS],
            width,
            height,
            faces,
        }
    }

    fn offset(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(x < self.width, "voxel x out of range");
        assert!(y < self.height, "voxel y out of range");
        assert!(z < self.faces, "voxel z out of range");
        (z * self.height + y) * self.width + x
    }

    pub(crate) fn get(&self, x: usize, y: usize, z: usize) -> Rgb {
        let offset = self.offset(x, y, z);
        *self
            .colors
            .get(offset)
            .expect("offset bounded by capacity ceiling")
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, z: usize, color: Rgb) {
        let offset = self.offset(x, y, z);
        *self
            .colors
            .get_mut(offset)
            .expect("offset bounded by capacity ceiling") = color;
    }

    pub(crate) fn fill(&mut self, color: Rgb) {
        self.colors = [color; MAX_VOXELS];
    }

    pub(crate) const fn dump(&self) -> ShadowDump<'_> {
        ShadowDump(self)
    }
}

/// Human-readable rendering of every face's current shadow color.
///
/// Diagnostic only; the exact format carries no stability guarantee.
/// Produced by [`Cube::dump`](crate::cube::Cube::dump).
pub struct ShadowDump<'a>(&'a Shadow);

impl fmt::Display for ShadowDump<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for z in 0..self.0.faces {
            writeln!(formatter, "face {z}:")?;
            for y in 0..self.0.height {
                write!(formatter, "  y={y}:")?;
                for x in 0..self.0.width {
                    let color = self.0.get(x, y, z);
                    write!(formatter, " ({:02x},{:02x},{:02x})", color.r, color.g, color.b)?;
                }
                writeln!(formatter)?;
            }
        }
        Ok(())
    }
}

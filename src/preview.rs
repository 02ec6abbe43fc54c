#![cfg(feature = "host")]
//! Host-side PNG snapshots of the shadow buffer, for eyeballing animation
//! frames without hardware.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder};

use crate::chain::ChainHandle;
use crate::cube::Cube;

/// Render every face of the cube side by side into a PNG at `output_path`.
///
/// Each voxel becomes a `cell_size`-pixel square; faces are separated by a
/// one-cell gutter and laid out left to right in face order. Reads the shadow
/// buffer only.
///
/// # Errors
///
/// Returns filesystem or PNG encoding errors.
///
/// # Panics
///
/// Panics when `cell_size` is zero.
pub fn write_faces_png<C: ChainHandle>(
    cube: &Cube<C>,
    output_path: impl AsRef<Path>,
    cell_size: u32,
) -> Result<(), Box<dyn Error>> {
    assert!(cell_size > 0, "cell_size must be positive");
    let output_path = output_path.as_ref();
    let faces = cube.total_faces() as u32;
    let face_width = cube.width() as u32;
    let face_height = cube.height() as u32;

    let gutter = cell_size;
    let width = faces * face_width * cell_size + (faces - 1) * gutter;
    let height = face_height * cell_size;
    let mut bytes = vec![0_u8; (width * height * 3) as usize];

    for z in 0..cube.total_faces() {
        let face_origin_x = z as u32 * (face_width * cell_size + gutter);
        for y in 0..cube.height() {
            for x in 0..cube.width() {
                let color = cube.read(x, y, z);
                let cell_origin_x = face_origin_x + x as u32 * cell_size;
                let cell_origin_y = y as u32 * cell_size;
                for local_y in 0..cell_size {
                    for local_x in 0..cell_size {
                        let pixel_x = cell_origin_x + local_x;
                        let pixel_y = cell_origin_y + local_y;
                        let offset = ((pixel_y * width + pixel_x) * 3) as usize;
                        bytes[offset] = color.r;
                        bytes[offset + 1] = color.g;
                        bytes[offset + 2] = color.b;
                    }
                }
            }
        }
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&bytes)?;
    writer.finish()?;
    Ok(())
}

#![allow(missing_docs)]
//! Host-level test for the PNG preview of the shadow buffer.

use cube_kit::chain::colors;
use cube_kit::chain::host::HostChain;
use cube_kit::cube::{Backend, ChainConfig, Cube, CubeConfig};
use cube_kit::preview::write_faces_png;
use heapless::Vec;

#[test]
fn writes_a_png_of_every_face() {
    let config = CubeConfig {
        backend: Backend::Pio,
        chains: Vec::from_slice(&[ChainConfig {
            pin: 0,
            panels: 3,
            first_row_backwards: false,
        }])
        .expect("one chain fits"),
        panel_width: 8,
        panel_height: 8,
    };
    let mut cube =
        Cube::new(config, |_, chain| Ok(HostChain::new(chain.panels as usize * 64)))
            .expect("host chains open");
    cube.write(0, 0, 0, colors::RED).expect("host write accepts");
    cube.write(7, 7, 2, colors::BLUE).expect("host write accepts");

    let output_dir = tempfile::tempdir().expect("temp dir creates");
    let output_path = output_dir.path().join("faces.png");
    write_faces_png(&cube, &output_path, 8).expect("png writes");

    let metadata = std::fs::metadata(&output_path).expect("file exists");
    assert!(metadata.len() > 0, "png should not be empty");
}

#![allow(missing_docs)]
//! Host-level tests for the cube engine: write-through shadow semantics and
//! the dirty-chain refresh protocol, driven against the in-memory chain.

use cube_kit::Error;
use cube_kit::chain::host::HostChain;
use cube_kit::chain::{Rgb, colors};
use cube_kit::cube::{Backend, ChainConfig, Cube, CubeConfig};
use embassy_futures::block_on;
use heapless::Vec;

fn config(backend: Backend, panels_per_chain: &[u16], width: usize, height: usize) -> CubeConfig {
    let mut chains = Vec::new();
    for (index, panels) in panels_per_chain.iter().enumerate() {
        chains
            .push(ChainConfig {
                pin: index as u8,
                panels: *panels,
                first_row_backwards: false,
            })
            .expect("test topologies stay within MAX_CHAINS");
    }
    CubeConfig {
        backend,
        chains,
        panel_width: width,
        panel_height: height,
    }
}

fn new_cube(panels_per_chain: &[u16], width: usize, height: usize) -> Cube<HostChain> {
    let config = config(Backend::Pio, panels_per_chain, width, height);
    Cube::new(config, |_, chain| {
        Ok(HostChain::new(chain.panels as usize * width * height))
    })
    .expect("host chains open")
}

#[test]
fn read_after_write_returns_requested_color() {
    let mut cube = new_cube(&[2], 8, 8);
    cube.write(3, 1, 0, colors::BLUE).expect("host write accepts");
    assert_eq!(cube.read(3, 1, 0), colors::BLUE);
    assert_eq!(cube.read(3, 2, 0), Rgb::new(0, 0, 0));
}

#[test]
fn read_after_write_survives_transport_failure() {
    let mut cube = new_cube(&[1], 8, 8);
    cube.chain_mut(0).expect("chain 0 exists").fail_set_pixel = true;

    let color = Rgb::new(10, 20, 30);
    assert_eq!(cube.write(2, 2, 0, color), Err(Error::PixelWrite));
    // Shadow keeps the requested color; it was updated before the attempt.
    assert_eq!(cube.read(2, 2, 0), color);
    // The chain never accepted anything, so nothing is dirty.
    block_on(cube.refresh()).expect("refresh with no dirty chains");
    assert_eq!(cube.chain(0).expect("chain 0 exists").flush_count, 0);
}

#[test]
fn refresh_twice_flushes_once() {
    let mut cube = new_cube(&[1], 8, 8);
    cube.write(0, 0, 0, colors::RED).expect("host write accepts");
    block_on(cube.refresh()).expect("flush succeeds");
    assert_eq!(cube.chain(0).expect("chain 0 exists").flush_count, 1);

    // No intervening writes: the second refresh touches no hardware.
    block_on(cube.refresh()).expect("nothing to flush");
    assert_eq!(cube.chain(0).expect("chain 0 exists").flush_count, 1);
}

#[test]
fn only_dirty_chains_flush() {
    let mut cube = new_cube(&[1, 1], 8, 8);
    // z = 1 lives on chain 1; chain 0 stays untouched.
    cube.write(4, 4, 1, colors::GREEN).expect("host write accepts");
    block_on(cube.refresh()).expect("flush succeeds");
    assert_eq!(cube.chain(0).expect("chain 0 exists").flush_count, 0);
    assert_eq!(cube.chain(1).expect("chain 1 exists").flush_count, 1);
}

#[test]
fn failed_flush_keeps_chain_dirty_and_retries() {
    let mut cube = new_cube(&[1], 8, 8);
    cube.write(1, 1, 0, colors::CYAN).expect("host write accepts");

    cube.chain_mut(0).expect("chain 0 exists").fail_refresh = true;
    assert_eq!(block_on(cube.refresh()), Err(Error::Flush));
    assert_eq!(cube.chain(0).expect("chain 0 exists").flush_count, 0);

    // The flag stayed set, so the next refresh retries and succeeds.
    cube.chain_mut(0).expect("chain 0 exists").fail_refresh = false;
    block_on(cube.refresh()).expect("retry succeeds");
    let chain = cube.chain(0).expect("chain 0 exists");
    assert_eq!(chain.flush_count, 1);
    assert_eq!(chain.displayed(63), Rgb::new(0, 0, 0));
}

#[test]
fn one_bad_chain_does_not_starve_the_rest() {
    let mut cube = new_cube(&[1, 1], 8, 8);
    cube.write(0, 0, 0, colors::RED).expect("host write accepts");
    cube.write(0, 0, 1, colors::BLUE).expect("host write accepts");

    cube.chain_mut(0).expect("chain 0 exists").fail_refresh = true;
    assert_eq!(block_on(cube.refresh()), Err(Error::Flush));
    // Chain 1 still flushed even though chain 0 failed first.
    assert_eq!(cube.chain(1).expect("chain 1 exists").flush_count, 1);

    cube.chain_mut(0).expect("chain 0 exists").fail_refresh = false;
    block_on(cube.refresh()).expect("retry succeeds");
    assert_eq!(cube.chain(0).expect("chain 0 exists").flush_count, 1);
    // Chain 1 was clean by then; no redundant flush.
    assert_eq!(cube.chain(1).expect("chain 1 exists").flush_count, 1);
}

#[test]
fn write_lands_on_expected_physical_index() {
    // One chain, one 8×1 panel, row 0 backwards: (3, 0, 0) → LED 4.
    let mut chains = Vec::new();
    chains
        .push(ChainConfig {
            pin: 0,
            panels: 1,
            first_row_backwards: true,
        })
        .expect("one chain fits");
    let config = CubeConfig {
        backend: Backend::Pio,
        chains,
        panel_width: 8,
        panel_height: 1,
    };
    let mut cube = Cube::new(config, |_, _| Ok(HostChain::new(8))).expect("host chains open");

    let color = Rgb::new(10, 20, 30);
    cube.write(3, 0, 0, color).expect("host write accepts");
    assert_eq!(cube.read(3, 0, 0), color);
    assert_eq!(cube.chain(0).expect("chain 0 exists").staged(4), color);

    block_on(cube.refresh()).expect("flush succeeds");
    assert_eq!(cube.chain(0).expect("chain 0 exists").displayed(4), color);
}

#[test]
fn clear_blanks_shadow_and_hardware_and_flags() {
    let mut cube = new_cube(&[2, 1], 8, 8);
    cube.write(7, 7, 2, colors::WHITE).expect("host write accepts");
    block_on(cube.clear()).expect("clear succeeds");

    for z in 0..cube.total_faces() {
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(cube.read(x, y, z), Rgb::new(0, 0, 0));
            }
        }
    }
    // Clear marked every chain dirty and refreshed them all.
    let flushes_after_clear: usize = (0..cube.chain_count())
        .map(|index| cube.chain(index).expect("chain exists").flush_count)
        .sum();
    assert_eq!(flushes_after_clear, 2);

    // All flags are clean again: another refresh is a no-op.
    block_on(cube.refresh()).expect("nothing to flush");
    let flushes_after_idle: usize = (0..cube.chain_count())
        .map(|index| cube.chain(index).expect("chain exists").flush_count)
        .sum();
    assert_eq!(flushes_after_idle, 2);
}

#[test]
fn clear_surfaces_flush_failure_and_stays_dirty() {
    let mut cube = new_cube(&[1], 8, 8);
    cube.chain_mut(0).expect("chain 0 exists").fail_refresh = true;
    assert_eq!(block_on(cube.clear()), Err(Error::Flush));

    // Shadow is blank regardless; the flag retries on the next refresh.
    assert_eq!(cube.read(0, 0, 0), Rgb::new(0, 0, 0));
    cube.chain_mut(0).expect("chain 0 exists").fail_refresh = false;
    block_on(cube.refresh()).expect("retry succeeds");
    assert_eq!(cube.chain(0).expect("chain 0 exists").flush_count, 1);
}

#[test]
fn accessors_report_topology() {
    let cube = new_cube(&[3, 2], 8, 8);
    assert_eq!(cube.total_faces(), 5);
    assert_eq!(cube.total_leds(), 5 * 64);
    assert_eq!(cube.width(), 8);
    assert_eq!(cube.height(), 8);
    assert_eq!(cube.chain_count(), 2);
    assert_eq!(cube.backend(), Backend::Pio);
}

#[test]
fn chain_open_failure_surfaces() {
    let config = config(Backend::Pio, &[1], 8, 8);
    let result: Result<Cube<HostChain>, Error> = Cube::new(config, |_, _| Err(Error::ChainOpen));
    assert_eq!(result.err(), Some(Error::ChainOpen));
}

#[test]
fn dump_renders_every_face() {
    let mut cube = new_cube(&[2], 4, 2);
    cube.write(1, 0, 1, Rgb::new(0xab, 0x00, 0xff))
        .expect("host write accepts");
    let rendered = format!("{}", cube.dump());
    assert!(rendered.contains("face 0:"));
    assert!(rendered.contains("face 1:"));
    assert!(rendered.contains("(ab,00,ff)"));
}

#[test]
fn validation_accepts_and_rejects_topologies() {
    // Valid baseline.
    assert!(config(Backend::Pio, &[3, 2], 8, 8).is_valid());
    assert!(config(Backend::Spi, &[8], 8, 8).is_valid());

    // Empty chain list.
    assert!(!config(Backend::Pio, &[], 8, 8).is_valid());
    // SPI allows exactly one chain.
    assert!(!config(Backend::Spi, &[1, 1], 8, 8).is_valid());
    // Every chain needs at least one panel.
    assert!(!config(Backend::Pio, &[2, 0], 8, 8).is_valid());
    // Degenerate panel dimensions.
    assert!(!config(Backend::Pio, &[1], 0, 8).is_valid());
    assert!(!config(Backend::Pio, &[1], 8, 0).is_valid());
    // Beyond the capacity ceilings.
    assert!(!config(Backend::Pio, &[1], 9, 8).is_valid());
    assert!(!config(Backend::Pio, &[1], 8, 9).is_valid());
    assert!(!config(Backend::Pio, &[5, 4], 8, 8).is_valid());
}

#[test]
#[should_panic(expected = "invalid cube configuration")]
fn constructing_from_invalid_config_panics() {
    let config = config(Backend::Pio, &[], 8, 8);
    let _ = Cube::new(config, |_, _| Ok(HostChain::new(64)));
}

#[test]
#[should_panic(expected = "voxel z out of range")]
fn read_beyond_faces_panics() {
    let cube = new_cube(&[1], 8, 8);
    let _ = cube.read(0, 0, 1);
}

#[test]
#[should_panic(expected = "voxel x out of range")]
fn write_beyond_width_panics() {
    let mut cube = new_cube(&[1], 8, 8);
    let _ = cube.write(8, 0, 0, colors::RED);
}

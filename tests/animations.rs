#![allow(missing_docs)]
//! Host-level smoke tests: every animation renders frames against a fake cube
//! without panicking, stays inside the display bounds (the engine asserts
//! bounds on every write), and produces visible output.

use cube_kit::animations::bounce::Bounce;
use cube_kit::animations::countdown::Countdown;
use cube_kit::animations::disc::DiscSpin;
use cube_kit::animations::rain::Rain;
use cube_kit::animations::{Animation, Pcg32};
use cube_kit::chain::Rgb;
use cube_kit::chain::host::HostChain;
use cube_kit::cube::{Backend, ChainConfig, Cube, CubeConfig};
use embassy_futures::block_on;
use embassy_time::Duration;
use heapless::Vec;

fn new_cube(faces_per_chain: &[u16]) -> Cube<HostChain> {
    let mut chains = Vec::new();
    for (index, panels) in faces_per_chain.iter().enumerate() {
        chains
            .push(ChainConfig {
                pin: index as u8,
                panels: *panels,
                first_row_backwards: index % 2 == 1,
            })
            .expect("test topologies stay within MAX_CHAINS");
    }
    let config = CubeConfig {
        backend: Backend::Pio,
        chains,
        panel_width: 8,
        panel_height: 8,
    };
    Cube::new(config, |_, chain| {
        Ok(HostChain::new(chain.panels as usize * 64))
    })
    .expect("host chains open")
}

fn lit_voxels(cube: &Cube<HostChain>) -> usize {
    let mut lit = 0;
    for z in 0..cube.total_faces() {
        for y in 0..cube.height() {
            for x in 0..cube.width() {
                if cube.read(x, y, z) != Rgb::new(0, 0, 0) {
                    lit += 1;
                }
            }
        }
    }
    lit
}

fn run<A: Animation<HostChain>>(animation: &mut A, cube: &mut Cube<HostChain>, frames: usize) {
    block_on(cube.clear()).expect("clear succeeds");
    animation.init(cube);
    for _ in 0..frames {
        let pacing = animation.step(cube).expect("host writes accept");
        assert!(pacing >= Duration::from_millis(10));
        block_on(cube.refresh()).expect("flush succeeds");
    }
}

#[test]
fn heavy_rain_wets_the_cube() {
    let mut cube = new_cube(&[2, 2]);
    let mut rain = Rain::heavy(Pcg32::new(7, 1));
    run(&mut rain, &mut cube, 5);
    assert!(lit_voxels(&cube) > 0, "heavy rain should light droplets");
}

#[test]
fn light_rain_eventually_dries_up() {
    let mut cube = new_cube(&[2]);
    // Density zero: whatever is falling fades out and nothing respawns.
    let mut rain = Rain::new(0.0, Duration::from_millis(60), 0.5, Pcg32::new(7, 2));
    run(&mut rain, &mut cube, 40);
    assert_eq!(lit_voxels(&cube), 0);
}

#[test]
fn disc_draws_within_bounds() {
    let mut cube = new_cube(&[2, 2]);
    let mut disc = DiscSpin::new();
    run(&mut disc, &mut cube, 20);
    assert!(lit_voxels(&cube) > 0, "disc should be visible");
}

#[test]
fn countdown_survives_a_full_cycle() {
    let mut cube = new_cube(&[2]);
    let mut countdown = Countdown::new(Pcg32::new(7, 3));
    // 10 digits × 2 faces of travel + 21 explosion frames, then wraps.
    run(&mut countdown, &mut cube, 10 * 2 + 21 + 5);
}

#[test]
fn countdown_renders_a_digit() {
    let mut cube = new_cube(&[2]);
    let mut countdown = Countdown::new(Pcg32::new(7, 4));
    run(&mut countdown, &mut cube, 1);
    assert!(lit_voxels(&cube) > 0, "digit 9 should be visible");
}

#[test]
fn bounce_stays_in_bounds_even_on_a_single_face() {
    let mut cube = new_cube(&[1]);
    let mut bounce = Bounce::new(Pcg32::new(7, 5));
    run(&mut bounce, &mut cube, 100);
    assert!(lit_voxels(&cube) > 0, "the dot should be visible");
}

#[test]
fn animations_restart_cleanly_after_reinit() {
    let mut cube = new_cube(&[2, 1]);
    let mut countdown = Countdown::new(Pcg32::new(7, 6));
    run(&mut countdown, &mut cube, 30);
    // Re-init mid-explosion and keep going; state must reset consistently.
    run(&mut countdown, &mut cube, 10);
}

//! Two PIO chains of four 8×8 panels each, raining forever.

#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;
use core::panic;

use cube_kit::animations::Animation;
use cube_kit::animations::Pcg32;
use cube_kit::animations::rain::Rain;
use cube_kit::chain::pio::PioChain;
use cube_kit::cube::{Backend, ChainConfig, Cube, CubeConfig};
use cube_kit::pio_irqs::Pio0Irqs;
use cube_kit::{Error, Result};
use embassy_executor::Spawner;
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::PioWs2812Program;
use embassy_time::Timer;
use heapless::Vec;
use {defmt_rtt as _, panic_probe as _};

const PANEL_WIDTH: usize = 8;
const PANEL_HEIGHT: usize = 8;
const PANELS_PER_CHAIN: u16 = 4;
const CHAIN_LEDS: usize = PANELS_PER_CHAIN as usize * PANEL_WIDTH * PANEL_HEIGHT;

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let Pio {
        mut common,
        sm0,
        sm1,
        ..
    } = Pio::new(p.PIO0, Pio0Irqs);
    let program = PioWs2812Program::new(&mut common);

    let config = CubeConfig {
        backend: Backend::Pio,
        chains: Vec::from_slice(&[
            ChainConfig {
                pin: 5,
                panels: PANELS_PER_CHAIN,
                first_row_backwards: false,
            },
            ChainConfig {
                pin: 14,
                panels: PANELS_PER_CHAIN,
                first_row_backwards: false,
            },
        ])
        .expect("two chains fit"),
        panel_width: PANEL_WIDTH,
        panel_height: PANEL_HEIGHT,
    };

    // Chain devices in configuration order; the opener hands them out.
    let legs: [PioChain<'_, _, CHAIN_LEDS>; 2] = [
        PioChain::sm0(&mut common, sm0, p.DMA_CH0, p.PIN_5, &program, CHAIN_LEDS),
        PioChain::sm1(&mut common, sm1, p.DMA_CH1, p.PIN_14, &program, CHAIN_LEDS),
    ];
    let mut legs = legs.into_iter();
    let mut cube = Cube::new(config, |_, _| legs.next().ok_or(Error::ChainOpen))?;

    defmt::info!(
        "cube up: {} faces, {} LEDs",
        cube.total_faces(),
        cube.total_leds()
    );
    cube.clear().await?;
    Timer::after_millis(1000).await;

    let mut rain = Rain::light(Pcg32::new(0x0dd_b1e5, 1));
    rain.init(&mut cube);
    loop {
        let pacing = rain.step(&mut cube)?;
        cube.refresh().await?;
        Timer::after(pacing).await;
    }
}

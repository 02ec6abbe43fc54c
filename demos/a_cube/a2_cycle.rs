//! Full cube application: an ordered animation list cycled by button press.
//!
//! Short press advances to the next animation; long press restarts the
//! current one from scratch.

#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;
use core::panic;

use cube_kit::animations::bounce::Bounce;
use cube_kit::animations::countdown::Countdown;
use cube_kit::animations::disc::DiscSpin;
use cube_kit::animations::rain::Rain;
use cube_kit::animations::{Animation, Pcg32};
use cube_kit::button::{Button, PressDuration, PressEvents, PressedTo};
use cube_kit::chain::pio::PioChain;
use cube_kit::cube::{Backend, ChainConfig, Cube, CubeConfig};
use cube_kit::pio_irqs::Pio0Irqs;
use cube_kit::{Error, Result};
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::PioWs2812Program;
use embassy_time::{Instant, Timer};
use heapless::Vec;
use {defmt_rtt as _, panic_probe as _};

const PANEL_WIDTH: usize = 8;
const PANEL_HEIGHT: usize = 8;
const PANELS_PER_CHAIN: u16 = 4;
const CHAIN_LEDS: usize = PANELS_PER_CHAIN as usize * PANEL_WIDTH * PANEL_HEIGHT;

static PRESS_EVENTS: PressEvents = PressEvents::new();

#[embassy_executor::task]
async fn button_events(button: Button<'static>, events: &'static PressEvents) -> ! {
    cube_kit::button::watch(button, events).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let button = Button::new(p.PIN_13, PressedTo::Ground);
    spawner
        .spawn(button_events(button, &PRESS_EVENTS))
        .map_err(|_| Error::TaskSpawn)?;

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

    let legs: [PioChain<'_, _, CHAIN_LEDS>; 2] = [
        PioChain::sm0(&mut common, sm0, p.DMA_CH0, p.PIN_5, &program, CHAIN_LEDS),
        PioChain::sm1(&mut common, sm1, p.DMA_CH1, p.PIN_14, &program, CHAIN_LEDS),
    ];
    let mut legs = legs.into_iter();
    let mut cube = Cube::new(config, |_, _| legs.next().ok_or(Error::ChainOpen))?;
    cube.clear().await?;

    let seed = Instant::now().as_ticks();
    let mut rain_light = Rain::light(Pcg32::new(seed, 1));
    let mut rain_heavy = Rain::heavy(Pcg32::new(seed, 2));
    let mut disc = DiscSpin::new();
    let mut countdown = Countdown::new(Pcg32::new(seed, 3));
    let mut bounce = Bounce::new(Pcg32::new(seed, 4));
    let mut animations: [&mut dyn Animation<_>; 5] = [
        &mut rain_light,
        &mut rain_heavy,
        &mut disc,
        &mut countdown,
        &mut bounce,
    ];
    let animation_count = animations.len();
    let mut selected = 0_usize;

    loop {
        let Some(animation) = animations.get_mut(selected) else {
            selected = 0;
            continue;
        };
        defmt::info!("starting animation {}", selected);
        cube.clear().await?;
        animation.init(&mut cube);

        loop {
            let pacing = animation.step(&mut cube)?;
            cube.refresh().await?;
            match select(PRESS_EVENTS.next(), Timer::after(pacing)).await {
                Either::First(PressDuration::Short) => {
                    selected = (selected + 1) % animation_count;
                    break;
                }
                Either::First(PressDuration::Long) => break, // restart current
                Either::Second(()) => {}
            }
        }
    }
}

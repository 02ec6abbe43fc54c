//! PIO interrupt bindings shared by the PIO chain transports.
//!
//! Pass `Pio0Irqs`/`Pio1Irqs` to `embassy_rp::pio::Pio::new` when splitting a
//! PIO block for chain construction.
#![allow(missing_docs, reason = "bind_interrupts! generates the structs")]

use embassy_rp::{bind_interrupts, peripherals, pio};

bind_interrupts!(pub struct Pio0Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<peripherals::PIO0>;
});

bind_interrupts!(pub struct Pio1Irqs {
    PIO1_IRQ_0 => pio::InterruptHandler<peripherals::PIO1>;
});

#[cfg(feature = "pico2")]
bind_interrupts!(pub struct Pio2Irqs {
    PIO2_IRQ_0 => pio::InterruptHandler<peripherals::PIO2>;
});

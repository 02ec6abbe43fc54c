//! A debounced push button that selects the active animation.
//!
//! [`Button`] owns its pin and debounce timing; no process-wide state. For
//! loops that must never miss a press, feed a [`PressEvents`] slot from a
//! spawned [`watch`] task and `select` on [`PressEvents::next`] alongside the
//! frame timer.

use embassy_futures::select::{Either, select};
use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

/// Settle time after an edge before trusting the level.
const DEBOUNCE_DELAY: Duration = Duration::from_millis(10);

/// Held longer than this counts as a long press.
const LONG_PRESS_DURATION: Duration = Duration::from_millis(500);

/// How the button is physically wired.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum PressedTo {
    /// Button connects the pin to 3.3 V when pressed; internal pull-down.
    Voltage,
    /// Button connects the pin to GND when pressed; internal pull-up.
    Ground,
}

/// Whether a press was short or long.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum PressDuration {
    /// Released before the long-press threshold.
    Short,
    /// Held past the long-press threshold (reported before release).
    Long,
}

/// A debounced push button on one GPIO pin.
pub struct Button<'a> {
    input: Input<'a>,
    pressed_to: PressedTo,
}

impl<'a> Button<'a> {
    /// Configure `pin` as a button input with the matching internal pull.
    #[must_use]
    pub fn new<P: embassy_rp::gpio::Pin>(pin: Peri<'a, P>, pressed_to: PressedTo) -> Self {
        let pull = match pressed_to {
            PressedTo::Voltage => Pull::Down,
            PressedTo::Ground => Pull::Up,
        };
        Self {
            input: Input::new(pin, pull),
            pressed_to,
        }
    }

    /// Whether the button is pressed right now (raw, undebounced).
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        match self.pressed_to {
            PressedTo::Voltage => self.input.is_high(),
            PressedTo::Ground => self.input.is_low(),
        }
    }

    /// Wait until the button reads `pressed` and holds it through a debounce
    /// window.
    async fn wait_for_stable(&mut self, pressed: bool) {
        loop {
            while self.is_pressed() != pressed {
                Timer::after_millis(1).await;
            }
            Timer::after(DEBOUNCE_DELAY).await;
            if self.is_pressed() == pressed {
                return;
            }
            // bounce; keep waiting
        }
    }

    /// Wait for the next debounced press. Returns on the down edge; does not
    /// wait for release.
    pub async fn wait_for_press(&mut self) {
        self.wait_for_stable(false).await;
        self.wait_for_stable(true).await;
    }

    /// Wait for the next press and classify it as short or long.
    ///
    /// Long presses are reported as soon as the threshold passes, before the
    /// button is released.
    pub async fn wait_for_press_duration(&mut self) -> PressDuration {
        self.wait_for_press().await;
        match select(
            self.wait_for_stable(false),
            Timer::after(LONG_PRESS_DURATION),
        )
        .await
        {
            Either::First(()) => PressDuration::Short,
            Either::Second(()) => PressDuration::Long,
        }
    }
}

/// Single-slot press event queue.
///
/// A newer press replaces an unconsumed older one, which is the behavior an
/// animation selector wants: only the latest request matters.
pub struct PressEvents {
    signal: Signal<CriticalSectionRawMutex, PressDuration>,
}

impl PressEvents {
    /// An empty slot; usable in a `static`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Wait for the next press event and consume it.
    pub async fn next(&self) -> PressDuration {
        self.signal.wait().await
    }
}

impl Default for PressEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive `button` forever, publishing each debounced press into `events`.
///
/// Spawn this from an application task so presses are captured even while the
/// frame loop is busy mid-render.
pub async fn watch(mut button: Button<'static>, events: &'static PressEvents) -> ! {
    loop {
        let press = button.wait_for_press_duration().await;
        defmt::debug!("button press: {}", press);
        events.signal.signal(press);
        // Don't re-arm until the press fully ends.
        button.wait_for_stable(false).await;
    }
}

//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

use fixtures::{MockBridge, MockButtons, MockDisplay, MockSerial, MockWatchdog};
use shutter_jig::config::{DefaultConfig, JigConfig};
use shutter_jig::timing::clock;
use shutter_jig::{Jig, TickCounter};

pub type TestJig<'a, C = DefaultConfig> =
    Jig<'a, MockSerial, MockDisplay, MockButtons, MockBridge, MockWatchdog, C>;

// ============================================================================
// Jig Creation Helpers
// ============================================================================

/// Create a started jig with default configuration and cleared serial output.
pub fn create_test_jig(ticks: &TickCounter) -> TestJig<'_> {
    create_jig_with::<DefaultConfig>(ticks)
}

/// Create a started jig for any configuration.
pub fn create_jig_with<C: JigConfig>(ticks: &TickCounter) -> TestJig<'_, C> {
    let mut jig = Jig::new(
        ticks,
        MockSerial::new(),
        MockDisplay::new(),
        MockButtons::default(),
        MockBridge::default(),
        MockWatchdog::default(),
    );
    jig.start().unwrap();
    jig.serial_mut().clear_output();
    jig
}

// ============================================================================
// Time Helpers
// ============================================================================

/// Count one timer period and run one polling iteration.
pub fn tick_and_poll<C: JigConfig>(jig: &mut TestJig<'_, C>, ticks: &TickCounter) {
    ticks.tick();
    jig.poll().unwrap();
}

/// Tick and poll until the tenths-of-second value changes once.
///
/// The shutter has been advanced exactly once when this returns.
pub fn next_tenth<C: JigConfig>(jig: &mut TestJig<'_, C>, ticks: &TickCounter) {
    let start = clock::tenths::<C>(ticks.read_ticks());
    loop {
        tick_and_poll(jig, ticks);
        if clock::tenths::<C>(ticks.read_ticks()) != start {
            return;
        }
    }
}

/// Run `n` tenths-of-second edges.
pub fn run_tenths<C: JigConfig>(jig: &mut TestJig<'_, C>, ticks: &TickCounter, n: usize) {
    for _ in 0..n {
        next_tenth(jig, ticks);
    }
}

/// Tick and poll until the counter reads `target`.
pub fn run_until_tick<C: JigConfig>(jig: &mut TestJig<'_, C>, ticks: &TickCounter, target: u32) {
    while ticks.read_ticks() < target {
        tick_and_poll(jig, ticks);
    }
}

// ============================================================================
// Button Helpers
// ============================================================================

/// Hold `bits` for exactly one polling iteration, without a tick.
pub fn press_once<C: JigConfig>(jig: &mut TestJig<'_, C>, bits: u8) {
    jig.buttons_mut().press(bits);
    jig.poll().unwrap();
    jig.buttons_mut().release();
}

/// Type a line on the serial port and let one iteration consume it.
pub fn enter_boot_time<C: JigConfig>(jig: &mut TestJig<'_, C>, line: &str) {
    jig.serial_mut().push_input(line);
    jig.poll().unwrap();
}

//! Test fixtures and utilities for shutter-jig testing.
//!
//! Provides:
//! - `MockSerial`: in-memory serial line with input queue and output capture
//! - `MockDisplay`: four-line character display that records what is shown,
//!   with an optional busy period after every write
//! - `MockButtons`: push buttons whose level the test sets directly
//! - `MockBridge`: H-bridge that records every command
//! - `MockWatchdog`: counts feeds
//! - `SlowConfig`: non-default pulse widths

#![allow(dead_code)]

use shutter_jig::config::JigConfig;
use shutter_jig::hal::display::LINE_WIDTH;
use shutter_jig::{
    Actuator, BridgeCommand, BridgeFault, ButtonInput, Buttons, Line, SerialIo, TextDisplay, Watchdog,
};
use std::collections::VecDeque;

// ============================================================================
// MockSerial - Serial Line
// ============================================================================

/// Error returned once a reader has polled an empty line too long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Starved;

/// Polls of an empty input queue before `get_char` gives up.
///
/// Keeps a test that forgets the line terminator from hanging forever.
const STARVE_LIMIT: u32 = 1000;

/// Mock serial line.
///
/// Input is queued by the test and handed out one character per poll; all
/// output is captured as a string.
#[derive(Debug, Default)]
pub struct MockSerial {
    input: VecDeque<char>,
    output: String,
    empty_polls: u32,
    flushes: u32,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue input (simulates the operator typing).
    pub fn push_input(&mut self, s: &str) {
        self.input.extend(s.chars());
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn input_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn flushes(&self) -> u32 {
        self.flushes
    }
}

impl SerialIo for MockSerial {
    type Error = Starved;

    fn data_pending(&mut self) -> Result<bool, Starved> {
        Ok(!self.input.is_empty())
    }

    fn get_char(&mut self) -> Result<Option<char>, Starved> {
        match self.input.pop_front() {
            Some(c) => {
                self.empty_polls = 0;
                Ok(Some(c))
            }
            None => {
                self.empty_polls += 1;
                if self.empty_polls > STARVE_LIMIT {
                    Err(Starved)
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn put_char(&mut self, c: char) -> Result<(), Starved> {
        self.output.push(c);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Starved> {
        self.flushes += 1;
        Ok(())
    }
}

// ============================================================================
// MockDisplay - Four-line Character Display
// ============================================================================

/// Mock 4x20 display.
///
/// Decodes the set-address commands the way the controller does, so tests
/// can read back each line as text. After every write the busy flag reads
/// set for `busy_reads` polls, and a write while busy fails the test.
#[derive(Debug)]
pub struct MockDisplay {
    lines: [[u8; LINE_WIDTH]; 4],
    cursor: Option<(usize, usize)>,
    commands: Vec<u8>,
    busy_reads: u32,
    busy_left: u32,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            lines: [[b' '; LINE_WIDTH]; 4],
            cursor: None,
            commands: Vec::new(),
            busy_reads: 0,
            busy_left: 0,
        }
    }

    /// Report busy for `polls` reads after every write.
    pub fn with_busy_reads(polls: u32) -> Self {
        Self {
            busy_reads: polls,
            ..Self::new()
        }
    }

    /// Text of line `n` (1-based), trailing blanks removed.
    pub fn line(&self, n: usize) -> String {
        String::from_utf8_lossy(&self.lines[n - 1]).trim_end().to_string()
    }

    /// Every command byte received, in order.
    pub fn commands(&self) -> &[u8] {
        &self.commands
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay for MockDisplay {
    type Error = core::convert::Infallible;

    fn command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        assert_eq!(self.busy_left, 0, "command 0x{:02X} sent while busy", cmd);
        self.busy_left = self.busy_reads;
        self.commands.push(cmd);

        if let Some((line, col)) = Line::locate(cmd) {
            self.cursor = Some((line.index(), col));
        } else if cmd == 0x01 {
            self.lines = [[b' '; LINE_WIDTH]; 4];
            self.cursor = Some((0, 0));
        }
        Ok(())
    }

    fn data(&mut self, byte: u8) -> Result<(), Self::Error> {
        assert_eq!(self.busy_left, 0, "data sent while busy");
        self.busy_left = self.busy_reads;

        let (line, col) = self.cursor.as_mut().expect("data written before any address");
        assert!(*col < LINE_WIDTH, "write past end of line {}", *line + 1);
        self.lines[*line][*col] = byte;
        *col += 1;
        Ok(())
    }

    fn is_busy(&mut self) -> Result<bool, Self::Error> {
        if self.busy_left > 0 {
            self.busy_left -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

// ============================================================================
// MockButtons / MockBridge / MockWatchdog
// ============================================================================

/// Buttons held at whatever level the test last set.
#[derive(Debug, Default)]
pub struct MockButtons {
    pub bits: u8,
}

impl MockButtons {
    pub fn press(&mut self, bits: u8) {
        self.bits = bits;
    }

    pub fn release(&mut self) {
        self.bits = 0;
    }
}

impl ButtonInput for MockButtons {
    fn sample(&mut self) -> Buttons {
        Buttons::from_bits(self.bits)
    }
}

/// Bridge that records every command it receives.
///
/// With `fail` set, every command is rejected and nothing is recorded.
#[derive(Debug, Default)]
pub struct MockBridge {
    pub commands: Vec<BridgeCommand>,
    pub fail: bool,
}

impl MockBridge {
    /// The command currently applied, if any.
    pub fn current(&self) -> Option<BridgeCommand> {
        self.commands.last().copied()
    }
}

impl Actuator for MockBridge {
    type Error = BridgeFault;

    fn command(&mut self, cmd: BridgeCommand) -> Result<(), BridgeFault> {
        if self.fail {
            return Err(BridgeFault::OpenHalf);
        }
        self.commands.push(cmd);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockWatchdog {
    pub feeds: u32,
}

impl Watchdog for MockWatchdog {
    fn feed(&mut self) {
        self.feeds += 1;
    }
}

// ============================================================================
// Configurations
// ============================================================================

/// Longer pulse and shorter dwell than the default.
#[derive(Debug)]
pub struct SlowConfig;

impl JigConfig for SlowConfig {
    const CPU_E_CLOCK_HZ: u32 = 2_000_000;
    const TIMER_DIV: u32 = 8192;
    const ON_TICKS: u8 = 2;
    const OFF_TICKS: u8 = 1;
    const BANNER: &'static str = "Slow jig";
    const MSG_BOOT_PROMPT: &'static str = "time? ";
    const MSG_BOOT_SET: &'static str = "ok\r\n";
    const MSG_BOOT_INVALID: &'static str = "bad\r\n";
}

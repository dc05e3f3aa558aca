//! Cooperative polling loop.
//!
//! `Jig` owns every collaborator and all loop state. One call to
//! [`Jig::poll`] is one iteration:
//!
//! 1. feed the watchdog
//! 2. run boot-time entry if serial input is pending and no bridge half is
//!    being driven (entry blocks; it waits for the pulse to end)
//! 3. sample buttons, latch requests, count presses
//! 4. write the button/flag diagnostics (line 4)
//! 5. snapshot the tick counter; if it moved:
//!    - write the raw tick diagnostics (line 3)
//!    - on a new second, write `HH:MM:SS` to line 2 and the serial line
//!    - on a new tenth, advance the shutter exactly once
//!
//! The only state shared with the timer interrupt is the [`TickCounter`].

use core::fmt::Write;

use crate::config::JigConfig;
use crate::console::BootTimeEntry;
use crate::error::JigError;
use crate::hal::bridge::{Actuator, BridgeCommand};
use crate::hal::buttons::{ButtonInput, Buttons};
use crate::hal::display::{Line, TextDisplay};
use crate::hal::Watchdog;
use crate::io::SerialIo;
use crate::shutter::{Requests, Shutter};
use crate::timing::clock::{self, CalendarTime};
use crate::timing::tick::TickCounter;
use crate::{info, warn};

/// The jig: collaborators plus loop state.
///
/// Generic over:
/// - `S`: serial line ([`SerialIo`])
/// - `D`: character display ([`TextDisplay`])
/// - `B`: push buttons ([`ButtonInput`])
/// - `A`: H-bridge ([`Actuator`])
/// - `W`: watchdog ([`Watchdog`])
/// - `C`: timing and messages ([`JigConfig`])
pub struct Jig<'a, S, D, B, A, W, C>
where
    S: SerialIo,
    D: TextDisplay,
    B: ButtonInput,
    A: Actuator,
    W: Watchdog,
    C: JigConfig,
{
    ticks: &'a TickCounter,

    serial: S,
    display: D,
    buttons: B,
    bridge: A,
    watchdog: W,

    entry: BootTimeEntry<C>,
    shutter: Shutter,
    requests: Requests,

    /// Seconds since midnight at tick zero
    boot_offset: u32,

    last_sample: Buttons,
    open_presses: u16,
    close_presses: u16,

    prev_ticks: u32,
    last_second: Option<u32>,
    last_tenths: u32,
}

impl<'a, S, D, B, A, W, C> core::fmt::Debug for Jig<'a, S, D, B, A, W, C>
where
    S: SerialIo,
    D: TextDisplay,
    B: ButtonInput,
    A: Actuator,
    W: Watchdog,
    C: JigConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Jig")
            .field("shutter", &self.shutter)
            .field("requests", &self.requests)
            .field("boot_offset", &self.boot_offset)
            .field("prev_ticks", &self.prev_ticks)
            .finish_non_exhaustive()
    }
}

impl<'a, S, D, B, A, W, C> Jig<'a, S, D, B, A, W, C>
where
    S: SerialIo,
    D: TextDisplay,
    B: ButtonInput,
    A: Actuator,
    W: Watchdog,
    C: JigConfig,
{
    /// Create the jig. The shutter position is unknown until the first move.
    pub fn new(ticks: &'a TickCounter, serial: S, display: D, buttons: B, bridge: A, watchdog: W) -> Self {
        let now = ticks.read_ticks();

        Self {
            ticks,
            serial,
            display,
            buttons,
            bridge,
            watchdog,
            entry: BootTimeEntry::new(),
            shutter: Shutter::new(),
            requests: Requests::default(),
            boot_offset: 0,
            last_sample: Buttons::default(),
            open_presses: 0,
            close_presses: 0,
            prev_ticks: now,
            last_second: None,
            last_tenths: clock::tenths::<C>(now),
        }
    }

    /// Idle the bridge, initialise the display and show the banner on serial and line 1.
    pub fn start(&mut self) -> Result<(), JigError> {
        self.bridge
            .command(BridgeCommand::Idle)
            .map_err(|_| JigError::ActuatorError)?;
        self.display
            .init(&mut self.watchdog)
            .map_err(|_| JigError::DisplayError)?;

        self.serial.write_str("\n").map_err(|_| JigError::IoError)?;
        self.serial.write_str(C::BANNER).map_err(|_| JigError::IoError)?;
        self.serial.write_str("\n").map_err(|_| JigError::IoError)?;

        self.display
            .write_line(Line::One, C::BANNER, &mut self.watchdog)
            .map_err(|_| JigError::DisplayError)?;

        info!("jig started");
        Ok(())
    }

    /// Run forever. Collaborator errors are logged and the loop continues.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(e) = self.poll() {
                warn!("poll failed: {}", e);
            }
        }
    }

    /// One polling iteration.
    pub fn poll(&mut self) -> Result<(), JigError> {
        self.watchdog.feed();

        if !self.shutter.is_driving() && self.serial.data_pending().map_err(|_| JigError::IoError)? {
            match self.entry.run(&mut self.serial, &mut self.watchdog) {
                Ok(offset) => self.boot_offset = offset,
                Err(JigError::InvalidFormat) => {}
                Err(e) => return Err(e),
            }
        }

        let sample = self.buttons.sample();
        self.apply_buttons(sample);
        self.show_flags()?;

        let now = self.ticks.read_ticks();
        if now != self.prev_ticks {
            self.prev_ticks = now;
            self.on_tick(now)?;
        }

        Ok(())
    }

    fn apply_buttons(&mut self, sample: Buttons) {
        self.last_sample = sample;

        if sample.open() {
            self.requests.open = true;
            self.open_presses = self.open_presses.wrapping_add(1);
        }

        if sample.close() {
            self.requests.close = true;
            self.close_presses = self.close_presses.wrapping_add(1);
        }

        if sample.clear() && (self.open_presses != 0 || self.close_presses != 0) {
            info!(
                "press counters cleared (open {}, close {})",
                self.open_presses, self.close_presses
            );
            self.open_presses = 0;
            self.close_presses = 0;
        }
    }

    /// Line 4: `b=<open>,<close>,<open req>,<close req>,<opened>,<closed>`
    fn show_flags(&mut self) -> Result<(), JigError> {
        let mut text: heapless::String<24> = heapless::String::new();
        let _ = write!(
            text,
            "b={},{},{},{},{},{}",
            u8::from(self.last_sample.open()),
            u8::from(self.last_sample.close()),
            u8::from(self.requests.open),
            u8::from(self.requests.close),
            u8::from(self.shutter.is_opened()),
            u8::from(self.shutter.is_closed()),
        );
        self.display
            .write_line(Line::Four, &text, &mut self.watchdog)
            .map_err(|_| JigError::DisplayError)
    }

    fn on_tick(&mut self, now: u32) -> Result<(), JigError> {
        let (seconds, tenths) = clock::to_calendar::<C>(now, self.boot_offset);

        // Line 3: `t=<ticks>, <µs>, <seconds>`
        let mut raw: heapless::String<40> = heapless::String::new();
        let _ = write!(raw, "t={}, {}, {}", now, clock::microseconds::<C>(now), seconds);
        self.display
            .write_line(Line::Three, &raw, &mut self.watchdog)
            .map_err(|_| JigError::DisplayError)?;

        if self.last_second != Some(seconds) {
            self.last_second = Some(seconds);

            let mut time: heapless::String<16> = heapless::String::new();
            let _ = write!(time, "{}", CalendarTime::from_seconds(seconds));

            self.serial.write_str("\r").map_err(|_| JigError::IoError)?;
            self.serial.write_str(&time).map_err(|_| JigError::IoError)?;
            self.display
                .write_line(Line::Two, &time, &mut self.watchdog)
                .map_err(|_| JigError::DisplayError)?;
        }

        if tenths != self.last_tenths {
            self.last_tenths = tenths;
            if let Some(cmd) = self.shutter.advance::<C>(&mut self.requests) {
                self.bridge.command(cmd).map_err(|_| JigError::ActuatorError)?;
            }
        }

        self.serial.flush().map_err(|_| JigError::IoError)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current boot offset in seconds since midnight.
    pub fn boot_offset(&self) -> u32 {
        self.boot_offset
    }

    /// Shutter state machine.
    pub fn shutter(&self) -> &Shutter {
        &self.shutter
    }

    /// Latched open/close requests.
    pub fn requests(&self) -> Requests {
        self.requests
    }

    /// `(open, close)` button press counters.
    pub fn press_counts(&self) -> (u16, u16) {
        (self.open_presses, self.close_presses)
    }

    /// Serial collaborator.
    pub fn serial(&self) -> &S {
        &self.serial
    }

    /// Display collaborator.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Bridge collaborator.
    pub fn bridge(&self) -> &A {
        &self.bridge
    }

    /// Watchdog collaborator.
    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }

    /// Mutable serial collaborator.
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Mutable display collaborator.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Mutable button collaborator.
    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }

    /// Mutable bridge collaborator.
    pub fn bridge_mut(&mut self) -> &mut A {
        &mut self.bridge
    }

    /// Mutable watchdog collaborator.
    pub fn watchdog_mut(&mut self) -> &mut W {
        &mut self.watchdog
    }
}

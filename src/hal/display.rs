//! Four-line character display.
//!
//! Implementors supply the raw bus primitives (`command`, `data` and the
//! busy-flag read). Busy waiting, line addressing, the init sequence and
//! width clipping are provided here. Every busy-flag read feeds the watchdog.

use super::Watchdog;

/// Visible characters per display line.
pub const LINE_WIDTH: usize = 20;

/// Controller initialisation: 8-bit bus, display on/cursor off, entry mode, clear.
pub const INIT_SEQUENCE: [u8; 4] = [0x3C, 0x0C, 0x06, 0x01];

/// Display line, addressed by its start position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Static banner
    One,

    /// `HH:MM:SS` clock
    Two,

    /// Raw tick diagnostics
    Three,

    /// Button and flag diagnostics
    Four,
}

impl Line {
    /// All lines, top to bottom.
    pub const ALL: [Line; 4] = [Line::One, Line::Two, Line::Three, Line::Four];

    /// Set-DDRAM-address command that moves the cursor to the start of this line.
    pub const fn address(self) -> u8 {
        match self {
            Line::One => 0x80,
            Line::Two => 0xC0,
            Line::Three => 0x94,
            Line::Four => 0xD4,
        }
    }

    /// Zero-based row number.
    pub const fn index(self) -> usize {
        match self {
            Line::One => 0,
            Line::Two => 1,
            Line::Three => 2,
            Line::Four => 3,
        }
    }

    /// Decode a set-DDRAM-address command into the line and column it selects.
    ///
    /// Returns `None` for any other command byte or an address past the
    /// visible width.
    pub fn locate(cmd: u8) -> Option<(Line, usize)> {
        Self::ALL.into_iter().find_map(|line| {
            let col = usize::from(cmd.checked_sub(line.address())?);
            (col < LINE_WIDTH).then_some((line, col))
        })
    }
}

/// Write-only text sink with fixed line addressing.
pub trait TextDisplay {
    /// Platform-specific error type
    type Error;

    /// Send a controller command byte. The controller must be ready.
    fn command(&mut self, cmd: u8) -> Result<(), Self::Error>;

    /// Send a character byte at the cursor. The controller must be ready.
    fn data(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Read the controller busy flag.
    fn is_busy(&mut self) -> Result<bool, Self::Error>;

    /// Wait for the busy flag to clear, feeding `watchdog` on every read.
    fn wait_ready<W: Watchdog>(&mut self, watchdog: &mut W) -> Result<(), Self::Error> {
        loop {
            watchdog.feed();
            if !self.is_busy()? {
                return Ok(());
            }
        }
    }

    /// Run the controller initialisation sequence.
    fn init<W: Watchdog>(&mut self, watchdog: &mut W) -> Result<(), Self::Error> {
        for cmd in INIT_SEQUENCE {
            self.wait_ready(watchdog)?;
            self.command(cmd)?;
        }
        Ok(())
    }

    /// Move the cursor to the start of `line`.
    fn set_line<W: Watchdog>(&mut self, line: Line, watchdog: &mut W) -> Result<(), Self::Error> {
        self.wait_ready(watchdog)?;
        self.command(line.address())
    }

    /// Write text at the cursor.
    fn write_str<W: Watchdog>(&mut self, s: &str, watchdog: &mut W) -> Result<(), Self::Error> {
        for b in s.bytes() {
            self.wait_ready(watchdog)?;
            self.data(b)?;
        }
        Ok(())
    }

    /// Replace the whole of `line` with `s`.
    ///
    /// Writes exactly [`LINE_WIDTH`] bytes: `s` is clipped, and padded with
    /// spaces so nothing from a longer previous text is left behind.
    fn write_line<W: Watchdog>(&mut self, line: Line, s: &str, watchdog: &mut W) -> Result<(), Self::Error> {
        self.set_line(line, watchdog)?;
        let bytes = s.bytes().chain(core::iter::repeat(b' '));
        for b in bytes.take(LINE_WIDTH) {
            self.wait_ready(watchdog)?;
            self.data(b)?;
        }
        Ok(())
    }
}

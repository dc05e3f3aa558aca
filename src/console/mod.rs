//! Serial boot-time entry.
//!
//! When the polling loop sees pending serial input it hands the line over to
//! [`BootTimeEntry`], which prompts, assembles an edited line with echo,
//! parses it and reports the outcome to the operator. This is the only place
//! the loop blocks on the serial line; the watchdog is fed while waiting.

use core::marker::PhantomData;

use crate::config::JigConfig;
use crate::error::JigError;
use crate::hal::Watchdog;
use crate::io::SerialIo;
use crate::{info, warn};

pub mod decoder;
pub mod parser;

pub use decoder::{InputDecoder, InputEvent};
pub use parser::parse_boot_time;

/// Characters kept per entry; further input is dropped until the terminator.
pub const ENTRY_CAPACITY: usize = 31;

/// Interactive `HH:MM:SS` line entry.
#[derive(Debug)]
pub struct BootTimeEntry<C: JigConfig> {
    buffer: heapless::String<ENTRY_CAPACITY>,
    decoder: InputDecoder,
    _config: PhantomData<C>,
}

impl<C: JigConfig> BootTimeEntry<C> {
    /// Create an entry with an empty line buffer.
    pub fn new() -> Self {
        Self {
            buffer: heapless::String::new(),
            decoder: InputDecoder::new(),
            _config: PhantomData,
        }
    }

    /// Prompt for, read and parse one boot time.
    ///
    /// Blocks until a CR or LF arrives. Returns the new offset in seconds on
    /// success. On `Err(JigError::InvalidFormat)` the operator has already
    /// been told and the caller must keep its previous offset.
    pub fn run<IO, W>(&mut self, io: &mut IO, watchdog: &mut W) -> Result<u32, JigError>
    where
        IO: SerialIo,
        W: Watchdog,
    {
        self.buffer.clear();
        self.decoder.reset();
        io.write_str(C::MSG_BOOT_PROMPT).map_err(|_| JigError::IoError)?;

        loop {
            let c = recv_char(io, watchdog)?;
            if self.process_char(io, c)? {
                break;
            }
        }

        io.write_str("\n").map_err(|_| JigError::IoError)?;

        match parse_boot_time(&self.buffer) {
            Ok(offset) => {
                io.write_str(C::MSG_BOOT_SET).map_err(|_| JigError::IoError)?;
                info!("boot time set to {} s", offset);
                Ok(offset)
            }
            Err(e) => {
                io.write_str(C::MSG_BOOT_INVALID).map_err(|_| JigError::IoError)?;
                warn!("boot time rejected ({} chars)", self.buffer.len());
                Err(e)
            }
        }
    }

    /// Apply one character to the line buffer, echoing as needed.
    ///
    /// Returns `true` when the line is complete.
    pub fn process_char<IO: SerialIo>(&mut self, io: &mut IO, c: char) -> Result<bool, JigError> {
        match self.decoder.decode_char(c) {
            InputEvent::None => Ok(false),

            InputEvent::Char(ch) => {
                // Full buffer: drop silently, keep waiting for the terminator
                if self.buffer.push(ch).is_ok() {
                    io.put_char(ch).map_err(|_| JigError::IoError)?;
                }
                Ok(false)
            }

            InputEvent::Backspace => {
                if self.buffer.pop().is_some() {
                    io.write_str("\x08 \x08").map_err(|_| JigError::IoError)?;
                }
                Ok(false)
            }

            InputEvent::Enter => Ok(true),
        }
    }

    /// Current line contents (for testing/debugging).
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

impl<C: JigConfig> Default for BootTimeEntry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for one character, feeding the watchdog on every poll.
fn recv_char<IO: SerialIo, W: Watchdog>(io: &mut IO, watchdog: &mut W) -> Result<char, JigError> {
    loop {
        watchdog.feed();
        if let Some(c) = io.get_char().map_err(|_| JigError::IoError)? {
            return Ok(c);
        }
    }
}

//! Operator push buttons.
//!
//! Three level-sampled inputs: open, close and clear-diagnostics. There is no
//! hardware or software debounce.

use embedded_hal::digital::InputPin;

/// One sample of the three buttons.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    /// Open request (bit 0)
    pub const OPEN: u8 = 1 << 0;
    /// Close request (bit 1)
    pub const CLOSE: u8 = 1 << 1;
    /// Clear diagnostic counters (bit 2)
    pub const CLEAR: u8 = 1 << 2;

    /// Build a sample from a raw port read; bits above 2 are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x07)
    }

    /// Raw 3-bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Open button held.
    pub const fn open(self) -> bool {
        self.0 & Self::OPEN != 0
    }

    /// Close button held.
    pub const fn close(self) -> bool {
        self.0 & Self::CLOSE != 0
    }

    /// Clear button held.
    pub const fn clear(self) -> bool {
        self.0 & Self::CLEAR != 0
    }
}

/// Source of button samples.
pub trait ButtonInput {
    /// Sample all three buttons once.
    fn sample(&mut self) -> Buttons;
}

/// Buttons wired to three active-high GPIO inputs (PA0, PA1, PA2 on the reference board).
#[derive(Debug)]
pub struct PinButtons<O, C, X> {
    open: O,
    close: C,
    clear: X,
}

impl<O: InputPin, C: InputPin, X: InputPin> PinButtons<O, C, X> {
    /// Take ownership of the three input pins.
    pub fn new(open: O, close: C, clear: X) -> Self {
        Self { open, close, clear }
    }
}

impl<O: InputPin, C: InputPin, X: InputPin> ButtonInput for PinButtons<O, C, X> {
    fn sample(&mut self) -> Buttons {
        // A pin read error counts as "not pressed".
        let mut bits = 0;
        if self.open.is_high().unwrap_or(false) {
            bits |= Buttons::OPEN;
        }
        if self.close.is_high().unwrap_or(false) {
            bits |= Buttons::CLOSE;
        }
        if self.clear.is_high().unwrap_or(false) {
            bits |= Buttons::CLEAR;
        }
        Buttons::from_bits(bits)
    }
}

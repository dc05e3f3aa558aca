//! Input decoder for the serial console.
//!
//! Converts raw characters into line-editing events. Terminal escape
//! sequences (arrow keys and the like) are swallowed so they never end up in
//! the boot-time buffer.
//!
//! This is a pure decoder - it doesn't manage buffers or I/O.

/// Decoder state for escape sequence handling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputState {
    /// Normal input mode
    Normal,

    /// Saw ESC
    EscapeStart,

    /// Saw ESC [ (inside a control sequence)
    EscapeSequence,
}

/// Logical input event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Nothing to do (ignored control character or partial sequence)
    None,

    /// Character to append to the line
    Char(char),

    /// Remove the last character (ASCII BS or DEL)
    Backspace,

    /// Line complete (CR or LF)
    Enter,
}

/// Console input decoder.
#[derive(Debug)]
pub struct InputDecoder {
    state: InputState,
}

impl InputDecoder {
    /// Create new decoder in Normal state.
    pub fn new() -> Self {
        Self {
            state: InputState::Normal,
        }
    }

    /// Decode a single character into an input event.
    ///
    /// ```rust,ignore
    /// assert_eq!(decoder.decode_char('7'), InputEvent::Char('7'));
    /// assert_eq!(decoder.decode_char('\x08'), InputEvent::Backspace);
    /// assert_eq!(decoder.decode_char('\r'), InputEvent::Enter);
    /// ```
    pub fn decode_char(&mut self, c: char) -> InputEvent {
        match self.state {
            InputState::Normal => self.decode_normal(c),
            InputState::EscapeStart => self.decode_escape_start(c),
            InputState::EscapeSequence => self.decode_escape_sequence(c),
        }
    }

    fn decode_normal(&mut self, c: char) -> InputEvent {
        match c {
            '\x1b' => {
                self.state = InputState::EscapeStart;
                InputEvent::None
            }

            '\n' | '\r' => InputEvent::Enter,

            '\x08' | '\x7f' => InputEvent::Backspace,

            c if c.is_control() => InputEvent::None,

            _ => InputEvent::Char(c),
        }
    }

    fn decode_escape_start(&mut self, c: char) -> InputEvent {
        match c {
            '[' => {
                self.state = InputState::EscapeSequence;
                InputEvent::None
            }

            // Lone ESC: drop it and decode the next character normally
            _ => {
                self.state = InputState::Normal;
                self.decode_normal(c)
            }
        }
    }

    fn decode_escape_sequence(&mut self, c: char) -> InputEvent {
        // Parameters and intermediates stay in the sequence; a final byte ends it
        if !('\x40'..='\x7e').contains(&c) {
            return InputEvent::None;
        }
        self.state = InputState::Normal;
        InputEvent::None
    }

    /// Reset decoder state to Normal.
    pub fn reset(&mut self) {
        self.state = InputState::Normal;
    }

    /// Get current decoder state (for testing/debugging).
    #[cfg(test)]
    pub fn state(&self) -> InputState {
        self.state
    }
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new()
    }
}

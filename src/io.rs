//! Serial character I/O abstraction.
//!
//! The `SerialIo` trait is the only view the core has of the serial transport:
//! a "data pending" query, a non-blocking read and buffered writes. Blocking
//! reads are built on top of it by the console so the watchdog can be fed
//! while waiting.

/// Platform-agnostic serial character I/O trait.
///
/// Implementations may flush writes immediately (blocking on the transmitter
/// is acceptable on bare metal) or buffer them until [`flush`](Self::flush).
pub trait SerialIo {
    /// Platform-specific error type
    type Error;

    /// Returns `true` when at least one received character is waiting.
    fn data_pending(&mut self) -> Result<bool, Self::Error>;

    /// Non-blocking character read.
    ///
    /// Returns:
    /// - `Ok(Some(char))` if character available
    /// - `Ok(None)` if no character available (non-blocking)
    /// - `Err(Self::Error)` on I/O error
    fn get_char(&mut self) -> Result<Option<char>, Self::Error>;

    /// Write character to the transmitter.
    fn put_char(&mut self, c: char) -> Result<(), Self::Error>;

    /// Write string to the transmitter.
    ///
    /// Default implementation uses `put_char()` repeatedly.
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for c in s.chars() {
            self.put_char(c)?;
        }
        Ok(())
    }

    /// Wait until everything written so far has left the transmitter.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::string::String;

    struct Sink(String);

    impl SerialIo for Sink {
        type Error = ();

        fn data_pending(&mut self) -> Result<bool, ()> {
            Ok(false)
        }

        fn get_char(&mut self) -> Result<Option<char>, ()> {
            Ok(None)
        }

        fn put_char(&mut self, c: char) -> Result<(), ()> {
            self.0.push(c);
            Ok(())
        }
    }

    #[test]
    fn test_default_write_str_uses_put_char() {
        let mut sink = Sink(String::new());
        sink.write_str("12:00:00").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.0, "12:00:00");
    }
}

//! H-bridge actuator output.
//!
//! The bridge is a 2-bit output: one half drives the shutter open, the other
//! drives it closed. Both halves are never energised together.

use embedded_hal::digital::OutputPin;

/// Command for the H-bridge driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeCommand {
    /// Both halves off
    Idle,

    /// Energise the half that opens the shutter
    DriveOpen,

    /// Energise the half that closes the shutter
    DriveClose,
}

/// Sink for bridge commands.
pub trait Actuator {
    /// Platform-specific error type
    type Error;

    /// Apply `cmd` to the bridge outputs.
    ///
    /// On error the half that was to be energised has not been touched.
    fn command(&mut self, cmd: BridgeCommand) -> Result<(), Self::Error>;
}

/// Which half-bridge pin failed to switch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeFault {
    /// The open half (PA5)
    OpenHalf,

    /// The close half (PA4)
    CloseHalf,
}

/// Bridge driven by two GPIO outputs.
///
/// On the reference board the open half is PA5 and the close half is PA4.
#[derive(Debug)]
pub struct PinBridge<O, C> {
    open_half: O,
    close_half: C,
}

impl<O: OutputPin, C: OutputPin> PinBridge<O, C> {
    /// Take ownership of the two half-bridge pins and drive both low.
    pub fn new(open_half: O, close_half: C) -> Result<Self, BridgeFault> {
        let mut bridge = Self {
            open_half,
            close_half,
        };
        bridge.command(BridgeCommand::Idle)?;
        Ok(bridge)
    }

    /// Return the pins.
    pub fn release(self) -> (O, C) {
        (self.open_half, self.close_half)
    }

    fn release_open(&mut self) -> Result<(), BridgeFault> {
        self.open_half.set_low().map_err(|_| BridgeFault::OpenHalf)
    }

    fn release_close(&mut self) -> Result<(), BridgeFault> {
        self.close_half.set_low().map_err(|_| BridgeFault::CloseHalf)
    }
}

impl<O: OutputPin, C: OutputPin> Actuator for PinBridge<O, C> {
    type Error = BridgeFault;

    fn command(&mut self, cmd: BridgeCommand) -> Result<(), BridgeFault> {
        match cmd {
            BridgeCommand::Idle => {
                // Try both halves even if the first one fails
                let open = self.release_open();
                let close = self.release_close();
                open.and(close)
            }
            BridgeCommand::DriveOpen => {
                self.release_close()?;
                self.open_half.set_high().map_err(|_| BridgeFault::OpenHalf)
            }
            BridgeCommand::DriveClose => {
                self.release_open()?;
                self.close_half.set_high().map_err(|_| BridgeFault::CloseHalf)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    type Log = Rc<RefCell<Vec<(&'static str, bool)>>>;

    /// Pin that appends `(name, level)` to a shared log on every successful write.
    struct LogPin {
        name: &'static str,
        log: Log,
        level: bool,
        fail_low: bool,
    }

    impl LogPin {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: log.clone(),
                level: false,
                fail_low: false,
            }
        }
    }

    impl ErrorType for LogPin {
        type Error = ErrorKind;
    }

    impl OutputPin for LogPin {
        fn set_low(&mut self) -> Result<(), ErrorKind> {
            if self.fail_low {
                return Err(ErrorKind::Other);
            }
            self.level = false;
            self.log.borrow_mut().push((self.name, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), ErrorKind> {
            self.level = true;
            self.log.borrow_mut().push((self.name, true));
            Ok(())
        }
    }

    fn bridge() -> (PinBridge<LogPin, LogPin>, Log) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let bridge = PinBridge::new(LogPin::new("PA5", &log), LogPin::new("PA4", &log)).unwrap();
        log.borrow_mut().clear();
        (bridge, log)
    }

    #[test]
    fn test_new_leaves_bridge_idle() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let _bridge = PinBridge::new(LogPin::new("PA5", &log), LogPin::new("PA4", &log)).unwrap();
        assert_eq!(*log.borrow(), [("PA5", false), ("PA4", false)]);
    }

    #[test]
    fn test_drive_open_releases_close_half_first() {
        let (mut bridge, log) = bridge();
        bridge.command(BridgeCommand::DriveOpen).unwrap();
        assert_eq!(*log.borrow(), [("PA4", false), ("PA5", true)]);
    }

    #[test]
    fn test_drive_close_releases_open_half_first() {
        let (mut bridge, log) = bridge();
        bridge.command(BridgeCommand::DriveClose).unwrap();
        assert_eq!(*log.borrow(), [("PA5", false), ("PA4", true)]);
    }

    #[test]
    fn test_failed_release_never_energises_other_half() {
        let (mut bridge, _log) = bridge();
        bridge.command(BridgeCommand::DriveClose).unwrap();
        bridge.close_half.fail_low = true;

        assert_eq!(bridge.command(BridgeCommand::DriveOpen), Err(BridgeFault::CloseHalf));

        let (open, close) = bridge.release();
        assert!(!open.level);
        assert!(close.level);
    }

    #[test]
    fn test_idle_releases_both_halves_despite_one_failure() {
        let (mut bridge, log) = bridge();
        bridge.command(BridgeCommand::DriveClose).unwrap();
        bridge.open_half.fail_low = true;
        log.borrow_mut().clear();

        assert_eq!(bridge.command(BridgeCommand::Idle), Err(BridgeFault::OpenHalf));
        assert_eq!(*log.borrow(), [("PA4", false)]);
    }

    #[test]
    fn test_new_reports_pin_failure() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut close = LogPin::new("PA4", &log);
        close.fail_low = true;
        assert_eq!(
            PinBridge::new(LogPin::new("PA5", &log), close).err(),
            Some(BridgeFault::CloseHalf)
        );
    }
}

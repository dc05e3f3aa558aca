//! Hardware collaborator seams.
//!
//! The core never touches registers directly. Everything it drives or samples
//! goes through the small traits in this module and its children, so the same
//! logic runs against real pins on the target and against mocks on a host.

pub mod bridge;
pub mod buttons;
pub mod display;

/// Hardware watchdog (COP) service.
///
/// Fed at the top of every polling iteration and at every wait point.
pub trait Watchdog {
    /// Restart the watchdog timeout.
    fn feed(&mut self);
}

/// Watchdog for boards that run with the COP disabled.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoWatchdog;

impl Watchdog for NoWatchdog {
    fn feed(&mut self) {}
}

/// Acknowledgement of the periodic timer that drives the tick counter.
///
/// Called from the timer interrupt after the counter was incremented, so the
/// next period can fire.
pub trait TimerAck {
    /// Clear the pending timer flag.
    fn acknowledge(&mut self);
}

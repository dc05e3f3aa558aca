//! Shutter actuator state machine.
//!
//! Each move is a pulse-then-dwell sequence counted in tenths of a second:
//! the matching bridge half is energised for `ON_TICKS` clock edges, the
//! bridge idles for `OFF_TICKS` edges, and only then is the shutter believed
//! to be open (or closed). There are no end-stop sensors; the logical
//! position is trusted.
//!
//! [`Shutter::advance`] is called exactly once per tenths-of-second edge.
//! Requests are level signals latched by the polling loop and cleared here
//! once honoured.
//!
//! ```text
//!              open                 open                      open
//!   Idle ──────────────▶ DrivingOpen ─────▶ DwellAfterOpen ──────────▶ Opened
//!   Closed ────────────▶   (ON_TICKS)         (OFF_TICKS)
//!
//!              close                close                     close
//!   Idle ──────────────▶ DrivingClose ────▶ DwellAfterClose ─────────▶ Closed
//!   Opened ────────────▶   (ON_TICKS)         (OFF_TICKS)
//! ```

use crate::config::JigConfig;
use crate::debug;
use crate::hal::bridge::BridgeCommand;

/// Shutter phase. Exactly one holds at any time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShutterState {
    /// Position unknown (power-up); neither opened nor closed is claimed
    Idle,

    /// Open half energised
    DrivingOpen,

    /// Bridge idle after the open pulse
    DwellAfterOpen,

    /// Logically open
    Opened,

    /// Close half energised
    DrivingClose,

    /// Bridge idle after the close pulse
    DwellAfterClose,

    /// Logically closed
    Closed,
}

/// Latched operator requests.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Requests {
    /// Open requested and not yet honoured
    pub open: bool,

    /// Close requested and not yet honoured
    pub close: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Direction {
    Open,
    Close,
}

impl Direction {
    fn driving(self) -> ShutterState {
        match self {
            Direction::Open => ShutterState::DrivingOpen,
            Direction::Close => ShutterState::DrivingClose,
        }
    }

    fn dwell(self) -> ShutterState {
        match self {
            Direction::Open => ShutterState::DwellAfterOpen,
            Direction::Close => ShutterState::DwellAfterClose,
        }
    }

    fn done(self) -> ShutterState {
        match self {
            Direction::Open => ShutterState::Opened,
            Direction::Close => ShutterState::Closed,
        }
    }

    fn drive(self) -> BridgeCommand {
        match self {
            Direction::Open => BridgeCommand::DriveOpen,
            Direction::Close => BridgeCommand::DriveClose,
        }
    }

    fn clear(self, requests: &mut Requests) {
        match self {
            Direction::Open => requests.open = false,
            Direction::Close => requests.close = false,
        }
    }
}

/// Shutter state plus the pulse counters shared by both directions.
#[derive(Debug, Clone)]
pub struct Shutter {
    state: ShutterState,
    on_count: u8,
    off_count: u8,
}

impl Shutter {
    /// Power-up state: [`ShutterState::Idle`], counters zero.
    pub const fn new() -> Self {
        Self {
            state: ShutterState::Idle,
            on_count: 0,
            off_count: 0,
        }
    }

    /// Current phase.
    pub fn state(&self) -> ShutterState {
        self.state
    }

    /// Logical "opened" flag.
    pub fn is_opened(&self) -> bool {
        self.state == ShutterState::Opened
    }

    /// Logical "closed" flag.
    pub fn is_closed(&self) -> bool {
        self.state == ShutterState::Closed
    }

    /// A bridge half is being energised.
    pub fn is_driving(&self) -> bool {
        matches!(self.state, ShutterState::DrivingOpen | ShutterState::DrivingClose)
    }

    /// `(on_count, off_count)` of the sequence in progress.
    pub fn counters(&self) -> (u8, u8) {
        (self.on_count, self.off_count)
    }

    /// Advance one tenths-of-second edge.
    ///
    /// Open has priority: when both requests are set, the close request is
    /// cleared and only the open sequence runs. Returns the bridge command to
    /// apply, or `None` when the bridge must be left untouched.
    pub fn advance<C: JigConfig>(&mut self, requests: &mut Requests) -> Option<BridgeCommand> {
        if requests.open {
            requests.close = false;
            self.step::<C>(Direction::Open, requests)
        } else if requests.close {
            self.step::<C>(Direction::Close, requests)
        } else {
            None
        }
    }

    fn step<C: JigConfig>(&mut self, dir: Direction, requests: &mut Requests) -> Option<BridgeCommand> {
        if self.state == dir.done() {
            dir.clear(requests);
            return None;
        }

        // Entering this direction, possibly preempting the other one mid-sequence
        if self.state != dir.driving() && self.state != dir.dwell() {
            self.on_count = 0;
            self.off_count = 0;
        }

        let (next, output) = if self.on_count < C::ON_TICKS {
            self.on_count += 1;
            (dir.driving(), Some(dir.drive()))
        } else if self.off_count < C::OFF_TICKS {
            self.off_count += 1;
            (dir.dwell(), Some(BridgeCommand::Idle))
        } else {
            self.on_count = 0;
            self.off_count = 0;
            dir.clear(requests);
            (dir.done(), None)
        };

        if next != self.state {
            debug!("shutter {:?} -> {:?}", self.state, next);
            self.state = next;
        }
        output
    }
}

impl Default for Shutter {
    fn default() -> Self {
        Self::new()
    }
}

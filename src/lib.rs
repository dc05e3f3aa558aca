//! # shutter-jig
//!
//! Timing and actuation core for a bare-metal shutter test jig with zero heap allocation.
//!
//! **Key features:**
//! - **Interrupt-safe tick counter** - One writer in the timer ISR, torn-free snapshots everywhere else
//! - **Integer-only clock** - Ticks plus an operator-set boot offset become `HH:MM:SS` and tenths
//! - **Pulse-then-dwell actuator** - Explicit state machine driving an H-bridge in 100 ms steps
//! - **Serial boot-time entry** - Line editing with echo and backspace over any character I/O
//! - **Hardware seams** - Display, bridge, buttons and watchdog are traits (embedded-hal pins supported)
//!
//! ## Optional Features
//!
//! - `log` (default) - Log through the `log` facade
//! - `defmt` - Log through `defmt` on embedded targets
//! - `sim` - Build the `shutter-jig-sim` host simulator (std-only)
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
// Dual logging system compatibility: defmt doesn't support modern format syntax
#![allow(clippy::uninlined_format_args)]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features 'defmt' and 'log' are mutually exclusive. Enable only one for logging.");

#[cfg(not(any(feature = "defmt", feature = "log")))]
compile_error!("Must enable either 'defmt' or 'log' feature for logging support.");

// ============================================================================
// Module Declarations
// ============================================================================

// Configuration and I/O foundation
pub mod config;
pub mod error;
pub mod io;

// Hardware collaborators (display, bridge, buttons, watchdog)
pub mod hal;

// Tick counter and time conversion
pub mod timing;

// Serial boot-time entry
pub mod console;

// Actuator state machine
pub mod shutter;

// Polling loop
pub mod jig;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Core I/O
pub use io::SerialIo;

// Configuration
pub use config::{DefaultConfig, JigConfig};

// Error types
pub use error::JigError;

// Hardware seams
pub use hal::bridge::{Actuator, BridgeCommand, BridgeFault, PinBridge};
pub use hal::buttons::{ButtonInput, Buttons, PinButtons};
pub use hal::display::{Line, TextDisplay};
pub use hal::{NoWatchdog, TimerAck, Watchdog};

// Timing
pub use timing::clock::{CalendarTime, to_calendar};
pub use timing::tick::TickCounter;

// Console
pub use console::{BootTimeEntry, parse_boot_time};

// Actuator state machine
pub use shutter::{Requests, Shutter, ShutterState};

// Polling loop
pub use jig::Jig;

// Re-export logging macros for convenience
#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, info, warn};

#[cfg(feature = "log")]
pub(crate) use log::{debug, info, warn};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

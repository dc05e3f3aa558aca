//! Timekeeping.
//!
//! [`tick`] owns the counter shared with the timer interrupt; [`clock`] turns
//! a snapshot of it into wall-clock seconds and tenths.

pub mod clock;
pub mod tick;

//! Error types for jig operations.
//!
//! `InvalidFormat` is the only error the core itself produces; the other
//! variants carry collaborator failures up to the polling loop.

use core::fmt;

/// Jig error type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JigError {
    /// Boot time is not `HH:MM:SS` or minutes/seconds are out of range
    InvalidFormat,

    /// Serial transport reported an error
    IoError,

    /// Display driver reported an error
    DisplayError,

    /// H-bridge driver failed to switch a half
    ActuatorError,
}

impl fmt::Display for JigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JigError::InvalidFormat => write!(f, "Invalid boot time"),
            JigError::IoError => write!(f, "I/O error"),
            JigError::DisplayError => write!(f, "Display error"),
            JigError::ActuatorError => write!(f, "Actuator error"),
        }
    }
}

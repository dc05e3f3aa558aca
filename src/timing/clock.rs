//! Tick-to-calendar conversion.
//!
//! All arithmetic is integer-only. The tick period `TIMER_DIV / E_CLOCK` is
//! applied as a quotient term plus a remainder term (`A = BQ + R`), so no
//! rounding error accumulates however long the jig runs. The remainder
//! product is widened to 64 bits; with a 4.096 ms tick a 32-bit product
//! would overflow after roughly 36 minutes.

use core::fmt;

use crate::config::JigConfig;

const MICROS_PER_SECOND: u64 = 1_000_000;
const MICROS_PER_TENTH: u32 = 100_000;

/// Whole seconds since midnight: elapsed ticks scaled by the tick period plus `boot_offset`.
pub fn seconds<C: JigConfig>(ticks: u32, boot_offset: u32) -> u32 {
    let e_clock = u64::from(C::CPU_E_CLOCK_HZ);
    let div = u64::from(C::TIMER_DIV);
    let ticks = u64::from(ticks);

    let elapsed = ticks * (div / e_clock) + (ticks * (div % e_clock)) / e_clock;
    (elapsed as u32).wrapping_add(boot_offset)
}

/// Microsecond position within the current second (`0..1_000_000`).
pub fn microseconds<C: JigConfig>(ticks: u32) -> u32 {
    let e_clock = u64::from(C::CPU_E_CLOCK_HZ);
    let per_tick = u64::from(C::TIMER_DIV) * MICROS_PER_SECOND;
    let ticks = u64::from(ticks);

    let micros = ticks * (per_tick / e_clock) + (ticks * (per_tick % e_clock)) / e_clock;
    (micros % MICROS_PER_SECOND) as u32
}

/// Tenths-of-second position within the current second (`0..=9`).
pub fn tenths<C: JigConfig>(ticks: u32) -> u32 {
    microseconds::<C>(ticks) / MICROS_PER_TENTH
}

/// Convert a tick snapshot into `(seconds_total, subsecond_tenths)`.
///
/// The two halves are computed independently from `ticks`; the tenths value
/// is the edge clock that paces the shutter.
pub fn to_calendar<C: JigConfig>(ticks: u32, boot_offset: u32) -> (u32, u32) {
    (seconds::<C>(ticks, boot_offset), tenths::<C>(ticks))
}

/// Hours, minutes and seconds derived from a seconds total.
///
/// Hours are not wrapped at 24: a boot offset of 25:00:00 shows as `25:00:00`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarTime {
    /// `seconds_total / 3600`
    pub hours: u32,
    /// `0..=59`
    pub minutes: u8,
    /// `0..=59`
    pub seconds: u8,
}

impl CalendarTime {
    /// Split `seconds_total` into hours, minutes and seconds.
    pub const fn from_seconds(seconds_total: u32) -> Self {
        Self {
            hours: seconds_total / 3600,
            minutes: ((seconds_total % 3600) / 60) as u8,
            seconds: (seconds_total % 60) as u8,
        }
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

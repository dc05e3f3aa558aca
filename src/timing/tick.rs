//! Interrupt-driven tick counter.
//!
//! The counter has exactly one writer, the periodic timer interrupt, and any
//! number of readers in the polling loop. Every access goes through a
//! critical section, so a read can never observe a half-updated value even on
//! cores that load a 32-bit word in several bus cycles.
//!
//! ```rust,ignore
//! static TICKS: TickCounter = TickCounter::new();
//!
//! #[interrupt]
//! fn RTI() {
//!     // SAFETY: interrupts are masked while the handler runs
//!     unsafe { TICKS.on_interrupt(&mut RtiFlag) };
//! }
//!
//! let now = TICKS.read_ticks();
//! ```

use core::cell::Cell;
use core::fmt;

use critical_section::{CriticalSection, Mutex};

use crate::hal::TimerAck;

/// Monotonic count of timer periods since start-up.
///
/// Wraps only after 2^32 periods (about 203 days at 4.096 ms).
pub struct TickCounter {
    count: Mutex<Cell<u32>>,
}

impl TickCounter {
    /// Counter starting at zero. `const` so it can live in a `static`.
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(Cell::new(0)),
        }
    }

    /// Timer interrupt body: count one period, then acknowledge the timer.
    ///
    /// Does not take the interrupt lock itself; it relies on the hardware
    /// having masked interrupts for the duration of the handler.
    ///
    /// # Safety
    ///
    /// Must only be called from the timer interrupt handler (or any other
    /// context in which interrupts are already disabled).
    pub unsafe fn on_interrupt<T: TimerAck>(&self, timer: &mut T) {
        // SAFETY: caller guarantees interrupts are masked.
        let cs = unsafe { CriticalSection::new() };
        self.increment(cs);
        timer.acknowledge();
    }

    /// Count one period from thread context (emulated timers, tests).
    pub fn tick(&self) {
        critical_section::with(|cs| self.increment(cs));
    }

    /// Torn-free snapshot of the counter.
    ///
    /// Interrupts are suppressed for a single load and the previous mask is
    /// restored afterwards, so this is safe to call with interrupts already
    /// disabled.
    pub fn read_ticks(&self) -> u32 {
        critical_section::with(|cs| self.count.borrow(cs).get())
    }

    fn increment(&self, cs: CriticalSection<'_>) {
        let count = self.count.borrow(cs);
        count.set(count.get().wrapping_add(1));
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TickCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickCounter")
            .field("count", &self.read_ticks())
            .finish()
    }
}

//! Configuration traits and implementations for timing and operator messages.
//!
//! The `JigConfig` trait allows compile-time configuration of the tick period,
//! actuator pulse widths and console strings without runtime overhead.

/// Jig configuration trait defining tick timing, pulse widths and messages.
///
/// All values are const (zero runtime cost). The tick period is
/// `TIMER_DIV / CPU_E_CLOCK_HZ` seconds; pulse widths are counted in
/// tenths of a second.
pub trait JigConfig {
    /// CPU E-clock frequency feeding the real-time interrupt (default: 2 MHz)
    const CPU_E_CLOCK_HZ: u32;

    /// E-clock cycles per tick (default: 8192, i.e. 4.096 ms)
    const TIMER_DIV: u32;

    /// Tenths of a second the bridge half stays energised (default: 1)
    const ON_TICKS: u8;

    /// Tenths of a second the bridge idles before a move counts as done (default: 3)
    const OFF_TICKS: u8;

    /// Banner shown on the serial line and on display line 1
    const BANNER: &'static str;

    /// Prompt printed when serial input arrives
    const MSG_BOOT_PROMPT: &'static str;

    /// Reply after a boot time was accepted
    const MSG_BOOT_SET: &'static str;

    /// Reply after a boot time was rejected (includes the format reminder)
    const MSG_BOOT_INVALID: &'static str;
}

/// Default configuration for the 68HC11 jig.
///
/// - CPU_E_CLOCK_HZ: 2 000 000
/// - TIMER_DIV: 8192 (4096 µs per tick)
/// - ON_TICKS: 1 (100 ms pulse)
/// - OFF_TICKS: 3 (300 ms dwell)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl JigConfig for DefaultConfig {
    const CPU_E_CLOCK_HZ: u32 = 2_000_000;
    const TIMER_DIV: u32 = 8192;
    const ON_TICKS: u8 = 1;
    const OFF_TICKS: u8 = 3;
    const BANNER: &'static str = "Hello, world!";
    const MSG_BOOT_PROMPT: &'static str = "\r\nBoot time ? ";
    const MSG_BOOT_SET: &'static str = "Boot time is set.\r\n";
    const MSG_BOOT_INVALID: &'static str = "Invalid boot time.\r\nFormat is: HH:MM:SS\r\n";
}

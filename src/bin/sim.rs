//! Host simulator for the shutter jig.
//!
//! Runs the real polling loop against an emulated 4.096 ms tick thread,
//! stdin/stdout as the serial line, an in-memory four-line display and a
//! scripted button timeline.
//!
//! Usage:
//!   shutter-jig-sim --open-at-ms 500 --close-at-ms 2500 --run-ms 4000
//!
//! Type a time such as `07:05:09` and press Enter to set the boot offset.
//! Set `RUST_LOG=debug` to see shutter phase transitions.

use std::io::{Read, Write as _};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;

use shutter_jig::config::{DefaultConfig, JigConfig};
use shutter_jig::hal::display::LINE_WIDTH;
use shutter_jig::{
    Actuator, BridgeCommand, ButtonInput, Buttons, Jig, Line, NoWatchdog, SerialIo, TextDisplay,
    TickCounter,
};

static TICKS: TickCounter = TickCounter::new();

#[derive(Parser, Debug)]
#[command(name = "shutter-jig-sim", version, about = "Run the shutter jig polling loop on a host")]
struct Args {
    /// Times (ms after start) at which the open button is pressed
    #[arg(long, value_delimiter = ',')]
    open_at_ms: Vec<u64>,

    /// Times (ms after start) at which the close button is pressed
    #[arg(long, value_delimiter = ',')]
    close_at_ms: Vec<u64>,

    /// Times (ms after start) at which the clear button is pressed
    #[arg(long, value_delimiter = ',')]
    clear_at_ms: Vec<u64>,

    /// How long each scripted press is held
    #[arg(long, default_value_t = 50)]
    hold_ms: u64,

    /// Total run time; the simulator exits afterwards
    #[arg(long, default_value_t = 5000)]
    run_ms: u64,
}

// ============================================================================
// Serial: stdin reader thread + stdout
// ============================================================================

struct StdioSerial {
    rx: Receiver<char>,
    peeked: Option<char>,
}

impl StdioSerial {
    fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut stdin = std::io::stdin();
            let mut byte = [0u8; 1];
            while let Ok(1) = stdin.read(&mut byte) {
                if tx.send(byte[0] as char).is_err() {
                    break;
                }
            }
        });
        Self { rx, peeked: None }
    }
}

impl SerialIo for StdioSerial {
    type Error = std::io::Error;

    fn data_pending(&mut self) -> Result<bool, Self::Error> {
        if self.peeked.is_none() {
            match self.rx.try_recv() {
                Ok(c) => self.peeked = Some(c),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
            }
        }
        Ok(self.peeked.is_some())
    }

    fn get_char(&mut self) -> Result<Option<char>, Self::Error> {
        if let Some(c) = self.peeked.take() {
            return Ok(Some(c));
        }
        match self.rx.recv_timeout(Duration::from_millis(1)) {
            Ok(c) => Ok(Some(c)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof))
            }
        }
    }

    fn put_char(&mut self, c: char) -> Result<(), Self::Error> {
        let mut buf = [0u8; 4];
        std::io::stdout().write_all(c.encode_utf8(&mut buf).as_bytes())
    }

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        std::io::stdout().write_all(s.as_bytes())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::stdout().flush()
    }
}

// ============================================================================
// Display: four 20-character lines in memory
// ============================================================================

struct MemoryDisplay {
    lines: [[u8; LINE_WIDTH]; 4],
    cursor: Option<(usize, usize)>,
    shown: [String; 4],
}

impl MemoryDisplay {
    fn new() -> Self {
        Self {
            lines: [[b' '; LINE_WIDTH]; 4],
            cursor: None,
            shown: Default::default(),
        }
    }

    /// Log lines 2 and 4 whenever their text changed.
    fn report(&mut self) {
        for idx in [1, 3] {
            let text = String::from_utf8_lossy(&self.lines[idx]).trim_end().to_string();
            if text != self.shown[idx] {
                info!("lcd{}: {}", idx + 1, text);
                self.shown[idx] = text;
            }
        }
    }
}

impl TextDisplay for MemoryDisplay {
    type Error = std::convert::Infallible;

    fn command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        if let Some((line, col)) = Line::locate(cmd) {
            self.cursor = Some((line.index(), col));
        } else if cmd == 0x01 {
            self.lines = [[b' '; LINE_WIDTH]; 4];
            self.cursor = Some((0, 0));
        }
        Ok(())
    }

    fn data(&mut self, byte: u8) -> Result<(), Self::Error> {
        if let Some((line, col)) = self.cursor.as_mut() {
            if *col < LINE_WIDTH {
                self.lines[*line][*col] = byte;
            }
            *col += 1;
        }
        Ok(())
    }

    fn is_busy(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

// ============================================================================
// Buttons and bridge
// ============================================================================

struct ScriptedButtons {
    start: Instant,
    open_at: Vec<u64>,
    close_at: Vec<u64>,
    clear_at: Vec<u64>,
    hold_ms: u64,
}

impl ScriptedButtons {
    fn held(&self, times: &[u64], now_ms: u64) -> bool {
        times.iter().any(|&t| now_ms >= t && now_ms < t + self.hold_ms)
    }
}

impl ButtonInput for ScriptedButtons {
    fn sample(&mut self) -> Buttons {
        let now_ms = self.start.elapsed().as_millis() as u64;
        let mut bits = 0;
        if self.held(&self.open_at, now_ms) {
            bits |= Buttons::OPEN;
        }
        if self.held(&self.close_at, now_ms) {
            bits |= Buttons::CLOSE;
        }
        if self.held(&self.clear_at, now_ms) {
            bits |= Buttons::CLEAR;
        }
        Buttons::from_bits(bits)
    }
}

struct LoggingBridge {
    start: Instant,
    last: Option<BridgeCommand>,
}

impl Actuator for LoggingBridge {
    type Error = std::convert::Infallible;

    fn command(&mut self, cmd: BridgeCommand) -> Result<(), Self::Error> {
        if self.last != Some(cmd) {
            info!("{:>6} ms bridge {:?}", self.start.elapsed().as_millis(), cmd);
            self.last = Some(cmd);
        }
        Ok(())
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let period_us = u64::from(DefaultConfig::TIMER_DIV) * 1_000_000
        / u64::from(DefaultConfig::CPU_E_CLOCK_HZ);
    thread::spawn(move || {
        let period = Duration::from_micros(period_us);
        let mut next = Instant::now() + period;
        loop {
            thread::sleep(next.saturating_duration_since(Instant::now()));
            TICKS.tick();
            next += period;
        }
    });

    let start = Instant::now();
    let buttons = ScriptedButtons {
        start,
        open_at: args.open_at_ms,
        close_at: args.close_at_ms,
        clear_at: args.clear_at_ms,
        hold_ms: args.hold_ms,
    };
    let bridge = LoggingBridge { start, last: None };

    let mut jig: Jig<'_, _, _, _, _, _, DefaultConfig> = Jig::new(
        &TICKS,
        StdioSerial::spawn(),
        MemoryDisplay::new(),
        buttons,
        bridge,
        NoWatchdog,
    );

    if let Err(e) = jig.start() {
        eprintln!("start failed: {}", e);
        std::process::exit(1);
    }

    let run_for = Duration::from_millis(args.run_ms);
    while start.elapsed() < run_for {
        if let Err(e) = jig.poll() {
            log::warn!("poll failed: {}", e);
        }
        jig.display_mut().report();
        thread::sleep(Duration::from_micros(200));
    }

    let (open, close) = jig.press_counts();
    println!();
    info!(
        "done: state {:?}, boot offset {} s, presses open {} close {}",
        jig.shutter().state(),
        jig.boot_offset(),
        open,
        close
    );
}

//! Serial sink for the `log` facade.
//!
//! Records go to COM1 as `[LEVEL] target: message`. The port is the only global the
//! kernel has; it sits behind a spin lock since `log` requires the logger to be `Sync`.

use bare_metal::cpu::io::com::{SerialPort, COM1_ADDR};
use core::fmt::{self, Write};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spinlock::Mutex;

pub static COM1: Mutex<SerialPort> = Mutex::new(unsafe { SerialPort::new(COM1_ADDR) });

struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            COM1.with_lock(|port| write_record(port, record).unwrap_or(()));
        }
    }

    fn flush(&self) {}
}

/// Program COM1 and install the serial logger.
///
/// Fails if a logger has already been installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    COM1.with_lock(|port| port.init());
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

fn write_record<W: Write>(out: &mut W, record: &Record) -> fmt::Result {
    write!(out, "[{:<5}] {}: {}\r\n", record.level(), record.target(), record.args())
}

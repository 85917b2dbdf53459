//! Provides an interface to the serial COM ports (16550 compatible UART, polled).

use core::fmt;

use super::{inb, outb, PortNumber};

/// The usual address of the COM1 port.
pub const COM1_ADDR: PortNumber = PortNumber(0x3F8);

// register offsets relative to the base port
const DATA: u16 = 0;
const INTERRUPT_ENABLE: u16 = 1;
const FIFO_CONTROL: u16 = 2;
const LINE_CONTROL: u16 = 3;
const MODEM_CONTROL: u16 = 4;
const LINE_STATUS: u16 = 5;

/// Line status bit: transmit holding register empty.
const LSR_TX_EMPTY: u8 = 1 << 5;
/// Line control bit: divisor latch access.
const LCR_DLAB: u8 = 1 << 7;

/// 115200 / 3 = 38400 baud
const BAUD_DIVISOR: u16 = 3;

/// A safe interface to a serial port identified by its base port number.
#[derive(Debug, Eq, PartialEq)]
pub struct SerialPort(PortNumber);

impl SerialPort {
    /// Creates a new handle to a serial port. This is unsafe for several reason:
    ///   1. some ports allow access to hardware that safe code shouldn't have
    ///   2. it would allow multiple threads to concurrently access the same port
    ///   3. is only safe to use with COM ports
    ///
    /// Therefore, the caller must make sure that writing to this port can do no harm (e.g. writing to COM1),
    /// must ensure that it won't instantiate the same port twice, and that the port number refers to a COM port.
    pub const unsafe fn new(port_number: PortNumber) -> SerialPort {
        SerialPort(port_number)
    }

    /// Program the UART for 38400 baud, 8 data bits, no parity, one stop bit,
    /// with interrupts off and FIFOs enabled.
    pub fn init(&mut self) {
        let base = self.0;
        unsafe {
            outb(base + INTERRUPT_ENABLE, 0x00);
            outb(base + LINE_CONTROL, LCR_DLAB);
            outb(base + DATA, (BAUD_DIVISOR & 0xFF) as u8);
            outb(base + INTERRUPT_ENABLE, (BAUD_DIVISOR >> 8) as u8);
            outb(base + LINE_CONTROL, 0x03);
            outb(base + FIFO_CONTROL, 0xC7);
            outb(base + MODEM_CONTROL, 0x03);
        }
    }

    #[inline]
    pub fn write(&mut self, data: &[u8]) {
        for byte in data {
            self.write_byte(*byte);
        }
    }

    #[inline]
    pub fn write_byte(&mut self, data: u8) {
        unsafe {
            while inb(self.0 + LINE_STATUS) & LSR_TX_EMPTY == 0 {}
            outb(self.0 + DATA, data);
        }
    }
}

impl fmt::Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s.as_bytes());
        Ok(())
    }
}

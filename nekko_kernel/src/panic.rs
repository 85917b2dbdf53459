//! Last resort: report the panic on screen and on COM1, then stop the machine.

use core::fmt::Write;
use core::panic::PanicInfo;

use bare_metal::cpu;
use bare_metal::cpu::io::com::{SerialPort, COM1_ADDR};
use bare_metal::DirectMapping;

use crate::console::Console;
use crate::logger;
use crate::vga::{self, Color, ColorCode, VgaMem};

#[panic_handler]
fn panic(panic_info: &PanicInfo) -> ! {
    // The boot sequence owns the console, so take over the screen with a fresh one.
    // System is FUBAR anyway.
    let vga_addr = DirectMapping::identity().phys_to_virt(vga::VGA_PHYS_ADDR);
    let vgabuf = unsafe { VgaMem::from_addr(vga_addr) };
    let mut console = Console::with_color(vgabuf, ColorCode::new(Color::White, Color::Red));
    writeln!(console, "{}", panic_info).unwrap_or(());

    // If the panic happened while logging, the port is still locked. Write to it directly then.
    match logger::COM1.try_lock() {
        Some(mut com1) => writeln!(com1, "{}", panic_info).unwrap_or(()),
        None => {
            let mut com1 = unsafe { SerialPort::new(COM1_ADDR) };
            writeln!(com1, "{}", panic_info).unwrap_or(());
        }
    }

    unsafe { cpu::halt() }
}

//! Module responsible for displaying diagnostic messages on startup.

use core::fmt::{self, Write};

use bare_metal::DirectMapping;
use multiboot::{MemoryMap, MultibootInfo};

use crate::cmdline;
use crate::config::BootConfig;
use crate::console::Console;

/// One line about the loader and the flags it set, plus the command line in verbose mode.
/// Everything else goes to the log.
pub fn print_boot_info(console: &mut Console, info: &MultibootInfo, mapping: &DirectMapping, config: &BootConfig) {
    match info.boot_loader_name(mapping) {
        Some(name) => {
            console.write(b"Boot loader: ");
            console.write(name);
            console.write(b" (flags ");
            console.write_hex(info.raw_flags());
            console.write(b")\n");
        },
        None => {
            console.write(b"Boot flags: ");
            console.write_hex(info.raw_flags());
            console.write(b"\n");
        }
    }

    if let Some(cmdline) = info.cmdline(mapping) {
        info!("command line: {:?}", cmdline::as_text(cmdline));
        if config.verbose {
            console.write(b"Command line: ");
            console.write(cmdline);
            console.write(b"\n");
        }
    }

    if let Some(device) = info.boot_device() {
        debug!("boot device: drive {:#04x}, partitions {:?}", device.drive, device.partition);
    }

    if let Some(modules) = info.modules(mapping) {
        info!("{} boot modules", modules.len());
        for module in modules {
            debug!("module {:p}..{:p} {:?}", module.start(), module.end(), cmdline::as_text(module.cmdline()));
        }
    }

    if let Some(fb) = info.framebuffer() {
        debug!("framebuffer {:p}: {}x{}x{} {:?}", fb.addr, fb.width, fb.height, fb.bpp, fb.kind);
    }
}

/// Print the memory map as a table with one line per region.
pub fn print_memory_map(console: &mut Console, map: &MemoryMap) {
    write_memory_map(console, map).unwrap_or(());
}

fn write_memory_map(console: &mut Console, map: &MemoryMap) -> fmt::Result {
    writeln!(console, "Memory map:")?;
    writeln!(console, "{: ^4} {: ^18} {: ^18} {}", "Type", "Base", "Length", "Description")?;
    for e in map.entries() {
        writeln!(console, "{: ^4} {:#018x} {:#018x} {}",
            e.entry_type().code() as char, e.base_addr().0, e.length(), e.entry_type().description())?;
    }
    writeln!(console, " Available: {} MiB", map.available_bytes() / 1024 / 1024)
}

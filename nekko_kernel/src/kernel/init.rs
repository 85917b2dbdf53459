//! Subsystem initialization steps of the boot sequence.
//!
//! Only the memory step does real work so far, by reporting what the loader found.
//! Descriptor tables and interrupt handlers are announced but left as the loader set them up,
//! with interrupts disabled.

use bare_metal::DirectMapping;
use multiboot::MultibootInfo;

use super::diagnostics;
use crate::config::BootConfig;
use crate::console::Console;

pub fn memory(console: &mut Console, info: &MultibootInfo, mapping: &DirectMapping, config: &BootConfig) {
    console.write(b"Initializing memory management...\n");

    match info.memory() {
        Some(sizes) => {
            console.write(b"Memory: Lower = ");
            console.write_dec(sizes.lower_kb);
            console.write(b"KB, Upper = ");
            console.write_dec(sizes.upper_kb);
            console.write(b"KB\n");

            let total = info.total_conventional_memory_kb();
            console.write(b"Total conventional memory: ");
            console.write_dec(total);
            console.write(b"KB (");
            console.write_dec(total / 1024);
            console.write(b"MB)\n");
            info!("conventional memory: {} KiB", total);
        },
        None => warn!("boot loader did not report memory sizes"),
    }

    if let Some(map) = info.memory_map(mapping) {
        info!("memory map: {} entries, {} bytes available", map.entries().count(), map.available_bytes());
        for entry in map.entries() {
            debug!("{:p} {:#x} {:?}", entry.base_addr(), entry.length(), entry.entry_type());
        }
        if config.verbose {
            diagnostics::print_memory_map(console, &map);
        }
    }

    console.write(b"Memory management initialized.\n");
}

pub fn gdt(console: &mut Console) {
    console.write(b"Initializing Global Descriptor Table...\n");
    debug!("keeping the flat segments of the boot loader");
    console.write(b"GDT initialized.\n");
}

pub fn idt(console: &mut Console) {
    console.write(b"Initializing Interrupt Descriptor Table...\n");
    debug!("no interrupt descriptor table installed");
    console.write(b"IDT initialized.\n");
}

pub fn interrupts(console: &mut Console) {
    console.write(b"Initializing interrupt handlers...\n");
    debug!("interrupts stay disabled");
    console.write(b"Interrupts initialized.\n");
}

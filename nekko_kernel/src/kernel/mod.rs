//! Parts that are specific to this kernel and cannot be easily reused.
//!
//! The boot sequence runs once, from the hand-off by the loader until the CPU is parked:
//!
//! ```text
//! Booting -> Verifying -> Halted
//!                      -> RunningInit -> Idle
//! ```
//!
//! `boot` performs everything up to the terminal state and returns it, so that it can run
//! against a host buffer in tests. Only `main` actually parks the CPU.

mod diagnostics;
mod init;

use core::fmt;

use bare_metal::{DirectMapping, PhysAddr32};
use multiboot::{MultibootInfo, BOOTLOADER_MAGIC};

use crate::config::BootConfig;
use crate::console::Console;
use crate::vga::{Color, ColorCode};

const BANNER: Color = Color::LightGreen;
const NORMAL: Color = Color::White;
const FAILURE: Color = Color::LightRed;
const READY: Color = Color::Yellow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    Booting,
    Verifying,
    /// The hand-off was rejected, the CPU stops for good.
    Halted,
    RunningInit,
    /// Initialization finished, the CPU idles waiting for interrupts.
    Idle,
}

impl BootState {
    pub fn is_terminal(self) -> bool {
        match self {
            BootState::Halted | BootState::Idle => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// EAX did not hold the value a multiboot loader leaves there.
    InvalidMagic { expected: u32, actual: u32 },
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BootError::InvalidMagic { expected, actual } => {
                write!(f, "invalid multiboot magic: expected {:#010X}, got {:#010X}", expected, actual)
            },
        }
    }
}

/// The registers the loader hands over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handoff {
    /// EAX
    pub magic: u32,
    /// EBX, only meaningful if `magic` is right.
    pub info_addr: PhysAddr32,
}

impl Handoff {
    /// Check the magic, yielding the address of the boot information if it matches.
    pub fn verify(&self) -> Result<PhysAddr32, BootError> {
        if self.magic == BOOTLOADER_MAGIC {
            Ok(self.info_addr)
        } else {
            Err(BootError::InvalidMagic {
                expected: BOOTLOADER_MAGIC,
                actual: self.magic,
            })
        }
    }
}

fn enter(state: BootState) -> BootState {
    debug!("boot state {:?}", state);
    state
}

/// Run the boot sequence on `console` and return the terminal state.
///
/// # Safety
///
/// If `handoff.magic` is the loader magic, `handoff.info_addr` must be the address of a valid
/// boot information record under `mapping`, including everything its flags point to.
pub unsafe fn boot(console: &mut Console, handoff: &Handoff, mapping: &DirectMapping) -> BootState {
    enter(BootState::Booting);
    console.set_color(ColorCode::new(BANNER, Color::Black));
    console.write(b"nekkoOS Kernel v0.1\n");
    console.write(b"==================\n\n");

    enter(BootState::Verifying);
    let info_addr = match handoff.verify() {
        Ok(info_addr) => info_addr,
        Err(err) => {
            error!("{}", err);
            report_error(console, &err);
            console.write(b"System halted.\n");
            return enter(BootState::Halted);
        }
    };
    console.set_color(ColorCode::new(NORMAL, Color::Black));
    console.write(b"Multiboot magic verified.\n");

    let info = MultibootInfo::from_addr(mapping.phys_to_virt(info_addr.extend()));
    let config = BootConfig::from_info(info, mapping);
    log::set_max_level(config.log_level);
    info!("boot information at {:p}: {:?}", info_addr, info);
    diagnostics::print_boot_info(console, info, mapping, &config);

    enter(BootState::RunningInit);
    console.write(b"\nInitializing kernel subsystems...\n");
    console.write(b"==================================\n");
    init::memory(console, info, mapping, &config);
    init::gdt(console);
    init::idt(console);
    init::interrupts(console);

    console.set_color(ColorCode::new(BANNER, Color::Black));
    console.write(b"\nKernel initialization complete!\n");
    console.write(b"===============================\n");
    console.set_color(ColorCode::new(READY, Color::Black));
    console.write(b"\nSystem ready. Entering idle loop...\n");
    console.set_color(ColorCode::default());
    enter(BootState::Idle)
}

fn report_error(console: &mut Console, err: &BootError) {
    console.set_color(ColorCode::new(FAILURE, Color::Black));
    match *err {
        BootError::InvalidMagic { expected, actual } => {
            console.write(b"ERROR: Invalid multiboot magic number!\n");
            console.write(b"Expected: ");
            console.write_hex(expected);
            console.write(b", Got: ");
            console.write_hex(actual);
            console.write(b"\n");
        },
    }
}

/// Entry point after the boot stub: set up logging and the screen, boot, and park the CPU.
#[cfg(not(test))]
pub fn main(handoff: Handoff) -> ! {
    use bare_metal::cpu;
    use crate::logger;
    use crate::vga::{self, VgaMem};

    // the loader leaves paging off
    let mapping = DirectMapping::identity();

    // only fails if a logger is already installed, which nothing else does
    logger::init(log::LevelFilter::Info).unwrap_or(());
    info!("nekkoOS starting, magic {:#010X}, info at {:p}", handoff.magic, handoff.info_addr);

    let vga_addr = mapping.phys_to_virt(vga::VGA_PHYS_ADDR);
    let mut console = Console::new(unsafe { VgaMem::from_addr(vga_addr) });

    match unsafe { boot(&mut console, &handoff, &mapping) } {
        BootState::Idle => {
            info!("idle");
            unsafe { cpu::hang() }
        },
        state => {
            error!("system halted in state {:?}", state);
            unsafe { cpu::halt() }
        },
    }
}

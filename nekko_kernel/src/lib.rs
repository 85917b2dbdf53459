#![cfg_attr(not(test), no_std)]
//! The nekkoOS kernel: takes over from a multiboot loader, reports what it found on the
//! VGA text console and parks the CPU.

#[macro_use]
extern crate log;
#[macro_use]
extern crate static_assertions;

pub mod cmdline;
pub mod config;
pub mod console;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod logger;
pub mod vga;

mod kernel;
#[cfg(not(test))]
mod panic;

pub use self::kernel::{boot, BootError, BootState, Handoff};

/// This is the Rust entry point that is called by the assembly boot code
/// with the registers the loader handed over.
#[cfg(not(test))]
#[no_mangle]
pub extern "C" fn kernel_main(magic: u32, info_addr: bare_metal::PhysAddr32) -> ! {
    kernel::main(Handoff { magic, info_addr })
}

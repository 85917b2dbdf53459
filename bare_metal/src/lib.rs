#![cfg_attr(not(test), no_std)]

mod align;
mod addr;
mod mapping;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod cpu;

pub use self::align::*;
pub use self::addr::*;
pub use self::mapping::*;

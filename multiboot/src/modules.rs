//! Boot modules loaded alongside the kernel image.

use bare_metal::{DirectMapping, PhysAddr32, VirtAddr};

use core::iter::{FusedIterator, Iterator};
use core::mem;
use core::ptr;

use super::raw;
use super::strings;

/// A module the boot loader placed in physical memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module<'a> {
    start: PhysAddr32,
    end: PhysAddr32,
    cmdline: &'a [u8],
}

impl<'a> Module<'a> {
    /// Physical address where the module begins.
    pub fn start(&self) -> PhysAddr32 {
        self.start
    }

    /// Physical address where the module ends (not included).
    pub fn end(&self) -> PhysAddr32 {
        self.end
    }

    pub fn len(&self) -> u32 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The command line the module was loaded with, empty if there is none.
    pub fn cmdline(&self) -> &'a [u8] {
        self.cmdline
    }
}

/// An iterator over the module list. Construct using `MultibootInfo::modules`.
pub struct Modules<'a> {
    current: VirtAddr,
    remaining: u32,
    mapping: &'a DirectMapping,
}

impl<'a> Modules<'a> {
    /// # Safety
    ///
    /// `count` module entries must be readable at `start`, and their command lines
    /// must be valid strings under `mapping`.
    pub(crate) unsafe fn new(start: VirtAddr, count: u32, mapping: &'a DirectMapping) -> Modules<'a> {
        Modules {
            current: start,
            remaining: count,
            mapping,
        }
    }
}

impl<'a> Iterator for Modules<'a> {
    type Item = Module<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        unsafe {
            let entry = ptr::read_unaligned(self.current.as_ptr::<raw::ModuleEntry>());
            self.current += mem::size_of::<raw::ModuleEntry>();
            let cmdline = if entry.cmdline == 0 {
                &[][..]
            } else {
                strings::c_str_at(self.mapping.phys_to_virt(PhysAddr32(entry.cmdline).extend()))
            };
            Some(Module {
                start: PhysAddr32(entry.mod_start),
                end: PhysAddr32(entry.mod_end),
                cmdline,
            })
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl<'a> ExactSizeIterator for Modules<'a> {}

impl<'a> FusedIterator for Modules<'a> {}

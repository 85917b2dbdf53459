//! Parser for the memory map handed over by the boot loader.
//!
//! The map is a buffer of `mmap_length` bytes holding records back to back.
//! Every record starts with its size, which does not count the size field
//! itself, so the next record starts `size + 4` bytes after the current one.

use bare_metal::{PhysAddr, VirtAddr};

use core::fmt;
use core::iter::{FusedIterator, Iterator};
use core::mem;
use core::ptr;

use super::raw;

/// Bytes of a record that follow the size field and that we interpret.
const ENTRY_BODY_SIZE: usize = mem::size_of::<raw::MemoryMapEntry>() - mem::size_of::<u32>();

#[derive(Debug, Clone)]
pub struct MemoryMap {
    start: VirtAddr,
    length: usize,
}

impl MemoryMap {
    /// Wrap the memory map buffer of `length` bytes starting at `start`.
    ///
    /// # Safety
    ///
    /// The whole buffer must be readable for as long as the map or its iterators are used.
    pub unsafe fn from_virt(start: VirtAddr, length: usize) -> MemoryMap {
        MemoryMap { start, length }
    }

    /// Size of the buffer in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Iterate over the entries. Each call starts over at the beginning of the buffer.
    pub fn entries(&self) -> Entries {
        Entries {
            current: self.start,
            end: self.start + self.length,
        }
    }

    /// Sum of the lengths of all regions that are available to the OS.
    pub fn available_bytes(&self) -> u64 {
        self.entries()
            .filter(|e| e.is_available())
            .map(|e| e.length())
            .fold(0, u64::wrapping_add)
    }
}

/// An iterator over the entries of a memory map.
///
/// Records too short to describe a region are skipped. It stops at the first record that
/// would not fit into the buffer, so it never reads past the buffer even if the loader got
/// the sizes wrong.
pub struct Entries {
    current: VirtAddr,
    end: VirtAddr,
}

impl Iterator for Entries {
    type Item = MemoryMapEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            debug_assert!(self.current <= self.end);
            let remaining = self.end.0 - self.current.0;
            if remaining < mem::size_of::<u32>() {
                self.current = self.end;
                return None;
            }

            let start = self.current;
            let size = unsafe { ptr::read_unaligned(start.as_ptr::<u32>()) } as usize;
            let record_size = size.saturating_add(mem::size_of::<u32>());
            if record_size > remaining {
                self.current = self.end;
                return None;
            }
            self.current += record_size;

            // too short to describe a region
            if size < ENTRY_BODY_SIZE {
                continue;
            }
            let entry = unsafe { ptr::read_unaligned(start.as_ptr::<raw::MemoryMapEntry>()) };
            return Some(MemoryMapEntry::from_raw(entry));
        }
    }
}

impl FusedIterator for Entries {}

/// The type of an entry in the memory map.
#[derive(PartialEq, Eq, Copy, Clone)]
pub struct EntryType(u32);

impl EntryType {
    pub const AVAILABLE: EntryType = EntryType(1);
    pub const RESERVED: EntryType = EntryType(2);
    pub const ACPI_RECLAIMABLE: EntryType = EntryType(3);
    pub const NVS: EntryType = EntryType(4);
    pub const BADRAM: EntryType = EntryType(5);

    pub fn from_raw(value: u32) -> EntryType {
        EntryType(value)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    /// Human readable name. Unknown types are reserved memory.
    pub fn description(self) -> &'static str {
        match self.0 {
            1 => "Available",
            3 => "ACPI reclaimable",
            4 => "ACPI NVS",
            5 => "Bad RAM",
            _ => "Reserved",
        }
    }

    /// Single character tag for compact tables.
    pub fn code(self) -> u8 {
        match self.0 {
            1 => b'A',
            3 => b'C',
            4 => b'N',
            5 => b'X',
            _ => b'R',
        }
    }
}

impl fmt::Debug for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EntryType({} ~ {})", self.0, self.description())
    }
}

/// A region of physical memory as described by one memory map record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryMapEntry {
    size: u32,
    base_addr: PhysAddr,
    length: u64,
    entry_type: EntryType,
}

impl MemoryMapEntry {
    fn from_raw(entry: raw::MemoryMapEntry) -> MemoryMapEntry {
        MemoryMapEntry {
            size: entry.size,
            base_addr: PhysAddr(entry.addr),
            length: entry.len,
            entry_type: EntryType(entry.entry_type),
        }
    }

    /// Return whether the memory range described by this entry is available to the OS.
    pub fn is_available(&self) -> bool {
        self.entry_type == EntryType::AVAILABLE
    }

    pub fn base_addr(&self) -> PhysAddr {
        self.base_addr
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// The size field of the record, which excludes the field itself.
    pub fn size(&self) -> u32 {
        self.size
    }
}

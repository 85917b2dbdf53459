#![cfg_attr(not(test), no_std)]
//! Parser for the Multiboot information record provided by the boot loader.
//!
//! The record itself is a fixed layout structure. Apart from the flags word, a field
//! may only be interpreted if the flag bit governing it is set, so every optional
//! field is exposed through an accessor returning `Option`.
//!
//! Several fields are physical addresses of further loader data (memory map, module
//! list, strings). Those are translated with a `DirectMapping` supplied by the caller.
//!
//! The safety of this parser depends on the bootloader being multiboot compliant.
//! If the bootloader provides bogus data, trying to parse it using this structures
//! likely ends in sadness.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate static_assertions;

use bare_metal::{DirectMapping, PhysAddr, PhysAddr32, VirtAddr};

use core::fmt;
use core::ptr;

pub mod memmap;
pub mod modules;
pub mod raw;
pub mod strings;

pub use self::memmap::{MemoryMap, MemoryMapEntry, EntryType};
pub use self::modules::{Module, Modules};

/// Value the boot loader leaves in EAX when it hands over control.
pub const BOOTLOADER_MAGIC: u32 = 0x2BADB002;

/// Value identifying the header embedded in the kernel image.
pub const HEADER_MAGIC: u32 = 0x1BADB002;

bitflags! {
    /// Requests the kernel makes to the boot loader in its header.
    ///
    /// The header itself is emitted by the assembly boot stub (`bootcode/boot.asm` in the
    /// kernel crate), which cannot use these constants. They mirror its `MB_*` values so the
    /// kernel's tests can check the stub against them.
    pub struct HeaderFlags: u32 {
        /// Align boot modules on 4 KiB boundaries.
        const PAGE_ALIGN = 1 << 0;
        /// Provide the memory fields and the memory map.
        const MEMORY_INFO = 1 << 1;
        /// Provide the video mode table.
        const VIDEO_MODE = 1 << 2;
        /// Use the load addresses in the header instead of the ELF headers.
        const AOUT_KLUDGE = 1 << 16;
    }
}

bitflags! {
    /// Which parts of the information record the boot loader filled in.
    pub struct InfoFlags: u32 {
        const MEMORY = 1 << 0;
        const BOOT_DEVICE = 1 << 1;
        const CMDLINE = 1 << 2;
        const MODULES = 1 << 3;
        const AOUT_SYMBOLS = 1 << 4;
        const ELF_SECTIONS = 1 << 5;
        const MEMORY_MAP = 1 << 6;
        const DRIVES = 1 << 7;
        const CONFIG_TABLE = 1 << 8;
        const BOOT_LOADER_NAME = 1 << 9;
        const APM_TABLE = 1 << 10;
        const VBE = 1 << 11;
        const FRAMEBUFFER = 1 << 12;
    }
}

/// Host side model of the header in the boot stub, used to verify its flags and checksum.
impl raw::Header {
    /// Build a header whose checksum makes magic, flags and checksum sum up to zero.
    pub const fn new(flags: u32) -> raw::Header {
        raw::Header {
            magic: HEADER_MAGIC,
            flags,
            checksum: 0_u32.wrapping_sub(HEADER_MAGIC).wrapping_sub(flags),
        }
    }

    /// Whether the header would be accepted by a loader.
    pub fn is_valid(&self) -> bool {
        self.magic == HEADER_MAGIC
            && self.magic.wrapping_add(self.flags).wrapping_add(self.checksum) == 0
    }
}

/// Lower and upper memory as reported by the BIOS, in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySizes {
    /// Memory below 1 MiB, at most 640.
    pub lower_kb: u32,
    /// Memory above 1 MiB up to the first hole.
    pub upper_kb: u32,
}

impl MemorySizes {
    pub fn total_kb(&self) -> u32 {
        self.lower_kb.wrapping_add(self.upper_kb)
    }
}

/// BIOS drive and partitions the kernel image was loaded from. `0xFF` marks an unused partition level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootDevice {
    pub drive: u8,
    pub partition: [u8; 3],
}

impl BootDevice {
    fn from_raw(value: u32) -> BootDevice {
        BootDevice {
            drive: (value >> 24) as u8,
            partition: [(value >> 16) as u8, (value >> 8) as u8, value as u8],
        }
    }
}

/// Symbol information of the kernel image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbols {
    AOut(raw::AOutSymbols),
    Elf(raw::ElfSections),
}

/// Location of the BIOS drive structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drives {
    pub addr: PhysAddr32,
    pub length: u32,
}

/// VESA BIOS extension information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VbeInfo {
    pub control_info: PhysAddr32,
    pub mode_info: PhysAddr32,
    pub mode: u16,
    pub interface_seg: u16,
    pub interface_off: u16,
    pub interface_len: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferKind {
    Indexed { palette: PhysAddr32, num_colors: u16 },
    Rgb(raw::RgbFields),
    EgaText,
    Unknown(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferInfo {
    pub addr: PhysAddr,
    pub pitch: u32,
    pub width: u32,
    pub height: u32,
    pub bpp: u8,
    pub kind: FramebufferKind,
}

/// Copy of the APM table the loader points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApmTable {
    pub version: u16,
    pub cseg: u16,
    pub offset: u32,
    pub cseg_16: u16,
    pub dseg: u16,
    pub flags: u16,
    pub cseg_len: u16,
    pub cseg_16_len: u16,
    pub dseg_len: u16,
}

/// Read-only view of the boot information record.
#[repr(transparent)]
pub struct MultibootInfo(raw::Info);

impl MultibootInfo {
    /// Interpret the memory at `addr` as the information record.
    ///
    /// # Safety
    ///
    /// `addr` must point to a record written by a multiboot compliant loader, and every
    /// address in a field whose flag is set must be valid under the mappings later passed
    /// to the accessors. Care must be taken not to overwrite that memory while the
    /// returned reference is alive.
    pub unsafe fn from_addr<'a>(addr: VirtAddr) -> &'a MultibootInfo {
        &*addr.as_ptr::<MultibootInfo>()
    }

    /// Wrap a record that was constructed elsewhere.
    ///
    /// # Safety
    ///
    /// Same as `from_addr`: addresses in flagged fields must be valid under the mappings
    /// later passed to the accessors.
    pub unsafe fn from_raw(raw: raw::Info) -> MultibootInfo {
        MultibootInfo(raw)
    }

    /// The raw flags word, including bits this parser does not know.
    pub fn raw_flags(&self) -> u32 {
        self.0.flags
    }

    pub fn flags(&self) -> InfoFlags {
        InfoFlags::from_bits_truncate(self.0.flags)
    }

    /// Whether all bits of `flag` are set, i.e. whether the fields it governs may be read.
    pub fn has_flag(&self, flag: InfoFlags) -> bool {
        self.flags().contains(flag)
    }

    /// Lower and upper memory size.
    pub fn memory(&self) -> Option<MemorySizes> {
        if !self.has_flag(InfoFlags::MEMORY) {
            return None;
        }
        Some(MemorySizes {
            lower_kb: self.0.mem_lower,
            upper_kb: self.0.mem_upper,
        })
    }

    /// Lower plus upper memory in KiB.
    ///
    /// This does not check `InfoFlags::MEMORY`; the caller must, otherwise the result is meaningless.
    pub fn total_conventional_memory_kb(&self) -> u32 {
        let (lower, upper) = (self.0.mem_lower, self.0.mem_upper);
        lower.wrapping_add(upper)
    }

    pub fn boot_device(&self) -> Option<BootDevice> {
        if !self.has_flag(InfoFlags::BOOT_DEVICE) {
            return None;
        }
        Some(BootDevice::from_raw(self.0.boot_device))
    }

    /// The kernel command line.
    pub fn cmdline(&self, mapping: &DirectMapping) -> Option<&[u8]> {
        if !self.has_flag(InfoFlags::CMDLINE) {
            return None;
        }
        Some(unsafe { self.string_at(self.0.cmdline, mapping) })
    }

    pub fn modules<'a>(&'a self, mapping: &'a DirectMapping) -> Option<Modules<'a>> {
        if !self.has_flag(InfoFlags::MODULES) {
            return None;
        }
        let start = mapping.phys_to_virt(PhysAddr32(self.0.mods_addr).extend());
        Some(unsafe { Modules::new(start, self.0.mods_count, mapping) })
    }

    /// Symbol table or section headers. The two are mutually exclusive,
    /// a record claiming both yields `None`.
    pub fn symbols(&self) -> Option<Symbols> {
        let syms = self.0.syms;
        match (self.has_flag(InfoFlags::AOUT_SYMBOLS), self.has_flag(InfoFlags::ELF_SECTIONS)) {
            (true, false) => Some(Symbols::AOut(unsafe { syms.aout })),
            (false, true) => Some(Symbols::Elf(unsafe { syms.elf })),
            _ => None,
        }
    }

    pub fn memory_map(&self, mapping: &DirectMapping) -> Option<MemoryMap> {
        if !self.has_flag(InfoFlags::MEMORY_MAP) {
            return None;
        }
        let start = mapping.phys_to_virt(PhysAddr32(self.0.mmap_addr).extend());
        Some(unsafe { MemoryMap::from_virt(start, self.0.mmap_length as usize) })
    }

    pub fn drives(&self) -> Option<Drives> {
        if !self.has_flag(InfoFlags::DRIVES) {
            return None;
        }
        Some(Drives {
            addr: PhysAddr32(self.0.drives_addr),
            length: self.0.drives_length,
        })
    }

    /// Address of the BIOS configuration table.
    pub fn config_table(&self) -> Option<PhysAddr32> {
        if !self.has_flag(InfoFlags::CONFIG_TABLE) {
            return None;
        }
        Some(PhysAddr32(self.0.config_table))
    }

    pub fn boot_loader_name(&self, mapping: &DirectMapping) -> Option<&[u8]> {
        if !self.has_flag(InfoFlags::BOOT_LOADER_NAME) {
            return None;
        }
        Some(unsafe { self.string_at(self.0.boot_loader_name, mapping) })
    }

    pub fn apm_table(&self, mapping: &DirectMapping) -> Option<ApmTable> {
        if !self.has_flag(InfoFlags::APM_TABLE) {
            return None;
        }
        let addr = mapping.phys_to_virt(PhysAddr32(self.0.apm_table).extend());
        let apm = unsafe { ptr::read_unaligned(addr.as_ptr::<raw::ApmTable>()) };
        Some(ApmTable {
            version: apm.version,
            cseg: apm.cseg,
            offset: apm.offset,
            cseg_16: apm.cseg_16,
            dseg: apm.dseg,
            flags: apm.flags,
            cseg_len: apm.cseg_len,
            cseg_16_len: apm.cseg_16_len,
            dseg_len: apm.dseg_len,
        })
    }

    pub fn vbe(&self) -> Option<VbeInfo> {
        if !self.has_flag(InfoFlags::VBE) {
            return None;
        }
        Some(VbeInfo {
            control_info: PhysAddr32(self.0.vbe_control_info),
            mode_info: PhysAddr32(self.0.vbe_mode_info),
            mode: self.0.vbe_mode,
            interface_seg: self.0.vbe_interface_seg,
            interface_off: self.0.vbe_interface_off,
            interface_len: self.0.vbe_interface_len,
        })
    }

    pub fn framebuffer(&self) -> Option<FramebufferInfo> {
        if !self.has_flag(InfoFlags::FRAMEBUFFER) {
            return None;
        }
        let color_info = self.0.color_info;
        let kind = match self.0.framebuffer_type {
            0 => {
                let palette = unsafe { color_info.palette };
                FramebufferKind::Indexed {
                    palette: PhysAddr32(palette.addr),
                    num_colors: palette.num_colors,
                }
            },
            1 => FramebufferKind::Rgb(unsafe { color_info.rgb }),
            2 => FramebufferKind::EgaText,
            other => FramebufferKind::Unknown(other),
        };
        Some(FramebufferInfo {
            addr: PhysAddr(self.0.framebuffer_addr),
            pitch: self.0.framebuffer_pitch,
            width: self.0.framebuffer_width,
            height: self.0.framebuffer_height,
            bpp: self.0.framebuffer_bpp,
            kind,
        })
    }

    /// A zero address stands for an empty string.
    unsafe fn string_at(&self, addr: u32, mapping: &DirectMapping) -> &[u8] {
        if addr == 0 {
            &[]
        } else {
            strings::c_str_at(mapping.phys_to_virt(PhysAddr32(addr).extend()))
        }
    }
}

impl fmt::Debug for MultibootInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MultibootInfo")
            .field("flags", &self.flags())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::mem;

    /// Fake physical memory: a host buffer that pretends to live at `PHYS_BASE`.
    struct FakeMemory {
        bytes: Vec<u8>,
    }

    const PHYS_BASE: u32 = 0x10_0000;
    const INFO_OFFSET: usize = 0;
    const CMDLINE_OFFSET: usize = 0x100;
    const NAME_OFFSET: usize = 0x140;
    const APM_OFFSET: usize = 0x180;
    const MMAP_OFFSET: usize = 0x200;
    const MODS_OFFSET: usize = 0x300;
    const MOD_CMDLINE_OFFSET: usize = 0x380;

    impl FakeMemory {
        fn new() -> FakeMemory {
            FakeMemory { bytes: vec![0; 0x1000] }
        }

        fn mapping(&self) -> DirectMapping {
            DirectMapping::new(VirtAddr(self.bytes.as_ptr() as usize), PhysAddr(PHYS_BASE as u64), self.bytes.len() as u64)
        }

        fn put(&mut self, offset: usize, data: &[u8]) -> u32 {
            self.bytes[offset..offset + data.len()].copy_from_slice(data);
            PHYS_BASE + offset as u32
        }

        fn put_u32(&mut self, offset: usize, value: u32) {
            self.put(offset, &value.to_le_bytes());
        }

        fn info(&self) -> &MultibootInfo {
            unsafe { MultibootInfo::from_addr(VirtAddr(self.bytes.as_ptr() as usize + INFO_OFFSET)) }
        }
    }

    fn record(flags: InfoFlags) -> raw::Info {
        let mut info = raw::Info::zeroed();
        info.flags = flags.bits();
        info
    }

    #[test]
    fn has_flag_matches_bits() {
        for set in 0..13 {
            let info = unsafe { MultibootInfo::from_raw(record(InfoFlags::from_bits_truncate(1 << set))) };
            for bit in 0..13 {
                let flag = InfoFlags::from_bits_truncate(1 << bit);
                assert_eq!(info.has_flag(flag), bit == set, "set={} bit={}", set, bit);
            }
        }
        let info = unsafe { MultibootInfo::from_raw(record(InfoFlags::all())) };
        assert!(info.has_flag(InfoFlags::all()));
        assert_eq!(info.raw_flags(), 0x1FFF);
    }

    #[test]
    fn memory_sizes_are_gated() {
        let mut rec = record(InfoFlags::empty());
        rec.mem_lower = 640;
        rec.mem_upper = 65536;
        let info = unsafe { MultibootInfo::from_raw(rec) };
        assert_eq!(info.memory(), None);

        rec.flags = InfoFlags::MEMORY.bits();
        let info = unsafe { MultibootInfo::from_raw(rec) };
        assert_eq!(info.memory(), Some(MemorySizes { lower_kb: 640, upper_kb: 65536 }));
        assert_eq!(info.total_conventional_memory_kb(), 66176);
        assert_eq!(info.memory().map(|m| m.total_kb()), Some(66176));
    }

    #[test]
    fn field_offsets_match_the_wire_layout() {
        let mut phys = FakeMemory::new();
        let flags = InfoFlags::MEMORY | InfoFlags::BOOT_DEVICE | InfoFlags::DRIVES
            | InfoFlags::CONFIG_TABLE | InfoFlags::VBE | InfoFlags::FRAMEBUFFER;
        phys.put_u32(0, flags.bits());
        phys.put_u32(4, 639);
        phys.put_u32(8, 130048);
        phys.put_u32(12, 0x80FF_FFFF);
        phys.put_u32(52, 0x30);
        phys.put_u32(56, 0x9000);
        phys.put_u32(60, 0xF_0000);
        phys.put_u32(72, 0x8000);
        phys.put_u32(76, 0x8200);
        phys.put(80, &0x117_u16.to_le_bytes());
        phys.put(88, &0xFD00_0000_u64.to_le_bytes());
        phys.put_u32(96, 4096);
        phys.put_u32(100, 1024);
        phys.put_u32(104, 768);
        phys.put(108, &[32, 1, 16, 8, 8, 8, 0, 8]);

        let info = phys.info();
        assert_eq!(info.memory(), Some(MemorySizes { lower_kb: 639, upper_kb: 130048 }));
        assert_eq!(info.boot_device(), Some(BootDevice { drive: 0x80, partition: [0xFF; 3] }));
        assert_eq!(info.drives(), Some(Drives { addr: PhysAddr32(0x9000), length: 0x30 }));
        assert_eq!(info.config_table(), Some(PhysAddr32(0xF_0000)));
        let vbe = info.vbe().expect("vbe flag set");
        assert_eq!(vbe.mode_info, PhysAddr32(0x8200));
        assert_eq!(vbe.mode, 0x117);
        let fb = info.framebuffer().expect("framebuffer flag set");
        assert_eq!(fb.addr, PhysAddr(0xFD00_0000));
        assert_eq!((fb.pitch, fb.width, fb.height, fb.bpp), (4096, 1024, 768, 32));
        assert_eq!(fb.kind, FramebufferKind::Rgb(raw::RgbFields {
            red_position: 16, red_mask_size: 8,
            green_position: 8, green_mask_size: 8,
            blue_position: 0, blue_mask_size: 8,
        }));
        assert_eq!(info.symbols(), None);
        assert!(info.memory_map(&phys.mapping()).is_none());
    }

    #[test]
    fn symbols_select_union_variant() {
        let mut rec = record(InfoFlags::ELF_SECTIONS);
        rec.syms = raw::SymbolTable { elf: raw::ElfSections { num: 12, size: 40, addr: 0x20_0000, shndx: 11 } };
        let info = unsafe { MultibootInfo::from_raw(rec) };
        assert_eq!(info.symbols(), Some(Symbols::Elf(raw::ElfSections { num: 12, size: 40, addr: 0x20_0000, shndx: 11 })));

        rec.flags = InfoFlags::AOUT_SYMBOLS.bits();
        let info = unsafe { MultibootInfo::from_raw(rec) };
        assert!(matches!(info.symbols(), Some(Symbols::AOut(_))));

        rec.flags = (InfoFlags::AOUT_SYMBOLS | InfoFlags::ELF_SECTIONS).bits();
        let info = unsafe { MultibootInfo::from_raw(rec) };
        assert_eq!(info.symbols(), None);
    }

    #[test]
    fn strings_memory_map_and_modules() {
        let mut phys = FakeMemory::new();
        let cmdline = phys.put(CMDLINE_OFFSET, b"loglevel=debug verbose\0");
        let name = phys.put(NAME_OFFSET, b"GNU GRUB 0.97\0");
        let map = memmap::test::build_map(&[(0, 0x9FC00, 1), (0x100000, 0x7EE0000, 1), (0xFFFC0000, 0x40000, 2)], 0);
        let mmap = phys.put(MMAP_OFFSET, &map);
        let mod_cmdline = phys.put(MOD_CMDLINE_OFFSET, b"initrd\0");
        let mods = phys.put(MODS_OFFSET, &[0; 32]);
        phys.put_u32(MODS_OFFSET, 0x20_0000);
        phys.put_u32(MODS_OFFSET + 4, 0x20_8000);
        phys.put_u32(MODS_OFFSET + 8, mod_cmdline);
        phys.put_u32(MODS_OFFSET + 16, 0x30_0000);
        phys.put_u32(MODS_OFFSET + 20, 0x30_0000);

        let mut rec = record(InfoFlags::CMDLINE | InfoFlags::BOOT_LOADER_NAME | InfoFlags::MEMORY_MAP | InfoFlags::MODULES);
        rec.cmdline = cmdline;
        rec.boot_loader_name = name;
        rec.mmap_addr = mmap;
        rec.mmap_length = map.len() as u32;
        rec.mods_addr = mods;
        rec.mods_count = 2;
        let raw_bytes: [u8; mem::size_of::<raw::Info>()] = unsafe { mem::transmute(rec) };
        phys.put(INFO_OFFSET, &raw_bytes);

        let mapping = phys.mapping();
        let info = phys.info();
        assert_eq!(info.cmdline(&mapping), Some(&b"loglevel=debug verbose"[..]));
        assert_eq!(info.boot_loader_name(&mapping), Some(&b"GNU GRUB 0.97"[..]));

        let map = info.memory_map(&mapping).expect("memory map flag set");
        assert_eq!(map.entries().count(), 3);
        assert_eq!(map.available_bytes(), 0x9FC00 + 0x7EE0000);

        let modules: Vec<_> = info.modules(&mapping).expect("modules flag set").collect();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].start(), PhysAddr32(0x20_0000));
        assert_eq!(modules[0].len(), 0x8000);
        assert_eq!(modules[0].cmdline(), b"initrd");
        assert!(modules[1].is_empty());
        assert_eq!(modules[1].cmdline(), b"");
    }

    #[test]
    fn apm_table_is_copied() {
        let mut phys = FakeMemory::new();
        let mut apm = [0_u8; 20];
        apm[0..2].copy_from_slice(&0x0102_u16.to_le_bytes());
        apm[4..8].copy_from_slice(&0xABCD_u32.to_le_bytes());
        let apm_addr = phys.put(APM_OFFSET, &apm);
        let mut rec = record(InfoFlags::APM_TABLE);
        rec.apm_table = apm_addr;
        let info = unsafe { MultibootInfo::from_raw(rec) };
        let table = info.apm_table(&phys.mapping()).expect("apm flag set");
        assert_eq!(table.version, 0x0102);
        assert_eq!(table.offset, 0xABCD);
    }

    #[test]
    fn header_checksum() {
        let header = raw::Header::new((HeaderFlags::PAGE_ALIGN | HeaderFlags::MEMORY_INFO).bits());
        assert_eq!(header.flags, 3);
        assert_eq!(header.checksum, 0xE4524FFB);
        assert!(header.is_valid());
        assert!(!raw::Header { checksum: 0, ..header }.is_valid());
    }
}

//! Byte-exact layouts of the structures written by the boot loader.
//! Every struct is packed and read by copying, never by reference to a field.

/// The boot information record, 116 bytes.
#[repr(C, packed)]
#[derive(Clone, Copy)]
pub struct Info {
    pub flags: u32,
    pub mem_lower: u32,
    pub mem_upper: u32,
    pub boot_device: u32,
    pub cmdline: u32,
    pub mods_count: u32,
    pub mods_addr: u32,
    pub syms: SymbolTable,
    pub mmap_length: u32,
    pub mmap_addr: u32,
    pub drives_length: u32,
    pub drives_addr: u32,
    pub config_table: u32,
    pub boot_loader_name: u32,
    pub apm_table: u32,
    pub vbe_control_info: u32,
    pub vbe_mode_info: u32,
    pub vbe_mode: u16,
    pub vbe_interface_seg: u16,
    pub vbe_interface_off: u16,
    pub vbe_interface_len: u16,
    pub framebuffer_addr: u64,
    pub framebuffer_pitch: u32,
    pub framebuffer_width: u32,
    pub framebuffer_height: u32,
    pub framebuffer_bpp: u8,
    pub framebuffer_type: u8,
    pub color_info: ColorInfo,
}

impl Info {
    /// A record with no flags set and all fields zero.
    pub const fn zeroed() -> Info {
        Info {
            flags: 0,
            mem_lower: 0,
            mem_upper: 0,
            boot_device: 0,
            cmdline: 0,
            mods_count: 0,
            mods_addr: 0,
            syms: SymbolTable { aout: AOutSymbols { tabsize: 0, strsize: 0, addr: 0, reserved: 0 } },
            mmap_length: 0,
            mmap_addr: 0,
            drives_length: 0,
            drives_addr: 0,
            config_table: 0,
            boot_loader_name: 0,
            apm_table: 0,
            vbe_control_info: 0,
            vbe_mode_info: 0,
            vbe_mode: 0,
            vbe_interface_seg: 0,
            vbe_interface_off: 0,
            vbe_interface_len: 0,
            framebuffer_addr: 0,
            framebuffer_pitch: 0,
            framebuffer_width: 0,
            framebuffer_height: 0,
            framebuffer_bpp: 0,
            framebuffer_type: 0,
            color_info: ColorInfo { rgb: RgbFields { red_position: 0, red_mask_size: 0, green_position: 0, green_mask_size: 0, blue_position: 0, blue_mask_size: 0 } },
        }
    }
}

/// Bits 4 and 5 of the flags select which variant is valid.
#[repr(C)]
#[derive(Clone, Copy)]
pub union SymbolTable {
    pub aout: AOutSymbols,
    pub elf: ElfSections,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AOutSymbols {
    pub tabsize: u32,
    pub strsize: u32,
    pub addr: u32,
    pub reserved: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ElfSections {
    pub num: u32,
    pub size: u32,
    pub addr: u32,
    pub shndx: u32,
}

/// Selected by the framebuffer type: palette for indexed color, field layout for direct RGB.
#[repr(C)]
#[derive(Clone, Copy)]
pub union ColorInfo {
    pub palette: Palette,
    pub rgb: RgbFields,
}

#[repr(C, packed)]
#[derive(Clone, Copy)]
pub struct Palette {
    pub addr: u32,
    pub num_colors: u16,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RgbFields {
    pub red_position: u8,
    pub red_mask_size: u8,
    pub green_position: u8,
    pub green_mask_size: u8,
    pub blue_position: u8,
    pub blue_mask_size: u8,
}

/// One record of the memory map. `size` does not count itself.
#[repr(C, packed)]
#[derive(Clone, Copy)]
pub struct MemoryMapEntry {
    pub size: u32,
    pub addr: u64,
    pub len: u64,
    pub entry_type: u32,
}

/// One entry of the module list.
#[repr(C, packed)]
#[derive(Clone, Copy)]
pub struct ModuleEntry {
    pub mod_start: u32,
    pub mod_end: u32,
    pub cmdline: u32,
    pub pad: u32,
}

/// Advanced Power Management table.
#[repr(C, packed)]
#[derive(Clone, Copy)]
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

/// The header the kernel image carries so that the loader recognizes it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    pub magic: u32,
    pub flags: u32,
    pub checksum: u32,
}

assert_eq_size!(Info, [u8; 116]);
assert_eq_size!(SymbolTable, [u32; 4]);
assert_eq_size!(ColorInfo, [u8; 6]);
assert_eq_size!(MemoryMapEntry, [u8; 24]);
assert_eq_size!(ModuleEntry, [u32; 4]);
assert_eq_size!(ApmTable, [u8; 20]);
assert_eq_size!(Header, [u32; 3]);

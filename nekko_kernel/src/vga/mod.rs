//! This module provides a simple wrapper around the VGA text buffer.
//!
//! The creation of the wrapper is unsafe, because it would allow
//! concurrent modification of the same memory location, as there is
//! only one VGA buffer.

use bare_metal::{PhysAddr, VirtAddr};

/// Physical address of the VGA text buffer.
pub const VGA_PHYS_ADDR: PhysAddr = PhysAddr(0xB8000);

/// The 16 VGA colors
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    /// Also known as light brown.
    Yellow = 14,
    White = 15,
}

impl Color {
    /// Return the color corresponding to the given VGA code.
    pub fn from_vga(idx: u8) -> Option<Color> {
        if idx < 16 {
            Some(Self::from_nibble(idx))
        } else {
            None
        }
    }

    /// Return the VGA code of the given color.
    pub fn to_vga(self) -> u8 {
        self as u8
    }

    /// Only the low four bits of `nibble` are considered.
    fn from_nibble(nibble: u8) -> Color {
        match nibble & 0x0F {
            0 => Color::Black,
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Cyan,
            4 => Color::Red,
            5 => Color::Magenta,
            6 => Color::Brown,
            7 => Color::LightGray,
            8 => Color::DarkGray,
            9 => Color::LightBlue,
            10 => Color::LightGreen,
            11 => Color::LightCyan,
            12 => Color::LightRed,
            13 => Color::LightMagenta,
            14 => Color::Yellow,
            _ => Color::White,
        }
    }
}

/// Attribute byte of a cell: foreground in the low nibble, background in the high nibble.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(fg: Color, bg: Color) -> ColorCode {
        ColorCode((fg as u8) | ((bg as u8) << 4))
    }

    pub fn from_attribute(attribute: u8) -> ColorCode {
        ColorCode(attribute)
    }

    pub fn attribute(self) -> u8 {
        self.0
    }

    /// Extract the foreground color.
    pub fn fg(self) -> Color {
        Color::from_nibble(self.0)
    }

    /// Extract the background color.
    pub fn bg(self) -> Color {
        Color::from_nibble(self.0 >> 4)
    }
}

impl Default for ColorCode {
    /// Light gray on black, what the BIOS leaves behind.
    fn default() -> ColorCode {
        ColorCode::new(Color::LightGray, Color::Black)
    }
}

/// Entry in the VGA buffer consisting of an attribute and an 8 bit character.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
#[repr(transparent)]
pub struct VgaChar(u16);

assert_eq_size!(VgaChar, u16);

impl VgaChar {
    /// Create a new VGA character representation from a character and its colors.
    /// For example, a white R on a blue background:
    ///
    /// ```ignore
    /// let vc = VgaChar::new(b'R', ColorCode::new(Color::White, Color::Blue));
    /// ```
    pub fn new(ch: u8, color: ColorCode) -> VgaChar {
        VgaChar((ch as u16) | ((color.attribute() as u16) << 8))
    }

    /// Extract the character.
    pub fn ch(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Extract the colors.
    pub fn color(self) -> ColorCode {
        ColorCode((self.0 >> 8) as u8)
    }

    pub fn raw(self) -> u16 {
        self.0
    }
}

/// Wrapper providing access to the VGA memory area through its virtual address.
///
/// All accesses are volatile and bounds checked against the size of the text grid.
pub struct VgaMem {
    buffer: *mut u16,
}

impl VgaMem {
    /// Create a new wrapper for the VGA buffer. This is unsafe because it allows the
    /// creation of multiple instances, even though there is just one single VGA buffer.
    /// The caller must also make sure that `SIZE` cells are writable at `virt_vga_address`.
    pub unsafe fn from_addr(virt_vga_address: VirtAddr) -> Self {
        VgaMem {
            buffer: virt_vga_address.as_mut_ptr::<u16>(),
        }
    }

    pub const WIDTH: usize = 80;
    pub const HEIGHT: usize = 25;
    pub const SIZE: usize = Self::WIDTH * Self::HEIGHT;

    /// Set every character to the same value.
    pub fn clear(&mut self, fill_entry: VgaChar) {
        for off in 0..Self::SIZE {
            unsafe { self.buffer.add(off).write_volatile(fill_entry.0) }
        }
    }

    /// Extract a colored character from the given offset.
    #[inline]
    pub fn read(&self, off: usize) -> VgaChar {
        assert!(off < Self::SIZE, "VGA offset {} out of bounds", off);
        unsafe { VgaChar(self.buffer.add(off).read_volatile()) }
    }

    /// Set the colored character at the given offset.
    #[inline]
    pub fn write(&mut self, off: usize, entry: VgaChar) {
        assert!(off < Self::SIZE, "VGA offset {} out of bounds", off);
        unsafe { self.buffer.add(off).write_volatile(entry.0) }
    }

    /// Compute the offset in the VGA buffer for accessing the character
    /// in the given row and column.
    #[inline]
    pub fn offset_at(row: usize, column: usize) -> usize {
        row * Self::WIDTH + column
    }
}

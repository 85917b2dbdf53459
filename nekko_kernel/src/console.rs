//! This module provides a simple text console interface on top of the VGA buffer.
//!
//! It proceeds on the next line when encountering `\n` or when a line is full, and starts
//! at the top again after the last line. Lines are neither scrolled nor cleared, so the
//! oldest output is simply overwritten.
//!
//! It also implements `core::fmt::Write`, so that it can used with the `write!` (etc.) macros.
//! Since the VGA font only covers ASCII sensibly, other bytes are dropped there.

use bare_metal::Alignable;

use crate::vga::{Color, ColorCode, VgaChar, VgaMem};
use core::fmt;

/// Tab stops are at every multiple of this.
pub const TAB_WIDTH: usize = 8;

pub struct Console {
    buffer: VgaMem,
    // current output line
    row: usize,
    // current output column
    column: usize,
    /// attribute for subsequent writes
    color: ColorCode,
}

impl Console {
    /// Take over the VGA buffer with light gray on black, clearing it.
    pub fn new(buffer: VgaMem) -> Console {
        Self::with_color(buffer, ColorCode::default())
    }

    /// Take over the VGA buffer with the given initial colors, clearing it.
    pub fn with_color(buffer: VgaMem, color: ColorCode) -> Console {
        let mut con = Console {
            buffer,
            row: 0,
            column: 0,
            color,
        };
        con.clear();
        con
    }

    pub fn color(&self) -> ColorCode {
        self.color
    }

    /// Set the colors that are used for subsequent writes.
    pub fn set_color(&mut self, color: ColorCode) {
        self.color = color;
    }

    pub fn set_foreground(&mut self, fg: Color) {
        self.color = ColorCode::new(fg, self.color.bg());
    }

    pub fn set_background(&mut self, bg: Color) {
        self.color = ColorCode::new(self.color.fg(), bg);
    }

    /// Fill the VGA buffer with blanks in the current color and reset the cursor to the top left.
    pub fn clear(&mut self) {
        self.buffer.clear(VgaChar::new(b' ', self.color));
        self.row = 0;
        self.column = 0;
    }

    /// The cursor as `(row, column)`.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    /// Move the cursor. Positions outside of the screen are rejected and leave it where it is.
    pub fn set_cursor(&mut self, row: usize, column: usize) -> bool {
        if row >= VgaMem::HEIGHT || column >= VgaMem::WIDTH {
            return false;
        }
        self.row = row;
        self.column = column;
        true
    }

    /// The cell currently shown at the given position.
    pub fn cell(&self, row: usize, column: usize) -> VgaChar {
        self.buffer.read(VgaMem::offset_at(row, column))
    }

    /// Write a single character.
    ///
    /// `\n` starts the next line, `\r` returns to the start of the current one and `\t`
    /// advances to the next tab stop. Any other byte is put on screen and advances the
    /// cursor one step to the right, wrapping to the next line at the end.
    pub fn put_char(&mut self, ch: u8) {
        match ch {
            b'\n' => self.next_line(),
            b'\r' => self.column = 0,
            b'\t' => {
                // the next stop strictly right of the cursor
                self.column = (self.column + 1).align_up(TAB_WIDTH);
                if self.column >= VgaMem::WIDTH {
                    self.next_line();
                }
            },
            _ => {
                let offset = VgaMem::offset_at(self.row, self.column);
                self.buffer.write(offset, VgaChar::new(ch, self.color));
                self.column += 1;
                if self.column == VgaMem::WIDTH {
                    self.next_line();
                }
            },
        }
    }

    /// Write an ASCII string at the current cursor position.
    pub fn write(&mut self, text: &[u8]) {
        for ch in text {
            self.put_char(*ch);
        }
    }

    /// Write a terminated string, i.e. everything up to the first zero byte.
    pub fn write_text(&mut self, text: &[u8]) {
        self.write(kstring::content(text));
    }

    pub fn write_dec(&mut self, value: u32) {
        self.write(&kstring::uint_to_text(value, 10));
    }

    /// Write a signed number. Only base 10 gets a minus sign.
    pub fn write_int(&mut self, value: i32, base: u32) {
        self.write(&kstring::int_to_text(value, base));
    }

    /// Write `0x` followed by eight uppercase hex digits.
    pub fn write_hex(&mut self, value: u32) {
        self.write(&kstring::hex_to_text(value, true));
    }

    /// Advance the cursor to the start of the next line.
    fn next_line(&mut self) {
        self.column = 0;
        self.row = (self.row + 1) % VgaMem::HEIGHT;
    }
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.bytes() {
            if ch <= 0x7F {
                self.put_char(ch);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::vga::test::HostBuffer;
    use core::fmt::Write;

    /// The characters of one row, without trailing blanks.
    pub fn row_text(con: &Console, row: usize) -> String {
        let line: String = (0..VgaMem::WIDTH).map(|col| con.cell(row, col).ch() as char).collect();
        line.trim_end().to_string()
    }

    /// The whole screen, one line per row.
    pub fn screen_text(con: &Console) -> String {
        (0..VgaMem::HEIGHT).map(|row| row_text(con, row)).collect::<Vec<_>>().join("\n")
    }

    /// The first row containing `needle`.
    pub fn find_row(con: &Console, needle: &str) -> Option<usize> {
        (0..VgaMem::HEIGHT).find(|&row| row_text(con, row).contains(needle))
    }

    #[test]
    fn test_new_clears() {
        let mut host = HostBuffer::new();
        let con = Console::new(host.vga());
        assert_eq!(con.position(), (0, 0));
        assert_eq!(con.color(), ColorCode::new(Color::LightGray, Color::Black));
        for row in 0..VgaMem::HEIGHT {
            for col in 0..VgaMem::WIDTH {
                assert_eq!(con.cell(row, col).raw(), 0x0720);
            }
        }
    }

    #[test]
    fn test_line_wrap() {
        let mut host = HostBuffer::new();
        let mut con = Console::new(host.vga());
        con.write(&[b'a'; 80]);
        assert_eq!(con.position(), (1, 0));
        con.write(b"b");
        assert_eq!(row_text(&con, 1), "b");

        con.set_cursor(3, 5);
        con.put_char(b'\n');
        assert_eq!(con.position(), (4, 0));
    }

    #[test]
    fn test_carriage_return() {
        let mut host = HostBuffer::new();
        let mut con = Console::new(host.vga());
        con.write(b"hello\rJ");
        assert_eq!(row_text(&con, 0), "Jello");
        assert_eq!(con.position(), (0, 1));
    }

    #[test]
    fn test_tab_stops() {
        let mut host = HostBuffer::new();
        let mut con = Console::new(host.vga());
        con.put_char(b'\t');
        assert_eq!(con.position(), (0, 8));
        con.put_char(b'\t');
        assert_eq!(con.position(), (0, 16));
        con.write(b"abc\t");
        assert_eq!(con.position(), (0, 24));
        con.write(b"1234567\t");
        assert_eq!(con.position(), (0, 32));
        con.set_cursor(0, 47);
        con.put_char(b'\t');
        assert_eq!(con.position(), (0, 48));

        con.set_cursor(2, 75);
        con.put_char(b'\t');
        assert_eq!(con.position(), (3, 0));
        con.set_cursor(2, 72);
        con.put_char(b'\t');
        assert_eq!(con.position(), (3, 0));
    }

    #[test]
    fn test_rows_form_a_ring() {
        let mut host = HostBuffer::new();
        let mut con = Console::new(host.vga());
        con.write(b"first\n");
        for _ in 0..VgaMem::HEIGHT - 1 {
            con.put_char(b'\n');
        }
        assert_eq!(con.position(), (0, 0));
        // previous content stays until overwritten
        assert_eq!(row_text(&con, 0), "first");
        con.write(b"X");
        assert_eq!(row_text(&con, 0), "Xirst");

        con.set_cursor(24, 79);
        con.write(b"!");
        assert_eq!(con.position(), (0, 0));
    }

    #[test]
    fn test_set_cursor_rejects_out_of_range() {
        let mut host = HostBuffer::new();
        let mut con = Console::new(host.vga());
        assert!(con.set_cursor(24, 79));
        assert!(!con.set_cursor(25, 0));
        assert!(!con.set_cursor(0, 80));
        assert_eq!(con.position(), (24, 79));
    }

    #[test]
    fn test_color_applies_to_later_writes() {
        let mut host = HostBuffer::new();
        let mut con = Console::new(host.vga());
        con.write(b"a");
        con.set_color(ColorCode::new(Color::LightRed, Color::Black));
        con.write(b"b");
        con.set_background(Color::Blue);
        con.write(b"c");
        con.set_foreground(Color::Yellow);
        con.write(b"d");

        assert_eq!(con.cell(0, 0).color(), ColorCode::default());
        assert_eq!(con.cell(0, 1).color(), ColorCode::new(Color::LightRed, Color::Black));
        assert_eq!(con.cell(0, 2).color(), ColorCode::new(Color::LightRed, Color::Blue));
        assert_eq!(con.cell(0, 3).color(), ColorCode::new(Color::Yellow, Color::Blue));
    }

    #[test]
    fn test_clear_uses_current_color() {
        let mut host = HostBuffer::new();
        let mut con = Console::new(host.vga());
        con.write(b"stale");
        con.set_color(ColorCode::new(Color::White, Color::Red));
        con.clear();
        assert_eq!(con.position(), (0, 0));
        assert_eq!(con.cell(0, 0), VgaChar::new(b' ', ColorCode::new(Color::White, Color::Red)));
        assert_eq!(row_text(&con, 0), "");
    }

    #[test]
    fn test_number_rendering() {
        let mut host = HostBuffer::new();
        let mut con = Console::new(host.vga());
        con.write_dec(66176);
        con.put_char(b' ');
        con.write_hex(0x2BADB002);
        con.put_char(b' ');
        con.write_int(-42, 10);
        con.put_char(b' ');
        con.write_int(-1, 16);
        con.put_char(b' ');
        con.write_text(b"up to\0here");
        assert_eq!(row_text(&con, 0), "66176 0x2BADB002 -42 ffffffff up to");
    }

    #[test]
    fn test_fmt_write_drops_non_ascii() {
        let mut host = HostBuffer::new();
        let mut con = Console::new(host.vga());
        write!(con, "a{}b {}\n", 'é', 17).unwrap();
        assert_eq!(row_text(&con, 0), "ab 17");
        assert_eq!(con.position(), (1, 0));
        assert!(screen_text(&con).starts_with("ab 17\n"));
    }
}

//! Conversion between integers and their textual representation in bases 2 to 36.

use core::fmt;
use core::ops::Deref;
use core::str;

use super::ascii;
use super::cstr;

/// Digit characters, indexed by digit value.
pub const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

fn valid_base(base: u32) -> bool {
    (MIN_BASE..=MAX_BASE).contains(&base)
}

/// A rendered number. Carries its own length; big enough for any 32 bit value
/// in base 2 plus a sign.
#[derive(Clone, Copy)]
pub struct NumText {
    buf: [u8; NumText::CAPACITY],
    len: usize,
}

impl NumText {
    pub const CAPACITY: usize = 34;

    const fn empty() -> NumText {
        NumText {
            buf: [0; Self::CAPACITY],
            len: 0,
        }
    }

    fn push(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.len += 1;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // only ever filled with ASCII digits, letters, '-' and 'x'
        str::from_utf8(self.as_bytes()).unwrap_or("")
    }
}

impl Deref for NumText {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for NumText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for NumText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NumText({:?})", self.as_str())
    }
}

/// Append the digits of `value`. They come out least significant first
/// and are reversed in place afterwards.
fn push_digits(text: &mut NumText, mut value: u32, base: u32) {
    let start = text.len;
    loop {
        text.push(DIGITS[(value % base) as usize]);
        value /= base;
        if value == 0 {
            break;
        }
    }
    let end = text.len;
    cstr::reverse(&mut text.buf[start..end]);
}

/// Render an unsigned value. An unsupported base yields an empty text.
pub fn uint_to_text(value: u32, base: u32) -> NumText {
    let mut text = NumText::empty();
    if valid_base(base) {
        push_digits(&mut text, value, base);
    }
    text
}

/// Render a signed value. Only base 10 gets a leading `-`; in any other base
/// a negative value is rendered as its 32 bit two's complement pattern.
/// An unsupported base yields an empty text.
pub fn int_to_text(value: i32, base: u32) -> NumText {
    let mut text = NumText::empty();
    if !valid_base(base) {
        return text;
    }
    if value < 0 && base == 10 {
        text.push(b'-');
        push_digits(&mut text, value.unsigned_abs(), base);
    } else {
        push_digits(&mut text, value as u32, base);
    }
    text
}

/// Render `0x` followed by exactly eight hex digits.
pub fn hex_to_text(value: u32, uppercase: bool) -> NumText {
    let mut text = NumText::empty();
    text.push(b'0');
    text.push(b'x');
    for nibble in (0..8).rev() {
        let digit = DIGITS[((value >> (nibble * 4)) & 0xF) as usize];
        text.push(if uppercase { ascii::to_upper(digit) } else { digit });
    }
    text
}

/// Parse leading whitespace, an optional sign and as many digits valid in `base`
/// as there are. Returns the sign and the (wrapped) magnitude.
fn parse(s: &[u8], base: u32) -> (bool, u32) {
    if !valid_base(base) {
        return (false, 0);
    }
    let s = cstr::content(s);
    let mut pos = s.iter().position(|c| !ascii::is_space(*c)).unwrap_or(s.len());
    let negative = match s.get(pos).copied() {
        Some(b'-') => { pos += 1; true },
        Some(b'+') => { pos += 1; false },
        _ => false,
    };
    let magnitude = s[pos..].iter()
        .map(|c| ascii::digit_value(*c))
        .take_while(|d| d.map_or(false, |d| d < base))
        .fold(0_u32, |acc, d| acc.wrapping_mul(base).wrapping_add(d.unwrap_or(0)));
    (negative, magnitude)
}

/// Parse a signed integer in the given base. Parsing stops at the first byte that is
/// not a digit of the base; overflow wraps. An unsupported base yields 0.
pub fn text_to_int(s: &[u8], base: u32) -> i32 {
    let (negative, magnitude) = parse(s, base);
    let value = magnitude as i32;
    if negative { value.wrapping_neg() } else { value }
}

/// Parse an unsigned integer in the given base, see `text_to_int`.
pub fn text_to_uint(s: &[u8], base: u32) -> u32 {
    let (negative, magnitude) = parse(s, base);
    if negative { magnitude.wrapping_neg() } else { magnitude }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLES: [i32; 12] = [
        0, 1, -1, 7, -7, 42, 255, -256, 66176, 0x2BADB002, i32::MAX, i32::MIN,
    ];

    #[test]
    fn renders_decimal() {
        assert_eq!(int_to_text(0, 10).as_str(), "0");
        assert_eq!(int_to_text(-1234, 10).as_str(), "-1234");
        assert_eq!(int_to_text(i32::MIN, 10).as_str(), "-2147483648");
        assert_eq!(uint_to_text(u32::MAX, 10).as_str(), "4294967295");
    }

    #[test]
    fn renders_other_bases_lowercase() {
        assert_eq!(uint_to_text(255, 16).as_str(), "ff");
        assert_eq!(uint_to_text(5, 2).as_str(), "101");
        assert_eq!(uint_to_text(35, 36).as_str(), "z");
        assert_eq!(uint_to_text(u32::MAX, 2).len(), 32);
    }

    #[test]
    fn only_base_ten_gets_a_sign() {
        assert_eq!(int_to_text(-1, 16).as_str(), "ffffffff");
        assert_eq!(int_to_text(-2, 2).as_str(), "11111111111111111111111111111110");
        for base in MIN_BASE..=MAX_BASE {
            let text = int_to_text(-5, base);
            assert_eq!(text.starts_with(b"-"), base == 10, "base {}", base);
        }
    }

    #[test]
    fn invalid_base_is_empty() {
        for base in [0, 1, 37, 100].iter() {
            assert!(int_to_text(42, *base).is_empty());
            assert!(uint_to_text(42, *base).is_empty());
            assert_eq!(text_to_int(b"42", *base), 0);
        }
    }

    #[test]
    fn roundtrip_all_bases() {
        for base in MIN_BASE..=MAX_BASE {
            for value in SAMPLES.iter().cloned().chain(-300..300) {
                let text = int_to_text(value, base);
                assert_eq!(text_to_int(&text, base), value, "base {} text {:?}", base, text);
                let text = uint_to_text(value as u32, base);
                assert_eq!(text_to_uint(&text, base), value as u32, "base {} text {:?}", base, text);
            }
        }
    }

    #[test]
    fn hex_has_fixed_width() {
        assert_eq!(hex_to_text(0x2BADB002, true).as_str(), "0x2BADB002");
        assert_eq!(hex_to_text(0xDEADBEEF, false).as_str(), "0xdeadbeef");
        assert_eq!(hex_to_text(0, true).as_str(), "0x00000000");
    }

    #[test]
    fn parse_skips_space_and_stops_at_garbage() {
        assert_eq!(text_to_int(b"  \t-42abc", 10), -42);
        assert_eq!(text_to_int(b"+17", 10), 17);
        assert_eq!(text_to_int(b"FF", 16), 255);
        assert_eq!(text_to_int(b"ff;", 16), 255);
        assert_eq!(text_to_int(b"129", 2), 1);
        assert_eq!(text_to_int(b"", 10), 0);
        assert_eq!(text_to_int(b"-", 10), 0);
        assert_eq!(text_to_uint(b"-1", 10), u32::MAX);
        assert_eq!(text_to_int(b"12\0 34", 10), 12);
    }
}

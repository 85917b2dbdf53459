//! ASCII character classification and case conversion.

#[inline]
pub fn is_alpha(c: u8) -> bool {
    (b'a'..=b'z').contains(&c) || (b'A'..=b'Z').contains(&c)
}

#[inline]
pub fn is_digit(c: u8) -> bool {
    (b'0'..=b'9').contains(&c)
}

#[inline]
pub fn is_alnum(c: u8) -> bool {
    is_alpha(c) || is_digit(c)
}

/// Space, tab, newline, carriage return, form feed and vertical tab.
#[inline]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0C | 0x0B)
}

/// Bytes 32 to 126.
#[inline]
pub fn is_printable(c: u8) -> bool {
    (32..=126).contains(&c)
}

#[inline]
pub fn to_lower(c: u8) -> u8 {
    if (b'A'..=b'Z').contains(&c) {
        c + (b'a' - b'A')
    } else {
        c
    }
}

#[inline]
pub fn to_upper(c: u8) -> u8 {
    if (b'a'..=b'z').contains(&c) {
        c - (b'a' - b'A')
    } else {
        c
    }
}

/// Value of `c` as a digit in bases up to 36, letters in either case.
pub fn digit_value(c: u8) -> Option<u32> {
    if is_digit(c) {
        Some((c - b'0') as u32)
    } else if is_alpha(c) {
        Some((to_lower(c) - b'a') as u32 + 10)
    } else {
        None
    }
}

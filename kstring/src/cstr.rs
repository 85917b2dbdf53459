//! Operations on terminated byte strings.

use super::mem;

/// Byte terminating the content of a string buffer.
pub const NUL: u8 = 0;

/// Number of bytes before the first terminator. A buffer without a zero byte is
/// terminated by its end.
pub fn length(s: &[u8]) -> usize {
    s.iter().position(|b| *b == NUL).unwrap_or(s.len())
}

/// The string stored in `s`, without terminator.
pub fn content(s: &[u8]) -> &[u8] {
    &s[..length(s)]
}

/// Byte at `index`, reading past the content as the terminator.
fn byte_at(s: &[u8], index: usize) -> u8 {
    s.get(index).copied().unwrap_or(NUL)
}

/// Copy the string in `src` to `dest` and terminate it. Returns the length of the copied string.
///
/// # Panics
///
/// Panics if `dest` cannot hold `length(src) + 1` bytes.
pub fn copy(dest: &mut [u8], src: &[u8]) -> usize {
    let len = length(src);
    mem::copy_region(dest, src, len);
    dest[len] = NUL;
    len
}

/// Write exactly `n` bytes to `dest`: the string in `src`, cut off after `n` bytes,
/// followed by zero padding. If the string is `n` bytes or longer, the result is not terminated.
///
/// # Panics
///
/// Panics if `dest` is shorter than `n`.
pub fn copy_bounded(dest: &mut [u8], src: &[u8], n: usize) {
    let len = length(src).min(n);
    mem::copy_region(dest, src, len);
    mem::zero(&mut dest[len..n]);
}

/// Append the string in `src` to the string in `dest`. Returns the new length.
pub fn concat(dest: &mut [u8], src: &[u8]) -> usize {
    let start = length(dest);
    start + copy(&mut dest[start..], src)
}

/// Append at most `n` bytes of `src` to the string in `dest`. The result is always terminated.
pub fn concat_bounded(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    let start = length(dest);
    let len = length(src).min(n);
    mem::copy_region(&mut dest[start..], src, len);
    dest[start + len] = NUL;
    start + len
}

/// Compare two strings by their first differing byte (unsigned).
/// Returns a negative value, zero or a positive value.
pub fn compare(a: &[u8], b: &[u8]) -> i32 {
    let mut i = 0;
    loop {
        let (x, y) = (byte_at(a, i), byte_at(b, i));
        if x != y || x == NUL {
            return x as i32 - y as i32;
        }
        i += 1;
    }
}

/// Like `compare`, but looks at no more than `n` bytes. Running out of the bound
/// before a difference shows up means equal, in particular `n == 0` always yields 0.
pub fn compare_bounded(a: &[u8], b: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let (x, y) = (byte_at(a, i), byte_at(b, i));
        if x != y || x == NUL {
            return x as i32 - y as i32;
        }
    }
    0
}

/// Index of the first `c` in the string.
///
/// Searching for the terminator itself yields its index if `s` holds an explicit
/// zero byte, and `None` if the string is only terminated by the end of the slice.
pub fn find_char(s: &[u8], c: u8) -> Option<usize> {
    let len = length(s);
    if c == NUL {
        return if len < s.len() { Some(len) } else { None };
    }
    s[..len].iter().position(|b| *b == c)
}

/// Index of the last `c` in the string. The terminator is treated like in `find_char`.
pub fn find_last_char(s: &[u8], c: u8) -> Option<usize> {
    if c == NUL {
        return find_char(s, NUL);
    }
    content(s).iter().rposition(|b| *b == c)
}

/// Index of the first occurrence of the string `needle` in `haystack`.
/// An empty needle is found at index 0.
pub fn find_substring(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let haystack = content(haystack);
    let needle = content(needle);
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| mem::compare_region(&haystack[i..], needle, needle.len()) == 0)
}

/// Reverse the string in place. Bytes after the terminator are left alone.
pub fn reverse(s: &mut [u8]) {
    let len = length(s);
    if len < 2 {
        return;
    }
    let (mut i, mut j) = (0, len - 1);
    while i < j {
        s.swap(i, j);
        i += 1;
        j -= 1;
    }
}

/// Split a string into non-empty runs of bytes that are not contained in `delimiters`.
pub fn tokens<'a>(s: &'a [u8], delimiters: &'a [u8]) -> Tokens<'a> {
    Tokens {
        rest: content(s),
        delimiters: content(delimiters),
    }
}

/// Iterator returned by `tokens`. Unlike a C tokenizer it keeps its position
/// in the iterator instead of a hidden static, and never modifies the input.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a [u8],
    delimiters: &'a [u8],
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let delimiters = self.delimiters;
        let start = self.rest.iter().position(|b| !delimiters.contains(b))?;
        let rest = &self.rest[start..];
        let end = rest.iter().position(|b| delimiters.contains(b)).unwrap_or(rest.len());
        self.rest = &rest[end..];
        Some(&rest[..end])
    }
}

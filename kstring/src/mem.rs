//! Raw byte region operations over exactly `n` bytes.
//!
//! All functions panic if a region is shorter than the requested count.

/// Set every byte of `buf` to `value`.
pub fn fill(buf: &mut [u8], value: u8) {
    for byte in buf.iter_mut() {
        *byte = value;
    }
}

/// Set every byte of `buf` to zero.
pub fn zero(buf: &mut [u8]) {
    fill(buf, 0);
}

/// Copy the first `n` bytes of `src` to the start of `dest`.
pub fn copy_region(dest: &mut [u8], src: &[u8], n: usize) {
    dest[..n].copy_from_slice(&src[..n]);
}

/// Copy `n` bytes inside `buf` to offset `dest` from offset `src`. The regions may overlap:
/// the copy runs forward when `dest < src` and backward otherwise, so every source
/// byte is read before it is overwritten.
pub fn move_region(buf: &mut [u8], dest: usize, src: usize, n: usize) {
    assert!(src + n <= buf.len() && dest + n <= buf.len(), "region out of bounds");
    if dest < src {
        for i in 0..n {
            buf[dest + i] = buf[src + i];
        }
    } else {
        for i in (0..n).rev() {
            buf[dest + i] = buf[src + i];
        }
    }
}

/// Compare the first `n` bytes of both regions. Returns the (unsigned) difference
/// of the first mismatching pair, or zero if the regions are equal.
pub fn compare_region(a: &[u8], b: &[u8], n: usize) -> i32 {
    a[..n].iter()
        .zip(&b[..n])
        .find(|(x, y)| x != y)
        .map(|(x, y)| *x as i32 - *y as i32)
        .unwrap_or(0)
}

/// Position of the first `value` among the first `n` bytes of `buf`.
pub fn find_byte(buf: &[u8], value: u8, n: usize) -> Option<usize> {
    buf[..n].iter().position(|b| *b == value)
}

#[cfg(test)]
mod test {
    use super::*;

    fn move_via_temporary(buf: &[u8], dest: usize, src: usize, n: usize) -> Vec<u8> {
        let mut expected = buf.to_vec();
        let tmp = buf[src..src + n].to_vec();
        expected[dest..dest + n].copy_from_slice(&tmp);
        expected
    }

    #[test]
    fn fill_and_zero() {
        let mut buf = [1_u8; 8];
        fill(&mut buf[2..5], 0xAA);
        assert_eq!(buf, [1, 1, 0xAA, 0xAA, 0xAA, 1, 1, 1]);
        zero(&mut buf);
        assert_eq!(buf, [0; 8]);
    }

    #[test]
    fn move_region_matches_temporary_copy() {
        let original: Vec<u8> = (0..32).collect();
        for n in 0..16 {
            for src in 0..(32 - n) {
                for dest in 0..(32 - n) {
                    let mut buf = original.clone();
                    move_region(&mut buf, dest, src, n);
                    assert_eq!(buf, move_via_temporary(&original, dest, src, n),
                        "src={} dest={} n={}", src, dest, n);
                }
            }
        }
    }

    #[test]
    fn move_region_overlap_directions() {
        // forward overlap: destination before source
        let mut buf = *b"abcdef";
        move_region(&mut buf, 0, 2, 4);
        assert_eq!(&buf, b"cdefef");

        // backward overlap: destination after source
        let mut buf = *b"abcdef";
        move_region(&mut buf, 2, 0, 4);
        assert_eq!(&buf, b"ababcd");
    }

    #[test]
    fn copy_region_copies_exactly_n() {
        let mut dest = [0_u8; 6];
        copy_region(&mut dest, b"hello world", 5);
        assert_eq!(&dest, b"hello\0");
    }

    #[test]
    fn compare_region_signs() {
        assert_eq!(compare_region(b"abc", b"abc", 3), 0);
        assert!(compare_region(b"abc", b"abd", 3) < 0);
        assert!(compare_region(b"abd", b"abc", 3) > 0);
        // unsigned comparison
        assert!(compare_region(&[0xFF], &[0x01], 1) > 0);
        // only the first n bytes count
        assert_eq!(compare_region(b"abX", b"abY", 2), 0);
    }

    #[test]
    fn find_byte_respects_count() {
        assert_eq!(find_byte(b"kernel", b'n', 6), Some(3));
        assert_eq!(find_byte(b"kernel", b'n', 3), None);
        assert_eq!(find_byte(b"a\0b", 0, 3), Some(1));
    }
}

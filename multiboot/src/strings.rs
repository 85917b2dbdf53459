//! The only place where NUL-terminated strings from the boot loader are touched.

use bare_metal::VirtAddr;

use core::slice;

/// Longest loader string that is scanned for its terminator.
pub const MAX_STRING_LENGTH: usize = 4096;

/// Create a byte slice for the NUL-terminated string at `addr`, without the terminator.
/// Strings longer than `MAX_STRING_LENGTH` are cut off.
///
/// # Safety
///
/// `addr` must point to readable memory up to the terminator (or `MAX_STRING_LENGTH` bytes),
/// and the memory must stay valid and unmodified for `'a`.
pub unsafe fn c_str_at<'a>(addr: VirtAddr) -> &'a [u8] {
    let start = addr.as_ptr::<u8>();
    let mut len = 0;
    while len < MAX_STRING_LENGTH && start.add(len).read() != 0 {
        len += 1;
    }
    slice::from_raw_parts(start, len)
}

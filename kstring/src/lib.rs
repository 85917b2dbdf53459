//! Freestanding string, memory and number routines for the early kernel.
//!
//! Everything works on caller-owned byte slices and never allocates.
//! Strings are "terminated buffers": the content ends at the first zero
//! byte, or at the end of the slice if there is none. That way loader-provided
//! NUL-terminated data and plain Rust byte strings are handled alike, and no
//! routine can run past the end of its buffer.

#![cfg_attr(not(test), no_std)]

pub mod ascii;
pub mod cstr;
pub mod mem;
pub mod num;

pub use self::cstr::{length, content};
pub use self::num::{NumText, int_to_text, uint_to_text, hex_to_text, text_to_int, text_to_uint};

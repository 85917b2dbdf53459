//! Newtype wrappers that make it harder to accidentally confuse physical and virtual addresses.

use core::fmt;
use core::ops;

/// A virtual address. It's validity depends on the current page mapping.
#[repr(C)]
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct VirtAddr(pub usize);

/// A physical address. Whether it is accessible depends on the current page mapping.
/// Memory map entries and the framebuffer may live above 4 GiB, hence 64 bits.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
#[repr(C)]
pub struct PhysAddr(pub u64);

/// A 32 bit physical address, as handed over by the boot loader.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
#[repr(C)]
pub struct PhysAddr32(pub u32);

impl VirtAddr {
    pub unsafe fn as_ptr<T>(self) -> *const T {
        self.0 as *const T
    }

    pub unsafe fn as_mut_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }
}

impl PhysAddr32 {
    /// Re-interpret a 32 bit address as 64 bit.
    pub fn extend(self) -> PhysAddr {
        PhysAddr(self.0 as u64)
    }
}

macro_rules! impl_addr_arith {
    ($addr:tt, $int:ty) => {
        impl ops::Add<$int> for $addr {
            type Output = $addr;

            fn add(self, other: $int) -> Self::Output {
                $addr(self.0 + other)
            }
        }

        impl ops::AddAssign<$int> for $addr {
            fn add_assign(&mut self, other: $int) {
                self.0 += other;
            }
        }
    };
}

impl_addr_arith!(VirtAddr, usize);
impl_addr_arith!(PhysAddr, u64);
impl_addr_arith!(PhysAddr32, u32);

impl fmt::Pointer for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PHYS_0x{:016x}", self.0)
    }
}

impl fmt::Pointer for PhysAddr32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PHYS_0x{:08x}", self.0)
    }
}

impl fmt::Pointer for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "VIRT_0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pointer_formatting() {
        assert_eq!(format!("{:p}", PhysAddr32(0xB8000)), "PHYS_0x000b8000");
        assert_eq!(format!("{:p}", PhysAddr(0x1_0000_0000)), "PHYS_0x0000000100000000");
    }

    #[test]
    fn extend_keeps_value() {
        assert_eq!(PhysAddr32(0xFFFF_FFFF).extend(), PhysAddr(0xFFFF_FFFF));
        assert_eq!(PhysAddr32(0x1000) + 4, PhysAddr32(0x1004));
    }
}

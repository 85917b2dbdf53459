use super::addr::{PhysAddr, VirtAddr};

/// Implements translation of physical to virtual addresses for a direct mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectMapping {
    virtual_base: VirtAddr,
    physical_base: PhysAddr,
    size_in_bytes: u64,
}

impl DirectMapping {
    pub const fn new(virtual_base: VirtAddr, physical_base: PhysAddr, size_in_bytes: u64) -> Self {
        DirectMapping {
            virtual_base,
            physical_base,
            size_in_bytes,
        }
    }

    /// The mapping the kernel runs with during early boot: the whole 32 bit
    /// physical address space mapped 1:1.
    pub const fn identity() -> Self {
        Self::new(VirtAddr(0), PhysAddr(0), 1 << 32)
    }

    /// Returns whether the given physical address is part of this mapping.
    pub fn contains_phys(&self, phys_addr: PhysAddr) -> bool {
        phys_addr >= self.physical_base && phys_addr.0 - self.physical_base.0 < self.size_in_bytes
    }

    /// Translates a physical to a virtual address using the direct mapping.
    ///
    /// # Panics
    ///
    /// Panics, if the given physical address is outside of the range provided by this direct mapping.
    pub fn phys_to_virt(&self, phys_addr: PhysAddr) -> VirtAddr {
        if !self.contains_phys(phys_addr) {
            panic!("[DirectMapping::phys_to_virt] physical address {:p} out of bounds", phys_addr);
        }
        VirtAddr((phys_addr.0 - self.physical_base.0) as usize + self.virtual_base.0)
    }
}

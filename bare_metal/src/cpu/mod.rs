pub mod io;

use core::arch::asm;

/// Pause the CPU until the next interrupt arrives.
#[inline]
pub unsafe fn hlt() {
    asm!("hlt", options(nomem, nostack));
}

/// Pause the CPU indefintely. Interrupts may still arrive,
/// depending on the interrupt flags of the CPU.
#[inline]
pub unsafe fn hang() -> ! {
    loop {
        hlt();
    }
}

/// Clear the interrupt flag, so that external interrupts no longer wake up a halted CPU.
#[inline]
pub unsafe fn disable_interrupts() {
    asm!("cli", options(nomem, nostack));
}

/// Disable interrupts and halt forever. Only a reset brings the machine back.
#[inline]
pub unsafe fn halt() -> ! {
    disable_interrupts();
    hang()
}

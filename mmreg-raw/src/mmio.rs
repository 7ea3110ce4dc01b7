//! MMIO (memory-mapped I/O) read/write primitives
//!
//! This module is the only place that dereferences a hardware address. The
//! higher-level [`Register`](crate::Register) type owns nothing but the
//! address value and funnels every access through these functions.
//!
//! With the `trace-mmio` feature every access is also logged at trace level.
//! Without it the accessors are bare volatile loads and stores.

use core::mem::align_of;
use core::num::NonZeroUsize;

use crate::error::{RegisterError, Result};
use crate::width::Primitive;

/// Check that `address` can hold a `T`
///
/// # Errors
///
/// Returns [`RegisterError::InvalidAddress`] if:
/// - The address is zero (null)
/// - The address is not aligned for `T`
pub fn validate_address<T>(address: usize) -> Result<NonZeroUsize> {
    let Some(nonzero) = NonZeroUsize::new(address) else {
        return Err(RegisterError::InvalidAddress {
            address,
            reason: "null address",
        });
    };

    if address % align_of::<T>() != 0 {
        return Err(RegisterError::InvalidAddress {
            address,
            reason: "address is not aligned to the register width",
        });
    }

    Ok(nonzero)
}

/// Read one word from a memory-mapped register
///
/// # Safety
///
/// `address` must be valid for a volatile read of a `T` and suitably aligned.
/// Reads from hardware may have side effects (read-to-clear status bits).
#[inline]
pub unsafe fn read<T: Primitive>(address: NonZeroUsize) -> T {
    let value = core::ptr::read_volatile(address.get() as *const T);
    #[cfg(feature = "trace-mmio")]
    tracing::trace!("MMIO read: 0x{:08x} = 0x{:x}", address.get(), value);
    value
}

/// Write one word to a memory-mapped register
///
/// # Safety
///
/// `address` must be valid for a volatile write of a `T` and suitably
/// aligned. The caller is responsible for the side effects the write has on
/// the device.
#[inline]
pub unsafe fn write<T: Primitive>(address: NonZeroUsize, value: T) {
    #[cfg(feature = "trace-mmio")]
    tracing::trace!("MMIO write: 0x{:08x} <- 0x{:x}", address.get(), value);
    core::ptr::write_volatile(address.get() as *mut T, value);
}

//! # mmreg-raw
//!
//! Type-safe access to memory-mapped hardware registers and the individual
//! bits within them, for bare-metal targets.
//!
//! A [`Register<N, A>`](Register) is a handle to an `N`-bit hardware word
//! (`N` ∈ {8, 16, 32, 64}) whose access mode `A` is one of [`ReadOnly`],
//! [`WriteOnly`] or [`ReadWrite`]. Operations the access mode does not grant
//! do not exist on the type, so misuse is a compile error rather than a
//! runtime fault. A [`Bitfield`] borrows one bit of a register and turns bit
//! reads and writes into read-modify-write sequences on the owner.
//!
//! ## Binding policy
//!
//! Registers can be created unbound and bound later, or rebound at runtime.
//! Binding is fail-fast: a null or misaligned address is rejected with
//! [`RegisterError::InvalidAddress`] when it is bound, and any access through
//! an unbound register panics.
//!
//! ## Usage
//!
//! ```
//! use core::cell::Cell;
//! use mmreg_raw::{Register, ReadWrite};
//!
//! // Plain memory standing in for a hardware word.
//! let word = Cell::new(0u32);
//!
//! // SAFETY: `word` is a live, aligned u32 that outlives `reg`.
//! let mut reg = unsafe { Register::<32, ReadWrite>::new(word.as_ptr() as usize)? };
//!
//! reg.write(0xAAAA);
//! reg |= 0x5555;
//! assert_eq!(reg.read(), 0xFFFF);
//!
//! reg.bit(0)?.clear();
//! assert_eq!(word.get(), 0xFFFE);
//! # Ok::<(), mmreg_raw::RegisterError>(())
//! ```
//!
//! ## Concurrency
//!
//! Compound updates (`|=`, `&=`, `^=`, increments, bit writes) are plain
//! read-modify-write sequences. Nothing here masks interrupts; callers that
//! share a register with an interrupt handler must provide their own
//! critical section.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod macros;

pub mod access;
pub mod bitfield;
pub mod enums;
pub mod error;
pub mod layout;
pub mod mmio;
pub mod register;
pub mod width;

// Re-export for convenience
pub use access::{Access, ReadOnly, ReadWrite, Readable, Writable, WriteOnly};
pub use bitfield::Bitfield;
pub use enums::{to_underlying, RegisterEnum};
pub use error::{RegisterError, Result};
pub use layout::RegisterLayout;
pub use register::Register;
pub use width::{Bits, Primitive, Width, Word};

mod compile_tests {
    //! ```compile_fail
    //! use mmreg_raw::{ReadOnly, Register};
    //! let word = core::cell::Cell::new(0u32);
    //! let mut reg = unsafe { Register::<32, ReadOnly>::new(word.as_ptr() as usize) }.unwrap();
    //! reg.write(1);
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg_raw::{Register, WriteOnly};
    //! let word = core::cell::Cell::new(0u32);
    //! let reg = unsafe { Register::<32, WriteOnly>::new(word.as_ptr() as usize) }.unwrap();
    //! let _ = reg.read();
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg_raw::{Register, WriteOnly};
    //! let word = core::cell::Cell::new(0u32);
    //! let mut reg = unsafe { Register::<32, WriteOnly>::new(word.as_ptr() as usize) }.unwrap();
    //! reg |= 1;
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg_raw::{Register, WriteOnly};
    //! let word = core::cell::Cell::new(0u32);
    //! let mut reg = unsafe { Register::<32, WriteOnly>::new(word.as_ptr() as usize) }.unwrap();
    //! reg.bit(0).unwrap().set();
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg_raw::Register;
    //! let reg = Register::<24>::unbound();
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg_raw::Register;
    //! let word = core::cell::Cell::new(0u32);
    //! let mut reg = unsafe { Register::<32>::new(word.as_ptr() as usize) }.unwrap();
    //! let _ = reg.field(3u32);
    //! ```
    //!
    //! ```compile_fail
    //! use mmreg_raw::Register;
    //! let first = core::cell::Cell::new(0u32);
    //! let second = core::cell::Cell::new(0u32);
    //! let mut reg = unsafe { Register::<32>::new(first.as_ptr() as usize) }.unwrap();
    //! let mut bit = reg.bit(0).unwrap();
    //! unsafe { reg.set_address(second.as_ptr() as usize) }.unwrap();
    //! bit.set();
    //! ```
    //!
    //! ```compile_fail
    //! #[derive(Clone, Copy)]
    //! enum Handwritten {
    //!     Only = 0,
    //! }
    //!
    //! impl mmreg_raw::RegisterEnum for Handwritten {
    //!     type Repr = u8;
    //!     fn to_underlying(self) -> u8 { 0 }
    //!     fn index(self) -> usize { 0 }
    //!     fn name(&self) -> &'static str { "Only" }
    //!     fn all() -> &'static [Self] { &[Handwritten::Only] }
    //! }
    //! ```
    //!
    //! ```
    //! use mmreg_raw::{ReadWrite, Register};
    //! let word = core::cell::Cell::new(0u32);
    //! let mut reg = unsafe { Register::<32, ReadWrite>::new(word.as_ptr() as usize) }.unwrap();
    //! reg.write(1);
    //! reg |= 2;
    //! reg.bit(2).unwrap().set();
    //! assert_eq!(reg.read(), 0b111);
    //! ```
}

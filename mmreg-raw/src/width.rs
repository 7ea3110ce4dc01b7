//! Compile-time mapping from a register bit width to its primitive word type
//!
//! Only the widths 8, 16, 32 and 64 have a [`Width`] implementation, so naming
//! a register of any other width fails to compile.

use core::fmt::{Debug, LowerHex};

use num_traits::{PrimInt, WrappingAdd, WrappingSub};

mod sealed {
    pub trait Sealed {}
}

/// Unsigned integer types that can back a register.
///
/// The arithmetic needed by register operations (masking, shifting and
/// wrapping increment) comes from [`num_traits`].
pub trait Primitive:
    PrimInt + WrappingAdd + WrappingSub + Debug + LowerHex + Send + Sync + 'static + sealed::Sealed
{
}

/// Marker naming a register width in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bits<const N: usize>;

/// A supported register width.
pub trait Width: sealed::Sealed {
    /// The unsigned integer exactly `N` bits wide.
    type Primitive: Primitive;
}

/// The primitive word type of an `N`-bit register.
pub type Word<const N: usize> = <Bits<N> as Width>::Primitive;

macro_rules! impl_width {
    ($($bits:literal => $ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Primitive for $ty {}

            impl sealed::Sealed for Bits<$bits> {}
            impl Width for Bits<$bits> {
                type Primitive = $ty;
            }
        )*
    };
}

impl_width! {
    8 => u8,
    16 => u16,
    32 => u32,
    64 => u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;

    #[test]
    fn test_word_sizes_match_width() {
        assert_eq!(size_of::<Word<8>>() * 8, 8);
        assert_eq!(size_of::<Word<16>>() * 8, 16);
        assert_eq!(size_of::<Word<32>>() * 8, 32);
        assert_eq!(size_of::<Word<64>>() * 8, 64);
    }

    #[test]
    fn test_word_is_unsigned() {
        assert_eq!(Word::<8>::MIN, 0);
        assert_eq!(Word::<64>::MAX, u64::MAX);
    }
}

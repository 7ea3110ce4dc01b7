//! Typed views of a whole register word

use crate::width::{Bits, Width, Word};

/// A struct view of a whole `N`-bit register word
///
/// Lets [`Register::read_as`](crate::Register::read_as) and
/// [`Register::write_as`](crate::Register::write_as) move named fields in and
/// out of the hardware word instead of hand-assembled masks.
///
/// # Example
///
/// ```
/// use mmreg_raw::RegisterLayout;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Control {
///     enable: bool,
///     prescaler: u8,
/// }
///
/// impl RegisterLayout<32> for Control {
///     fn to_register_value(&self) -> u32 {
///         u32::from(self.enable) | (u32::from(self.prescaler) << 8)
///     }
///
///     fn from_register_value(value: u32) -> Self {
///         Self {
///             enable: value & 1 != 0,
///             prescaler: ((value >> 8) & 0xFF) as u8,
///         }
///     }
/// }
///
/// let ctrl = Control { enable: true, prescaler: 3 };
/// assert_eq!(ctrl.to_register_value(), 0x301);
/// assert_eq!(Control::from_register_value(0x301), ctrl);
/// ```
pub trait RegisterLayout<const N: usize>: Sized
where
    Bits<N>: Width,
{
    /// Pack the fields into a register word
    fn to_register_value(&self) -> Word<N>;

    /// Unpack a register word into fields
    fn from_register_value(value: Word<N>) -> Self;

    /// Check every field against the bits it occupies
    ///
    /// The default accepts everything; layouts with fields narrower than
    /// their Rust type report the first field that would be truncated.
    fn validate(&self) -> Result<(), &'static str> {
        Ok(())
    }
}

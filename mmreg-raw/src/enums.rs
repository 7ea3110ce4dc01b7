//! Symbolic names for bit positions

#[doc(hidden)]
pub mod __private {
    /// Implemented only by [`register_enum!`](crate::register_enum).
    pub trait Sealed {}
}

/// An enumeration whose variants name bit positions in a register
///
/// Sealed: only enums declared with [`register_enum!`](crate::register_enum)
/// implement it, so integers and other non-enum types cannot be passed where
/// a symbolic bit name is expected.
pub trait RegisterEnum: __private::Sealed + Copy + 'static {
    /// The `#[repr]` integer type of the enum.
    type Repr: Copy;

    /// The discriminant of this variant
    fn to_underlying(self) -> Self::Repr;

    /// The discriminant as a bit index or shift amount
    fn index(self) -> usize;

    fn name(&self) -> &'static str;

    /// Every variant, in declaration order
    fn all() -> &'static [Self];
}

/// Convert a symbolic bit name to its underlying integer
pub fn to_underlying<E: RegisterEnum>(value: E) -> E::Repr {
    value.to_underlying()
}

//! Declarative macros for register definitions

/// Define an enum of symbolic bit positions
///
/// # Example
/// ```
/// use mmreg_raw::{register_enum, RegisterEnum};
///
/// register_enum! {
///     pub enum TimerControl: u32 {
///         Enable = 0,
///         Interrupt = 1,
///         Overflow = 16,
///     }
/// }
///
/// assert_eq!(mmreg_raw::to_underlying(TimerControl::Overflow), 16);
/// assert_eq!(TimerControl::Interrupt.name(), "Interrupt");
/// assert_eq!(TimerControl::all().len(), 3);
/// ```
///
/// Expands to:
/// - A `#[repr($repr)]` enum with Debug, Clone, Copy, PartialEq, Eq, Hash derives
/// - A [`RegisterEnum`](crate::RegisterEnum) implementation, the only way to
///   obtain one
#[macro_export]
macro_rules! register_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $repr:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $value:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr($repr)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant = $value,)*
        }

        impl $crate::enums::__private::Sealed for $name {}

        impl $crate::RegisterEnum for $name {
            type Repr = $repr;

            fn to_underlying(self) -> $repr {
                self as $repr
            }

            fn index(self) -> usize {
                self as usize
            }

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)*
                }
            }

            fn all() -> &'static [Self] {
                &[$($name::$variant,)*]
            }
        }
    };
}

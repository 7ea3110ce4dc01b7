//! Errors raised when binding or indexing a register

pub type Result<T> = core::result::Result<T, RegisterError>;

/// Errors that can occur while configuring register access
///
/// Both conditions are reported at the point of binding or indexing, never
/// deferred to the next read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("Invalid register address 0x{address:X}: {reason}")]
    InvalidAddress {
        address: usize,
        reason: &'static str,
    },

    #[error("Bit index {index} is out of range for a {width}-bit register")]
    OutOfRangeBitIndex { index: usize, width: usize },
}

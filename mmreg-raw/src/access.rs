//! Access capability tags
//!
//! A register's access mode is a type parameter. Operations are implemented
//! only for the tags that grant them, so writing to a [`ReadOnly`] register
//! or reading a [`WriteOnly`] one is rejected at compile time.

mod sealed {
    pub trait Sealed {}
}

/// Implemented by every access tag.
pub trait Access: sealed::Sealed {
    /// Human-readable name used in diagnostics.
    const NAME: &'static str;
}

/// Tags that permit reading the register.
pub trait Readable: Access {}

/// Tags that permit writing the register.
pub trait Writable: Access {}

/// The register can only be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReadOnly;

/// The register can only be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WriteOnly;

/// The register can be read and written; the union of [`ReadOnly`] and
/// [`WriteOnly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReadWrite;

impl sealed::Sealed for ReadOnly {}
impl sealed::Sealed for WriteOnly {}
impl sealed::Sealed for ReadWrite {}

impl Access for ReadOnly {
    const NAME: &'static str = "ReadOnly";
}

impl Access for WriteOnly {
    const NAME: &'static str = "WriteOnly";
}

impl Access for ReadWrite {
    const NAME: &'static str = "ReadWrite";
}

impl Readable for ReadOnly {}
impl Readable for ReadWrite {}

impl Writable for WriteOnly {}
impl Writable for ReadWrite {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_readable<A: Readable>() {}
    fn assert_writable<A: Writable>() {}

    #[test]
    fn test_access_tags_are_zero_sized() {
        assert_eq!(core::mem::size_of::<ReadOnly>(), 0);
        assert_eq!(core::mem::size_of::<WriteOnly>(), 0);
        assert_eq!(core::mem::size_of::<ReadWrite>(), 0);
    }

    #[test]
    fn test_read_write_is_union() {
        assert_readable::<ReadOnly>();
        assert_writable::<WriteOnly>();
        assert_readable::<ReadWrite>();
        assert_writable::<ReadWrite>();
        assert_eq!(ReadWrite::NAME, "ReadWrite");
    }
}

//! Single-bit access into a register

use num_traits::{One, Zero};

use crate::access::{Access, Readable, Writable};
use crate::register::Register;
use crate::width::{Bits, Width, Word};

/// A view of one bit of a [`Register`]
///
/// Created by [`Register::bit`] or [`Register::field`]. It stores no value of
/// its own: reads go to the owning register and writes are read-modify-write
/// sequences that leave every other bit untouched. The view mutably borrows
/// its register, so it cannot outlive it or survive a rebind.
#[derive(Debug)]
pub struct Bitfield<'r, const N: usize, A: Access>
where
    Bits<N>: Width,
{
    owner: &'r mut Register<N, A>,
    index: usize,
}

impl<'r, const N: usize, A: Access> Bitfield<'r, N, A>
where
    Bits<N>: Width,
{
    /// `index` must already be checked against `N`.
    pub(crate) fn new(owner: &'r mut Register<N, A>, index: usize) -> Self {
        debug_assert!(index < N);
        Self { owner, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn mask(&self) -> Word<N> {
        Word::<N>::one() << self.index
    }
}

impl<const N: usize, A: Readable> Bitfield<'_, N, A>
where
    Bits<N>: Width,
{
    /// Whether the bit is currently set in the hardware word
    #[track_caller]
    pub fn read(&self) -> bool {
        (self.owner.read() & self.mask()) != Word::<N>::zero()
    }
}

/// Bit writes are read-modify-write on the owning register and are not
/// atomic.
impl<const N: usize, A: Readable + Writable> Bitfield<'_, N, A>
where
    Bits<N>: Width,
{
    /// Clear the bit if `value` is zero, set it otherwise
    #[track_caller]
    pub fn write(&mut self, value: Word<N>) {
        if value.is_zero() {
            self.clear();
        } else {
            self.set();
        }
    }

    #[track_caller]
    pub fn set(&mut self) {
        let mask = self.mask();
        self.owner.or_assign(mask);
    }

    #[track_caller]
    pub fn clear(&mut self) {
        let mask = self.mask();
        self.owner.and_assign(!mask);
    }

    #[track_caller]
    pub fn toggle(&mut self) {
        let mask = self.mask();
        self.owner.xor_assign(mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::ReadOnly;
    use crate::error::Result;
    use core::cell::Cell;

    fn bound<const N: usize, A: Access>(cell: &Cell<Word<N>>) -> Register<N, A>
    where
        Bits<N>: Width,
    {
        unsafe { Register::new(cell.as_ptr() as usize).unwrap() }
    }

    #[test]
    fn test_set_and_clear_bits() -> Result<()> {
        let cell = Cell::new(0u32);
        let mut reg: Register<32> = bound(&cell);

        reg.write(0);
        reg.bit(0)?.write(1);
        reg.bit(1)?.write(1);
        reg.bit(2)?.write(0);
        assert_eq!(reg.read(), 0b011);

        reg.write(0);
        reg.bit(1)?.write(1);
        reg.bit(2)?.write(1);
        reg.bit(0)?.write(0);
        assert_eq!(reg.read(), 0b110);
        Ok(())
    }

    #[test]
    fn test_each_bit_in_isolation() -> Result<()> {
        let cell = Cell::new(0u64);
        let mut reg: Register<64> = bound(&cell);

        for i in 0..64 {
            reg.write(0);
            reg.bit(i)?.set();
            assert_eq!(reg.read(), 1u64 << i);
            assert!(reg.bit(i)?.read());

            reg.bit(i)?.clear();
            assert_eq!(reg.read(), 0);
        }
        Ok(())
    }

    #[test]
    fn test_bit_write_preserves_other_bits() -> Result<()> {
        let cell = Cell::new(0u8);
        let mut reg: Register<8> = bound(&cell);

        reg.bit(7)?.set();
        reg.bit(3)?.set();
        reg.bit(0)?.write(0xFF);
        assert_eq!(cell.get(), 0b1000_1001);

        reg.bit(3)?.clear();
        assert_eq!(cell.get(), 0b1000_0001);

        reg.bit(7)?.toggle();
        assert_eq!(cell.get(), 0b0000_0001);
        Ok(())
    }

    #[test]
    fn test_read_only_bitfield() -> Result<()> {
        let cell = Cell::new(0x8000u16);
        let mut status: Register<16, ReadOnly> = bound(&cell);

        assert!(status.bit(15)?.read());
        assert!(!status.bit(14)?.read());
        assert_eq!(status.bit(15)?.index(), 15);
        Ok(())
    }

    #[test]
    fn test_bitfield_debug_format() -> Result<()> {
        let cell = Cell::new(0u32);
        let mut reg: Register<32> = bound(&cell);

        let text = format!("{:?}", reg.bit(5)?);
        assert!(text.contains("index: 5"));
        assert!(text.contains("width: 32"));
        Ok(())
    }
}

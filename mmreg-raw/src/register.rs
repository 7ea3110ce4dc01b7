//! Generic register abstraction for type-safe MMIO programming

use core::fmt;
use core::marker::PhantomData;
use core::num::NonZeroUsize;
use core::ops::{BitAndAssign, BitOrAssign, BitXorAssign};

use num_traits::{One, WrappingAdd, WrappingSub};

use crate::access::{Access, ReadWrite, Readable, Writable};
use crate::bitfield::Bitfield;
use crate::enums::RegisterEnum;
use crate::error::{RegisterError, Result};
use crate::layout::RegisterLayout;
use crate::mmio;
use crate::width::{Bits, Width, Word};

/// A memory-mapped hardware register `N` bits wide with access mode `A`
///
/// A `Register` is a non-owning handle: it stores the address of a hardware
/// word and nothing else. It starts out either unbound or bound, and can be
/// rebound to another address at any time with [`set_address`]. Dropping a
/// register never touches the hardware.
///
/// Which operations exist depends on `A`:
///
/// | Operation                                   | Requires                 |
/// |---------------------------------------------|--------------------------|
/// | [`read`], [`read_as`]                       | [`Readable`]             |
/// | [`write`], [`write_as`]                     | [`Writable`]             |
/// | `or`/`and`/`xor`/`add`/`sub`, inc/dec, etc. | [`Readable`] + [`Writable`] |
/// | [`bit`], [`field`]                          | any                      |
///
/// # Example
///
/// ```ignore
/// use mmreg_raw::{Register, ReadWrite};
///
/// // SAFETY: 0x4001_0000 is a 32-bit read/write peripheral register.
/// let mut ctrl = unsafe { Register::<32, ReadWrite>::new(0x4001_0000)? };
///
/// ctrl.write(0);          // full overwrite
/// ctrl |= 1 << 4;         // read-modify-write
/// ctrl.bit(0)?.set();     // single bit, other bits preserved
/// ```
///
/// # Panics
///
/// Every access through an unbound register panics.
///
/// [`set_address`]: Register::set_address
/// [`read`]: Register::read
/// [`read_as`]: Register::read_as
/// [`write`]: Register::write
/// [`write_as`]: Register::write_as
/// [`bit`]: Register::bit
/// [`field`]: Register::field
pub struct Register<const N: usize, A: Access = ReadWrite>
where
    Bits<N>: Width,
{
    address: Option<NonZeroUsize>,
    _access: PhantomData<A>,
}

impl<const N: usize, A: Access> Register<N, A>
where
    Bits<N>: Width,
{
    /// Width of the register in bits
    pub const WIDTH: usize = N;

    /// Create a register that is not yet bound to an address
    ///
    /// It must be bound with [`bind`](Self::bind) or
    /// [`set_address`](Self::set_address) before use.
    pub const fn unbound() -> Self {
        Self {
            address: None,
            _access: PhantomData,
        }
    }

    /// Create a register bound to `address`
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::InvalidAddress`] if the address is null or
    /// not aligned to the register width.
    ///
    /// # Safety
    ///
    /// `address` must refer to a hardware register (or memory) that is valid
    /// for volatile `N`-bit accesses for as long as this register is bound
    /// to it.
    pub unsafe fn new(address: usize) -> Result<Self> {
        Self::unbound().bind(address)
    }

    /// Bind an unbound register, consuming it
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    ///
    /// # Safety
    ///
    /// See [`new`](Self::new).
    pub unsafe fn bind(mut self, address: usize) -> Result<Self> {
        self.set_address(address)?;
        Ok(self)
    }

    /// Point the register at a new address
    ///
    /// On error the previous binding is kept.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    ///
    /// # Safety
    ///
    /// See [`new`](Self::new).
    pub unsafe fn set_address(&mut self, address: usize) -> Result<()> {
        let address = mmio::validate_address::<Word<N>>(address)?;

        tracing::debug!(
            "Bound {}-bit {} register to 0x{:08x}",
            N,
            A::NAME,
            address.get()
        );

        self.address = Some(address);
        Ok(())
    }

    /// The bound address, or `None` while unbound
    pub fn address(&self) -> Option<usize> {
        self.address.map(NonZeroUsize::get)
    }

    pub fn is_bound(&self) -> bool {
        self.address.is_some()
    }

    /// Borrow a single bit of this register
    ///
    /// The returned [`Bitfield`] holds a mutable borrow, so the register
    /// cannot be rebound while it is alive.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::OutOfRangeBitIndex`] if `index >= N`.
    pub fn bit(&mut self, index: usize) -> Result<Bitfield<'_, N, A>> {
        if index >= N {
            return Err(RegisterError::OutOfRangeBitIndex { index, width: N });
        }

        Ok(Bitfield::new(self, index))
    }

    /// Borrow the bit named by a symbolic register enum
    ///
    /// # Errors
    ///
    /// See [`bit`](Self::bit).
    pub fn field<E: RegisterEnum>(&mut self, bit: E) -> Result<Bitfield<'_, N, A>> {
        self.bit(bit.index())
    }

    #[track_caller]
    fn bound_address(&self) -> NonZeroUsize {
        match self.address {
            Some(address) => address,
            None => panic!(
                "{}-bit {} register accessed before being bound to an address",
                N,
                A::NAME
            ),
        }
    }
}

impl<const N: usize, A: Readable> Register<N, A>
where
    Bits<N>: Width,
{
    /// Read the full register word
    #[track_caller]
    pub fn read(&self) -> Word<N> {
        let address = self.bound_address();
        // Validity of the address was promised when it was bound.
        unsafe { mmio::read(address) }
    }

    /// Read the register and decode it as a typed layout
    #[track_caller]
    pub fn read_as<L: RegisterLayout<N>>(&self) -> L {
        L::from_register_value(self.read())
    }
}

impl<const N: usize, A: Writable> Register<N, A>
where
    Bits<N>: Width,
{
    /// Overwrite the full register word
    ///
    /// This is not a merge: every bit not set in `value` is cleared.
    #[track_caller]
    pub fn write(&mut self, value: Word<N>) {
        let address = self.bound_address();
        // Validity of the address was promised when it was bound.
        unsafe { mmio::write(address, value) }
    }

    /// Encode a typed layout and overwrite the register with it
    #[track_caller]
    pub fn write_as<L: RegisterLayout<N>>(&mut self, layout: &L) {
        self.write(layout.to_register_value());
    }
}

/// Read-modify-write operations.
///
/// None of these are atomic. If an interrupt handler writes the same register
/// between the read and the write, its update is lost; wrap the call in a
/// critical section where that can happen.
impl<const N: usize, A: Readable + Writable> Register<N, A>
where
    Bits<N>: Width,
{
    /// Read the register, transform the value and write it back
    ///
    /// Returns the value written.
    #[track_caller]
    pub fn modify(&mut self, f: impl FnOnce(Word<N>) -> Word<N>) -> Word<N> {
        let value = f(self.read());
        self.write(value);
        value
    }

    /// `write(read() | mask)`
    #[track_caller]
    pub fn or_assign(&mut self, mask: Word<N>) {
        self.modify(|value| value | mask);
    }

    /// `write(read() & mask)`
    #[track_caller]
    pub fn and_assign(&mut self, mask: Word<N>) {
        self.modify(|value| value & mask);
    }

    /// `write(read() ^ mask)`
    #[track_caller]
    pub fn xor_assign(&mut self, mask: Word<N>) {
        self.modify(|value| value ^ mask);
    }

    /// `write(read() + rhs)`, wrapping at the register width
    #[track_caller]
    pub fn add_assign(&mut self, rhs: Word<N>) {
        self.modify(|value| value.wrapping_add(&rhs));
    }

    /// `write(read() - rhs)`, wrapping at the register width
    #[track_caller]
    pub fn sub_assign(&mut self, rhs: Word<N>) {
        self.modify(|value| value.wrapping_sub(&rhs));
    }

    /// `write(!read())`
    #[track_caller]
    pub fn invert(&mut self) {
        self.modify(|value| !value);
    }

    /// Add one and return the new value
    #[track_caller]
    pub fn pre_increment(&mut self) -> Word<N> {
        self.modify(|value| value.wrapping_add(&Word::<N>::one()))
    }

    /// Add one and return the value before the increment
    #[track_caller]
    pub fn post_increment(&mut self) -> Word<N> {
        let old = self.read();
        self.write(old.wrapping_add(&Word::<N>::one()));
        old
    }

    /// Subtract one and return the new value
    #[track_caller]
    pub fn pre_decrement(&mut self) -> Word<N> {
        self.modify(|value| value.wrapping_sub(&Word::<N>::one()))
    }

    /// Subtract one and return the value before the decrement
    #[track_caller]
    pub fn post_decrement(&mut self) -> Word<N> {
        let old = self.read();
        self.write(old.wrapping_sub(&Word::<N>::one()));
        old
    }
}

impl<const N: usize, A: Readable + Writable> BitOrAssign<Word<N>> for Register<N, A>
where
    Bits<N>: Width,
{
    fn bitor_assign(&mut self, mask: Word<N>) {
        self.or_assign(mask);
    }
}

impl<const N: usize, A: Readable + Writable> BitAndAssign<Word<N>> for Register<N, A>
where
    Bits<N>: Width,
{
    fn bitand_assign(&mut self, mask: Word<N>) {
        self.and_assign(mask);
    }
}

impl<const N: usize, A: Readable + Writable> BitXorAssign<Word<N>> for Register<N, A>
where
    Bits<N>: Width,
{
    fn bitxor_assign(&mut self, mask: Word<N>) {
        self.xor_assign(mask);
    }
}

impl<const N: usize, A: Access> Default for Register<N, A>
where
    Bits<N>: Width,
{
    fn default() -> Self {
        Self::unbound()
    }
}

impl<const N: usize, A: Access> fmt::Debug for Register<N, A>
where
    Bits<N>: Width,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Register");
        s.field("width", &N).field("access", &A::NAME);
        match self.address {
            Some(address) => s.field("address", &format_args!("0x{:08x}", address.get())),
            None => s.field("address", &"unbound"),
        };
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{ReadOnly, WriteOnly};
    use core::cell::Cell;

    fn bound<const N: usize, A: Access>(cell: &Cell<Word<N>>) -> Register<N, A>
    where
        Bits<N>: Width,
    {
        unsafe { Register::new(cell.as_ptr() as usize).unwrap() }
    }

    #[test]
    fn test_write_then_read() {
        let cell = Cell::new(0u32);
        let mut reg: Register<32> = bound(&cell);

        reg.write(0xABCD);
        assert_eq!(reg.read(), 0xABCD);
        assert_eq!(cell.get(), 0xABCD);
    }

    #[test]
    fn test_write_then_read_every_width() {
        let c8 = Cell::new(0u8);
        let mut r8: Register<8> = bound(&c8);
        r8.write(u8::MAX);
        assert_eq!(r8.read(), u8::MAX);

        let c16 = Cell::new(0u16);
        let mut r16: Register<16> = bound(&c16);
        r16.write(0x8001);
        assert_eq!(r16.read(), 0x8001);

        let c64 = Cell::new(0u64);
        let mut r64: Register<64> = bound(&c64);
        r64.write(0xDEAD_BEEF_0000_0001);
        assert_eq!(r64.read(), 0xDEAD_BEEF_0000_0001);
    }

    #[test]
    fn test_write_overwrites_whole_word() {
        let cell = Cell::new(0xFFFF_FFFFu32);
        let mut reg: Register<32> = bound(&cell);

        reg.write(0x10);
        assert_eq!(reg.read(), 0x10);
    }

    #[test]
    fn test_or_assign() {
        let cell = Cell::new(0u32);
        let mut reg: Register<32> = bound(&cell);

        reg.write(0xAAAA);
        reg.or_assign(0x5555);
        assert_eq!(reg.read(), 0xFFFF);
    }

    #[test]
    fn test_and_assign() {
        let cell = Cell::new(0u32);
        let mut reg: Register<32> = bound(&cell);

        reg.write(0xFFFF);
        reg.and_assign(0x5555);
        assert_eq!(reg.read(), 0x5555);
    }

    #[test]
    fn test_xor_assign() {
        let cell = Cell::new(0u16);
        let mut reg: Register<16> = bound(&cell);

        reg.write(0x0FF0);
        reg.xor_assign(0x00FF);
        assert_eq!(reg.read(), 0x0F0F);
    }

    #[test]
    fn test_compound_operators_match_methods() {
        let a = Cell::new(0x1234_5678u32);
        let b = Cell::new(0x1234_5678u32);
        let mut by_op: Register<32> = bound(&a);
        let mut by_method: Register<32> = bound(&b);

        by_op |= 0x0F00_0000;
        by_method.or_assign(0x0F00_0000);
        by_op &= 0xFFFF_00FF;
        by_method.and_assign(0xFFFF_00FF);
        by_op ^= 0x0000_0101;
        by_method.xor_assign(0x0000_0101);

        assert_eq!(by_op.read(), by_method.read());
        assert_eq!(a.get(), ((0x1234_5678 | 0x0F00_0000) & 0xFFFF_00FF) ^ 0x0000_0101);
    }

    #[test]
    fn test_increment_and_decrement() {
        let cell = Cell::new(0x10u32);
        let mut reg: Register<32> = bound(&cell);

        assert_eq!(reg.pre_increment(), 0x11);
        assert_eq!(reg.post_increment(), 0x11);
        assert_eq!(reg.read(), 0x12);

        assert_eq!(reg.post_decrement(), 0x12);
        assert_eq!(reg.pre_decrement(), 0x10);
        assert_eq!(reg.read(), 0x10);
    }

    #[test]
    fn test_increment_wraps_at_width() {
        let cell = Cell::new(u8::MAX);
        let mut reg: Register<8> = bound(&cell);

        assert_eq!(reg.post_increment(), u8::MAX);
        assert_eq!(reg.read(), 0);
        assert_eq!(reg.pre_decrement(), u8::MAX);
    }

    #[test]
    fn test_add_sub_invert_modify() {
        let cell = Cell::new(0u16);
        let mut reg: Register<16> = bound(&cell);

        reg.add_assign(0xFFFE);
        reg.add_assign(3);
        assert_eq!(reg.read(), 1);

        reg.sub_assign(2);
        assert_eq!(reg.read(), 0xFFFF);

        reg.invert();
        assert_eq!(reg.read(), 0);

        assert_eq!(reg.modify(|v| v | 0x8000), 0x8000);
        assert_eq!(cell.get(), 0x8000);
    }

    #[test]
    fn test_read_only_and_write_only() {
        let cell = Cell::new(0x42u32);
        let status: Register<32, ReadOnly> = bound(&cell);
        assert_eq!(status.read(), 0x42);

        let mut data: Register<32, WriteOnly> = bound(&cell);
        data.write(0x99);
        assert_eq!(status.read(), 0x99);
    }

    #[test]
    fn test_bind_rejects_null() {
        let err = unsafe { Register::<32>::new(0) }.unwrap_err();
        assert!(matches!(err, RegisterError::InvalidAddress { address: 0, .. }));
    }

    #[test]
    fn test_bind_rejects_misaligned() {
        let cells = [Cell::new(0u32), Cell::new(0u32)];
        let misaligned = cells.as_ptr() as usize + 1;
        assert!(unsafe { Register::<32>::new(misaligned) }.is_err());
    }

    #[test]
    fn test_unbound_register() {
        let reg = Register::<32>::unbound();
        assert!(!reg.is_bound());
        assert_eq!(reg.address(), None);

        let reg = Register::<16, ReadOnly>::default();
        assert!(!reg.is_bound());
    }

    #[test]
    #[should_panic(expected = "before being bound")]
    fn test_unbound_read_panics() {
        let reg = Register::<32>::unbound();
        let _ = reg.read();
    }

    #[test]
    fn test_bind_unbound_register() {
        let cell = Cell::new(7u32);
        let reg = unsafe { Register::<32>::unbound().bind(cell.as_ptr() as usize) }.unwrap();

        assert_eq!(reg.address(), Some(cell.as_ptr() as usize));
        assert_eq!(reg.read(), 7);
    }

    #[test]
    fn test_set_address_redirects_access() {
        let first = Cell::new(0u32);
        let second = Cell::new(0u32);
        let mut reg: Register<32> = bound(&first);

        reg.write(1);
        unsafe { reg.set_address(second.as_ptr() as usize) }.unwrap();
        reg.write(2);

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(reg.address(), Some(second.as_ptr() as usize));
    }

    #[test]
    fn test_failed_rebind_keeps_binding() {
        let cell = Cell::new(5u32);
        let mut reg: Register<32> = bound(&cell);

        assert!(unsafe { reg.set_address(0) }.is_err());
        assert_eq!(reg.address(), Some(cell.as_ptr() as usize));
        assert_eq!(reg.read(), 5);
    }

    #[test]
    fn test_bit_index_out_of_range() {
        let cell = Cell::new(0u8);
        let mut reg: Register<8> = bound(&cell);

        assert!(reg.bit(7).is_ok());
        let err = reg.bit(8).unwrap_err();
        assert_eq!(err, RegisterError::OutOfRangeBitIndex { index: 8, width: 8 });
    }

    crate::register_enum! {
        enum Wide: u8 {
            Low = 0,
            High = 64,
        }
    }

    #[test]
    fn test_field_beyond_width_is_rejected() {
        let c8 = Cell::new(0u8);
        let mut r8: Register<8> = bound(&c8);
        assert!(r8.field(Wide::Low).is_ok());
        let err = r8.field(Wide::High).unwrap_err();
        assert_eq!(err, RegisterError::OutOfRangeBitIndex { index: 64, width: 8 });

        let c64 = Cell::new(0u64);
        let mut r64: Register<64> = bound(&c64);
        assert!(r64.field(Wide::High).is_err());
    }

    #[test]
    fn test_debug_format() {
        let reg = Register::<32, ReadOnly>::unbound();
        let text = format!("{reg:?}");
        assert!(text.contains("width: 32"));
        assert!(text.contains("ReadOnly"));
        assert!(text.contains("unbound"));
    }
}

//! SysTick register block layout

use mmreg_raw::{
    register_enum, to_underlying, ReadWrite, Register, RegisterError, RegisterLayout,
};

/// Architectural base address of the SysTick block on Cortex-M parts
pub const SYSTICK_BASE: usize = 0xE000_E010;

/// Byte offsets of each register from the block base
pub mod offset {
    pub const CSR: usize = 0x0;
    pub const RVR: usize = 0x4;
    pub const CVR: usize = 0x8;
    pub const CALIB: usize = 0xC;
}

/// Size of the register block in bytes
pub const BLOCK_SIZE: usize = 0x10;

/// The reload register implements 24 bits; a reload of 0 never fires.
pub const RELOAD_MIN: u32 = 1;
pub const RELOAD_MAX: u32 = 0x00FF_FFFF;

/// Width mask of the TENMS field in the calibration register
pub const TENMS_MASK: u32 = 0x00FF_FFFF;

register_enum! {
    /// Bits of the control and status register (CSR)
    pub enum SystickControl: u32 {
        Enable = 0,
        Tickint = 1,
        Clksource = 2,
        /// Set when the counter reaches zero
        Countflag = 16,
    }
}

register_enum! {
    /// Fields of the calibration value register
    pub enum SystickCalib: u32 {
        Tenms = 0,
        Skew = 30,
        Noref = 31,
    }
}

/// The four SysTick registers
///
/// The registers are created unbound and then bound together by
/// [`rebase`](Self::rebase), so the whole block always points at one base.
#[derive(Debug, Default)]
pub struct SystickRegisters {
    /// Control and status register
    pub csr: Register<32, ReadWrite>,
    /// Reload value register
    pub rvr: Register<32, ReadWrite>,
    /// Current value register
    pub cvr: Register<32, ReadWrite>,
    /// Calibration value register
    pub calib: Register<32, ReadWrite>,
}

impl SystickRegisters {
    pub const fn unbound() -> Self {
        Self {
            csr: Register::unbound(),
            rvr: Register::unbound(),
            cvr: Register::unbound(),
            calib: Register::unbound(),
        }
    }

    /// Create a block bound at `base`
    ///
    /// # Safety
    ///
    /// `base..base + BLOCK_SIZE` must be valid for volatile 32-bit accesses
    /// for as long as the registers stay bound to it.
    pub unsafe fn at(base: usize) -> mmreg_raw::Result<Self> {
        let mut regs = Self::unbound();
        regs.rebase(base)?;
        Ok(regs)
    }

    /// Bind all four registers relative to `base`
    ///
    /// Either every register is rebound or, on error, none is.
    ///
    /// # Safety
    ///
    /// See [`at`](Self::at).
    pub unsafe fn rebase(&mut self, base: usize) -> mmreg_raw::Result<()> {
        let bind = |offset: usize| -> mmreg_raw::Result<Register<32, ReadWrite>> {
            let address = base
                .checked_add(offset)
                .ok_or(RegisterError::InvalidAddress {
                    address: base,
                    reason: "register block overflows the address space",
                })?;
            unsafe { Register::new(address) }
        };

        let csr = bind(offset::CSR)?;
        let rvr = bind(offset::RVR)?;
        let cvr = bind(offset::CVR)?;
        let calib = bind(offset::CALIB)?;

        *self = Self {
            csr,
            rvr,
            cvr,
            calib,
        };

        tracing::debug!("SysTick register block bound at 0x{:08x}", base);
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.csr.is_bound() && self.rvr.is_bound() && self.cvr.is_bound() && self.calib.is_bound()
    }

    /// Base address of the block, or `None` while unbound
    pub fn base_address(&self) -> Option<usize> {
        self.csr.address().map(|address| address - offset::CSR)
    }
}

/// Decoded calibration value register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calibration {
    /// Reload value for a 10ms period, 0 if unknown
    pub ten_ms: u32,
    /// TENMS is inexact because of the clock frequency
    pub skew: bool,
    /// No separate reference clock is provided
    pub no_ref: bool,
}

impl RegisterLayout<32> for Calibration {
    fn to_register_value(&self) -> u32 {
        ((self.ten_ms & TENMS_MASK) << to_underlying(SystickCalib::Tenms))
            | (u32::from(self.skew) << to_underlying(SystickCalib::Skew))
            | (u32::from(self.no_ref) << to_underlying(SystickCalib::Noref))
    }

    fn from_register_value(value: u32) -> Self {
        Self {
            ten_ms: (value >> to_underlying(SystickCalib::Tenms)) & TENMS_MASK,
            skew: (value >> to_underlying(SystickCalib::Skew)) & 1 != 0,
            no_ref: (value >> to_underlying(SystickCalib::Noref)) & 1 != 0,
        }
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.ten_ms > TENMS_MASK {
            return Err("TENMS must fit in 24 bits");
        }
        Ok(())
    }
}

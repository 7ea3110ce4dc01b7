//! Host-memory stand-in for the SysTick register block
//!
//! [`SimulatedBlock`] owns four plain words laid out like the hardware block,
//! so the driver can be bound to its base address and run on the host.
//! [`SystickModel`] plays the part of the counter hardware on that memory.

use std::cell::Cell;

use mmreg_raw::to_underlying;

use crate::driver::registers::{offset, BLOCK_SIZE, RELOAD_MAX};
use crate::driver::SystickControl;

const WORDS: usize = BLOCK_SIZE / 4;

/// Four 32-bit words at a stable heap address
#[derive(Debug, Default)]
pub struct SimulatedBlock {
    words: Box<[Cell<u32>; WORDS]>,
}

impl SimulatedBlock {
    /// A block with every register reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// A block whose calibration register reads `calib`
    pub fn with_calibration(calib: u32) -> Self {
        let block = Self::new();
        block.word(offset::CALIB).set(calib);
        block
    }

    /// Address to bind the driver to
    ///
    /// Stays the same for the lifetime of the block, including across moves.
    pub fn base_address(&self) -> usize {
        self.words.as_ptr() as usize
    }

    pub fn csr(&self) -> u32 {
        self.word(offset::CSR).get()
    }

    pub fn rvr(&self) -> u32 {
        self.word(offset::RVR).get()
    }

    pub fn cvr(&self) -> u32 {
        self.word(offset::CVR).get()
    }

    pub fn calib(&self) -> u32 {
        self.word(offset::CALIB).get()
    }

    fn word(&self, offset: usize) -> &Cell<u32> {
        &self.words[offset / 4]
    }
}

fn control_mask(bit: SystickControl) -> u32 {
    1 << to_underlying(bit)
}

/// Countdown behaviour of the SysTick counter on a [`SimulatedBlock`]
///
/// While CSR.ENABLE is set each tick decrements CVR. When CVR reaches zero
/// CSR.COUNTFLAG is set and the next tick reloads CVR from RVR. A CVR of zero
/// on enable also reloads on the first tick.
#[derive(Debug)]
pub struct SystickModel<'b> {
    block: &'b SimulatedBlock,
    interrupts: u64,
}

impl<'b> SystickModel<'b> {
    pub fn new(block: &'b SimulatedBlock) -> Self {
        Self {
            block,
            interrupts: 0,
        }
    }

    /// Advance the counter by one clock
    ///
    /// Returns `true` if the counter reached zero on this tick.
    pub fn tick(&mut self) -> bool {
        let csr = self.block.word(offset::CSR);
        if csr.get() & control_mask(SystickControl::Enable) == 0 {
            return false;
        }

        let cvr = self.block.word(offset::CVR);
        if cvr.get() == 0 {
            cvr.set(self.block.rvr() & RELOAD_MAX);
            return false;
        }

        let next = cvr.get() - 1;
        cvr.set(next);
        if next != 0 {
            return false;
        }

        csr.set(csr.get() | control_mask(SystickControl::Countflag));
        if csr.get() & control_mask(SystickControl::Tickint) != 0 {
            self.interrupts += 1;
            tracing::trace!("SysTick interrupt raised ({} total)", self.interrupts);
        }
        true
    }

    /// Advance by `ticks` clocks and return how many times the counter
    /// reached zero
    pub fn advance(&mut self, ticks: u64) -> u64 {
        (0..ticks).filter(|_| self.tick()).count() as u64
    }

    /// Read COUNTFLAG and clear it, as a hardware read of CSR does
    pub fn acknowledge(&self) -> bool {
        let csr = self.block.word(offset::CSR);
        let mask = control_mask(SystickControl::Countflag);
        let was_set = csr.get() & mask != 0;
        csr.set(csr.get() & !mask);
        was_set
    }

    /// Interrupts raised so far with CSR.TICKINT set
    pub fn interrupts(&self) -> u64 {
        self.interrupts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enable(block: &SimulatedBlock, reload: u32) {
        block.word(offset::RVR).set(reload);
        block.word(offset::CVR).set(0);
        block.word(offset::CSR).set(
            control_mask(SystickControl::Enable) | control_mask(SystickControl::Tickint),
        );
    }

    #[test]
    fn test_base_address_is_stable_across_moves() {
        let block = SimulatedBlock::new();
        let base = block.base_address();
        let moved = block;
        assert_eq!(moved.base_address(), base);
        assert_eq!(base % 4, 0);
    }

    #[test]
    fn test_with_calibration() {
        let block = SimulatedBlock::with_calibration(0xC000_2710);
        assert_eq!(block.calib(), 0xC000_2710);
        assert_eq!(block.csr(), 0);
    }

    #[test]
    fn test_disabled_counter_does_not_move() {
        let block = SimulatedBlock::new();
        block.word(offset::RVR).set(10);
        block.word(offset::CVR).set(5);

        let mut model = SystickModel::new(&block);
        assert_eq!(model.advance(100), 0);
        assert_eq!(block.cvr(), 5);
    }

    #[test]
    fn test_countdown_and_reload() {
        let block = SimulatedBlock::new();
        enable(&block, 3);
        let mut model = SystickModel::new(&block);

        // First tick loads the reload value.
        assert!(!model.tick());
        assert_eq!(block.cvr(), 3);

        assert!(!model.tick());
        assert!(!model.tick());
        assert!(model.tick());
        assert_eq!(block.cvr(), 0);
        assert_ne!(block.csr() & control_mask(SystickControl::Countflag), 0);

        assert!(!model.tick());
        assert_eq!(block.cvr(), 3);
    }

    #[test]
    fn test_period_is_reload_plus_one() {
        let block = SimulatedBlock::new();
        enable(&block, 9);
        let mut model = SystickModel::new(&block);

        // Initial load, then one wrap per ten ticks.
        assert_eq!(model.advance(1 + 10 * 5), 5);
        assert_eq!(model.interrupts(), 5);
    }

    #[test]
    fn test_acknowledge_clears_countflag() {
        let block = SimulatedBlock::new();
        enable(&block, 1);
        let mut model = SystickModel::new(&block);

        model.advance(2);
        assert!(model.acknowledge());
        assert!(!model.acknowledge());
        assert_ne!(block.csr() & control_mask(SystickControl::Enable), 0);
    }

    #[test]
    fn test_no_interrupt_without_tickint() {
        let block = SimulatedBlock::new();
        block.word(offset::RVR).set(1);
        block.word(offset::CSR).set(control_mask(SystickControl::Enable));
        let mut model = SystickModel::new(&block);

        assert_eq!(model.advance(4), 2);
        assert_eq!(model.interrupts(), 0);
    }
}

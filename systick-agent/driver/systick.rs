use mmreg_raw::RegisterEnum;

use super::registers::{Calibration, SystickControl, SystickRegisters};
use crate::config::SystickConfig;
use crate::error::{Result, SystickError};

/// SysTick timer driver
///
/// Construction programs the reload value and clock source but leaves the
/// counter stopped; call [`enable`](Self::enable) to start it. Dropping the
/// driver stops the counter.
#[derive(Debug)]
pub struct Systick {
    regs: SystickRegisters,
    config: SystickConfig,
    reload: u32,
}

impl Systick {
    /// Bind the driver to the register block at `base` and initialize it
    ///
    /// # Safety
    ///
    /// `base` must be the base of a SysTick register block (or memory laid
    /// out like one) that stays valid for the lifetime of the driver.
    pub unsafe fn new(base: usize, config: SystickConfig) -> Result<Self> {
        let regs = SystickRegisters::at(base)?;
        Self::from_registers(regs, config)
    }

    /// Initialize the driver on an already bound register block
    pub fn from_registers(regs: SystickRegisters, config: SystickConfig) -> Result<Self> {
        config.validate()?;
        if !regs.is_bound() {
            return Err(SystickError::InvalidConfiguration(
                "SysTick register block is not bound".to_string(),
            ));
        }

        let mut systick = Self {
            regs,
            config,
            reload: config.reload_value(),
        };
        systick.init()?;
        Ok(systick)
    }

    fn init(&mut self) -> Result<()> {
        self.regs.csr.field(SystickControl::Clksource)?.write(1);
        self.regs.csr.field(SystickControl::Tickint)?.write(1);
        self.regs.rvr.write(self.reload);
        self.regs.cvr.write(0);

        tracing::info!(
            "SysTick initialized: clock {} Hz, tick rate {}, reload {}",
            self.config.system_clock_hz,
            self.tick_rate(),
            self.reload
        );
        Ok(())
    }

    /// Start the counter
    pub fn enable(&mut self) -> Result<()> {
        tracing::info!(
            "Enabling SysTick at 0x{:08x}",
            self.regs.base_address().unwrap_or_default()
        );
        self.regs.csr.field(SystickControl::Enable)?.set();
        Ok(())
    }

    /// Stop the counter
    pub fn disable(&mut self) -> Result<()> {
        self.regs.csr.field(SystickControl::Enable)?.clear();
        tracing::debug!("SysTick disabled");
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.csr_bit(SystickControl::Enable)
    }

    /// Read the control register to acknowledge the tick
    ///
    /// On hardware the read clears COUNTFLAG. Returns whether the flag was
    /// set.
    pub fn acknowledge_irq(&self) -> bool {
        self.csr_bit(SystickControl::Countflag)
    }

    /// Counter period in clocks, `RVR + 1`
    pub fn interval(&self) -> u32 {
        self.regs.rvr.read().wrapping_add(1)
    }

    /// Clocks elapsed in the current period, `RVR - CVR`
    pub fn count(&self) -> u32 {
        let load = self.regs.rvr.read();
        load.wrapping_sub(self.regs.cvr.read())
    }

    /// Whether the counter has reached zero since COUNTFLAG was last cleared
    pub fn overflow(&self) -> bool {
        self.csr_bit(SystickControl::Countflag)
    }

    pub fn calibration(&self) -> Calibration {
        self.regs.calib.read_as()
    }

    /// Reload value programmed at initialization
    pub fn reload(&self) -> u32 {
        self.reload
    }

    /// Tick frequency divided down by 1000, as used for the reload value
    pub fn tick_rate(&self) -> u32 {
        self.config.tick_rate_divisor()
    }

    pub fn config(&self) -> &SystickConfig {
        &self.config
    }

    fn csr_bit(&self, bit: SystickControl) -> bool {
        (self.regs.csr.read() >> bit.index()) & 1 != 0
    }
}

impl Drop for Systick {
    fn drop(&mut self) {
        if let Err(e) = self.disable() {
            tracing::error!("Failed to disable SysTick on drop: {}", e);
        }
    }
}

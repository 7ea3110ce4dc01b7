use crate::driver::registers::{RELOAD_MAX, RELOAD_MIN};
use crate::error::{Result, SystickError};

/// How a computed reload value is fitted into the reload register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Clamp into the 24-bit range the SysTick reload register implements
    #[default]
    Clamp24,
    /// Program the computed value as-is
    Unclamped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystickConfig {
    pub system_clock_hz: u32,
    pub tick_hz: u32,
    pub reload_policy: ReloadPolicy,
}

impl SystickConfig {
    /// Create a configuration with the default reload policy
    pub fn new(system_clock_hz: u32, tick_hz: u32) -> Self {
        Self {
            system_clock_hz,
            tick_hz,
            reload_policy: ReloadPolicy::default(),
        }
    }

    pub fn with_reload_policy(mut self, reload_policy: ReloadPolicy) -> Self {
        self.reload_policy = reload_policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.system_clock_hz == 0 {
            return Err(SystickError::InvalidConfiguration(
                "system clock frequency must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Tick frequency divided down by 1000, never zero
    pub fn tick_rate_divisor(&self) -> u32 {
        (self.tick_hz / 1000).max(1)
    }

    /// Value to program into the reload register
    ///
    /// `system_clock_hz / tick_rate_divisor() - 1`, fitted according to the
    /// reload policy.
    pub fn reload_value(&self) -> u32 {
        let raw = (self.system_clock_hz / self.tick_rate_divisor()).saturating_sub(1);

        match self.reload_policy {
            ReloadPolicy::Clamp24 => {
                let clamped = raw.clamp(RELOAD_MIN, RELOAD_MAX);
                if clamped != raw {
                    tracing::warn!(
                        "Reload value {} outside [{}, 0x{:06X}], clamped to {}",
                        raw,
                        RELOAD_MIN,
                        RELOAD_MAX,
                        clamped
                    );
                }
                clamped
            }
            ReloadPolicy::Unclamped => raw,
        }
    }
}

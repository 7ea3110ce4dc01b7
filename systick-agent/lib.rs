pub mod config;
pub mod driver;
pub mod error;
pub mod sim;

pub use config::{ReloadPolicy, SystickConfig};
pub use driver::{
    Calibration, Systick, SystickCalib, SystickControl, SystickRegisters, SYSTICK_BASE,
};
pub use error::{Result, SystickError};
pub use sim::{SimulatedBlock, SystickModel};

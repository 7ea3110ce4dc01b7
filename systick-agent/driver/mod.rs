pub mod registers;
pub mod systick;

pub use registers::{Calibration, SystickCalib, SystickControl, SystickRegisters, SYSTICK_BASE};
pub use systick::Systick;

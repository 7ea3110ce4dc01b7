use mmreg_raw::RegisterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SystickError {
    #[error("Register operation failed: {0}")]
    Register(#[from] RegisterError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, SystickError>;

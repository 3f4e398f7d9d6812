pub mod access;
pub mod input_validator;
pub mod keep;
pub mod logging;

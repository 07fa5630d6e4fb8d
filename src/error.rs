// binfp: software IEEE 754 arithmetic
//
// error.rs
//
// CLI-facing errors. The core (`Number`, `Context`) never fails — every
// input bit pattern decodes to something, every operation produces a
// canonical result — so every fallible step in this crate lives here,
// at the argument-parsing boundary.

use std::num::ParseIntError;

use thiserror::Error;

/// The exit code used for every rejected invocation.
pub const ERROR_ARGUMENTS_INVALID: i32 = 1;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{got} arguments instead of 3 or 5")]
    ArgCount { got: usize },

    #[error("{0} is incorrect format for mode")]
    BadModeLength(String),

    #[error("incorrect format: {0}")]
    BadModeChar(char),

    #[error("incorrect rounding: {0}")]
    BadRounding(String),

    #[error("{0} is incorrect format for operation")]
    BadOpLength(String),

    #[error("incorrect operation: {0}")]
    BadOpChar(char),

    #[error("incorrect hex literal for {which} operand: {text}")]
    BadHex { which: &'static str, text: String, #[source] source: ParseIntError },
}

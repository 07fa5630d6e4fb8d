// binfp: software IEEE 754 arithmetic
//
// cli.rs
//
// Argument parsing. The grammar is positional and arity-dependent
// (4 tokens for a bare decode, 6 for a binary operation) rather than
// flag-based, so it's parsed by hand instead of through a declarative
// argument parser.

use crate::error::CliError;
use crate::format::Format;
use crate::round::RoundingMode;

/// One parsed invocation: `<mode> <rounding> <hex> [<op> <hex>]`.
#[derive(Clone, Copy, Debug)]
pub struct Args {
    pub format: Format,
    pub mode: RoundingMode,
    pub bits_a: u32,
    pub op: Option<(char, u32)>,
}

impl Args {
    /// Parses the argv tail (`argv[1..]`).
    pub fn parse(argv: &[String]) -> Result<Args, CliError> {
        if argv.len() != 3 && argv.len() != 5 {
            return Err(CliError::ArgCount { got: argv.len() });
        }

        let format = parse_format(&argv[0])?;
        let mode = parse_rounding(&argv[1])?;
        let bits_a = parse_hex(&argv[2], "left")?;

        let op = if argv.len() == 5 {
            let op_char = parse_op(&argv[3])?;
            let bits_b = parse_hex(&argv[4], "right")?;
            Some((op_char, bits_b))
        } else {
            None
        };

        Ok(Args { format, mode, bits_a, op })
    }
}

fn parse_format(s: &str) -> Result<Format, CliError> {
    if s.chars().count() != 1 {
        return Err(CliError::BadModeLength(s.to_string()));
    }
    match s.chars().next().unwrap() {
        'f' => Ok(Format::Single),
        'h' => Ok(Format::Half),
        c => Err(CliError::BadModeChar(c)),
    }
}

fn parse_rounding(s: &str) -> Result<RoundingMode, CliError> {
    let code: i8 = s.parse().map_err(|_| CliError::BadRounding(s.to_string()))?;
    match code {
        0 => Ok(RoundingMode::TowardZero),
        1 => Ok(RoundingMode::NearestTiesToEven),
        2 => Ok(RoundingMode::TowardPositive),
        3 => Ok(RoundingMode::TowardNegative),
        _ => Err(CliError::BadRounding(s.to_string())),
    }
}

fn parse_op(s: &str) -> Result<char, CliError> {
    if s.chars().count() != 1 {
        return Err(CliError::BadOpLength(s.to_string()));
    }
    match s.chars().next().unwrap() {
        c @ ('+' | '-' | '*' | '/') => Ok(c),
        c => Err(CliError::BadOpChar(c)),
    }
}

fn parse_hex(s: &str, which: &'static str) -> Result<u32, CliError> {
    u32::from_str_radix(s, 16).map_err(|source| CliError::BadHex { which, text: s.to_string(), source })
}

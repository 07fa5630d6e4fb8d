/*!
`binfp` is a software implementation of IEEE 754 binary floating-point
arithmetic for two precisions, binary32 ("single") and binary16
("half"), supporting addition, subtraction, multiplication, and
division under all four IEEE rounding modes without relying on the
host's native float hardware.

Values are held in [`Number`], an extended-precision record wide
enough to carry the guard/round/sticky bits a correct rounding
decision needs. A [`Context`][crate::round::Context] bundles a
[`Format`] with a [`RoundingMode`] and exposes the four rounded
operations.
*/

pub mod cli;
pub mod error;
pub mod format;
pub mod number;
pub mod ops;
pub mod round;
pub mod text;

pub use crate::format::Format;
pub use crate::number::Number;
pub use crate::round::{Context, RoundingMode};

// binfp: software IEEE 754 arithmetic
//
// text.rs
//
// The encoder: renders a `Number` as the `0x1.hhhhhhp±E` hex
// scientific form the CLI prints, or one of the special-value
// spellings.

use crate::number::Number;

/// Formats `n` per the output grammar: `nan`, `[-]inf`, or
/// `[-]0x{0,1}.<hex>p<+/-E>`.
pub fn format_text(n: &Number) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_inf() {
        return if n.sign { "-inf".to_string() } else { "inf".to_string() };
    }
    if n.is_zero() {
        let sign = if n.sign { "-" } else { "" };
        return format!("{sign}0x0.{:0>width$}p+0", 0, width = n.format.print_hex_digits());
    }

    let mut v = *n;
    if v.is_subnormal() {
        v.normalize();
    }
    print_usual(&v)
}

fn print_usual(n: &Number) -> String {
    let f = n.format;
    let mask = (1i64 << (f.print_hex_digits() as u32 * 4)) - 1;
    let mant = (n.mant << f.print_pad_shift()) & mask;
    let sign = if n.sign { "-" } else { "" };
    format!("{sign}0x1.{:01$x}p{:+}", mant, f.print_hex_digits(), n.exp)
}

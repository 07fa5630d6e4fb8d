// binfp: software IEEE 754 arithmetic
//
// ops.rs
//
// The four arithmetic kernels. Each is a two-layer affair: a "special"
// wrapper that disposes of NaN/infinity/zero combinations per the
// usual IEEE rules, and an "abstract" kernel that produces a wide,
// not-yet-rounded `Number` handed to `Context::round`.

use std::cmp::min;

use crate::number::Number;
use crate::round::{mask, Context, RoundingMode};

impl Context {
    pub fn add(&self, a: &Number, b: &Number) -> Number {
        self.special_add(a, b)
    }

    pub fn sub(&self, a: &Number, b: &Number) -> Number {
        let mut b = *b;
        b.sign = !b.sign;
        self.special_add(a, &b)
    }

    pub fn mul(&self, a: &Number, b: &Number) -> Number {
        self.special_multiply(a, b)
    }

    pub fn div(&self, a: &Number, b: &Number) -> Number {
        self.special_divide(a, b)
    }

    fn special_add(&self, a: &Number, b: &Number) -> Number {
        let f = self.format;

        if a.is_nan() || b.is_nan() || (a.is_inf() && b.is_inf() && a.sign != b.sign) {
            return Number::nan(f);
        }
        if (a.mant == b.mant && a.exp == b.exp && a.sign != b.sign) || (a.is_zero() && b.is_zero() && a.sign != b.sign) {
            return Number::zero(self.mode == RoundingMode::TowardNegative, f);
        }
        if a.is_zero() {
            return *b;
        }
        if b.is_zero() {
            return *a;
        }
        if (a.is_inf() && a.sign) || (b.is_inf() && b.sign) {
            return Number::inf(true, f);
        }
        if (a.is_inf() && !a.sign) || (b.is_inf() && !b.sign) {
            return Number::inf(false, f);
        }

        let mut a = *a;
        let mut b = *b;
        a.renormalize_if_subnormal();
        b.renormalize_if_subnormal();

        let wide = self.abstract_add(&a, &b, f.w() as i32);
        self.round(wide)
    }

    /// Aligns `a` and `b` to a common exponent, adds or subtracts their
    /// mantissas per sign, and applies the directed-rounding correction
    /// for bits that alignment shifted out before the main rounder ever
    /// sees them.
    fn abstract_add(&self, a: &Number, b: &Number, mant_len: i32) -> Number {
        let mut copy_a = *a;
        let mut copy_b = *b;
        let mut diff = 0i32;
        let mut remainder = 0i64;

        if copy_a.exp > copy_b.exp {
            let r = to_one_exponent(&mut copy_a, &mut copy_b, mant_len);
            diff = r.0;
            remainder = r.1;
        } else if copy_a.exp < copy_b.exp {
            let r = to_one_exponent(&mut copy_b, &mut copy_a, mant_len);
            diff = r.0;
            remainder = r.1;
        } else {
            copy_a.mant <<= mant_len;
            copy_b.mant <<= mant_len;
        }

        let mut result = Number { mant: 0, exp: copy_a.exp, sign: false, normalized: true, format: a.format };

        if copy_a.sign == copy_b.sign {
            result.sign = copy_a.sign;
            result.mant = copy_a.mant + copy_b.mant;
            if ((self.mode == RoundingMode::TowardPositive && !result.sign)
                || (self.mode == RoundingMode::TowardNegative && result.sign))
                && remainder > 0
            {
                result.mant += 1;
            }
            self.check_rounding_add(&mut result, 1, diff, remainder, mant_len);
        } else {
            if copy_a.mant > copy_b.mant {
                result.sign = copy_a.sign;
                result.mant = copy_a.mant - copy_b.mant;
            } else {
                result.sign = copy_b.sign;
                result.mant = copy_b.mant - copy_a.mant;
            }
            if remainder > 0
                && ((!result.sign && self.mode == RoundingMode::TowardNegative)
                    || (result.sign && self.mode == RoundingMode::TowardPositive)
                    || self.mode == RoundingMode::TowardZero)
            {
                result.mant -= 1;
            }
            self.check_rounding_add(&mut result, -1, diff, remainder, mant_len);
        }

        add_zeros_to_length(&mut result, 1i64 << ((mant_len - 1) * 2));
        result.exp -= 1;
        result
    }

    /// A ties-to-even correction for the case where alignment shifted
    /// more bits out than the main rounder's own remainder tracks.
    fn check_rounding_add(&self, result: &mut Number, x: i64, diff: i32, remainder: i64, mant_len: i32) {
        if diff > mant_len && self.mode == RoundingMode::NearestTiesToEven {
            let threshold = 1i64 << min(diff - mant_len, mant_len - 1);
            if remainder >= threshold && (remainder > threshold || (result.mant & 1) != 0) {
                result.mant += x;
            }
        }
    }

    fn special_multiply(&self, a: &Number, b: &Number) -> Number {
        let f = self.format;

        if a.is_nan() || b.is_nan() || (a.is_zero() && b.is_inf()) || (b.is_zero() && a.is_inf()) {
            return Number::nan(f);
        }
        if a.is_zero() || b.is_zero() {
            return Number::zero(a.sign != b.sign, f);
        }
        if a.is_inf() || b.is_inf() {
            return Number::inf(a.sign != b.sign, f);
        }

        let mut a = *a;
        let mut b = *b;
        a.renormalize_if_subnormal();
        b.renormalize_if_subnormal();

        let wide = abstract_multiply(&a, &b);
        self.round(wide)
    }

    fn special_divide(&self, a: &Number, b: &Number) -> Number {
        let f = self.format;

        if a.is_nan() || b.is_nan() || (a.is_inf() && b.is_inf()) || (a.is_zero() && b.is_zero()) {
            return Number::nan(f);
        }
        if b.is_inf() || a.is_zero() {
            return Number::zero(a.sign != b.sign, f);
        }
        if a.is_inf() || b.is_zero() {
            return Number::inf(a.sign != b.sign, f);
        }

        let mut a = *a;
        let mut b = *b;
        a.renormalize_if_subnormal();
        b.renormalize_if_subnormal();

        let wide = self.abstract_divide(&a, &b, f.w() as i32 - 1);
        self.round(wide)
    }

    /// Bootstraps with a native integer division, then refines the
    /// quotient with `2 * mant_len` long-division steps so the result
    /// carries enough extra bits for the rounder to make a correct
    /// decision.
    fn abstract_divide(&self, a: &Number, b: &Number, mant_len: i32) -> Number {
        let sign = a.sign != b.sign;
        let exp = a.exp - b.exp;
        let mut mant = a.mant / b.mant;
        let mut remainder = a.mant - b.mant * mant;

        for _ in 0..(mant_len * 2) {
            mant <<= 1;
            remainder <<= 1;
            if remainder >= b.mant {
                mant += 1;
                remainder -= b.mant;
            }
        }

        if remainder > 0
            && ((self.mode == RoundingMode::TowardPositive && !sign) || (self.mode == RoundingMode::TowardNegative && sign))
        {
            mant += 1;
        }

        let mut result = Number { mant, exp, sign, normalized: true, format: a.format };
        add_zeros_to_length(&mut result, 1i64 << (mant_len * 2));
        result
    }
}

fn abstract_multiply(a: &Number, b: &Number) -> Number {
    Number {
        sign: a.sign != b.sign,
        mant: a.mant * b.mant,
        exp: a.exp + b.exp,
        normalized: true,
        format: a.format,
    }
}

/// Shifts `shift`'s mantissa to `unshift`'s exponent, widening both by
/// `mant_len` bits so the subsequent add/subtract keeps the guard and
/// round bits, and reports the bits shifted out as `remainder`.
fn to_one_exponent(unshift: &mut Number, shift: &mut Number, mant_len: i32) -> (i32, i64) {
    let diff = unshift.exp - shift.exp;
    shift.exp += diff;
    let remainder = if diff <= mant_len { 0 } else { shift.mant & mask(min(mant_len, diff - mant_len)) };
    shift.mant <<= mant_len;
    unshift.mant <<= mant_len;
    shift.mant >>= min(diff, mant_len * 2);
    (diff, remainder)
}

fn add_zeros_to_length(n: &mut Number, len: i64) {
    while n.mant > 0 && n.mant < len {
        n.mant <<= 1;
        n.exp -= 1;
    }
}

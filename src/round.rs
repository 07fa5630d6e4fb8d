// binfp: software IEEE 754 arithmetic
//
// round.rs
//
// The rounding context: four rounding modes applied to a kernel's wide
// result in two stages — a coarse quantization down to the format's
// mantissa width, then (for results that land in the subnormal range)
// a second pass that re-quantizes against the narrower subnormal
// precision while still honoring the remainder the first pass
// discarded. This second pass is the one place a rounding decision
// depends on bits lost earlier, and it's the easiest place to get
// wrong.

use crate::format::Format;
use crate::number::Number;

/// One of the four IEEE 754 binary rounding directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    TowardZero,
    NearestTiesToEven,
    TowardPositive,
    TowardNegative,
}

/// Bundles a format with a rounding mode: every arithmetic kernel is an
/// inherent method on `Context` (see [`crate::ops`]), and [`Context::round`]
/// is the sole place a wide kernel result gets folded back into range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
    pub format: Format,
    pub mode: RoundingMode,
}

impl Context {
    pub fn new(format: Format, mode: RoundingMode) -> Context {
        Context { format, mode }
    }

    /// Stage A/B/C/D: quantizes a kernel's wide, unrounded `Number`
    /// down to its format's settled representation.
    pub(crate) fn round(&self, mut p: Number) -> Number {
        let f = self.format;
        let w = f.w() as i32;
        let trunc_len = f.w() - 1;
        let max_mant = f.max_mant();

        match self.mode {
            RoundingMode::TowardZero => self.toward_zero_rounding(&mut p, trunc_len, max_mant),
            RoundingMode::NearestTiesToEven => self.toward_nearest_rounding(&mut p, w),
            RoundingMode::TowardPositive => self.toward_inf_rounding(&mut p, false, w, trunc_len, max_mant),
            RoundingMode::TowardNegative => self.toward_inf_rounding(&mut p, true, w, trunc_len, max_mant),
        }

        if p.normalized {
            p.add_right_zeros();
        }

        self.check_res(p)
    }

    fn toward_zero_rounding(&self, p: &mut Number, mant_len: u32, max_mant: i64) {
        let first_remainder = 0i64;
        let was_added = 0i64;
        if p.mant >= (1i64 << (mant_len * 2)) {
            p.mant >>= mant_len;
        }
        while p.mant > max_mant {
            p.mant >>= 1;
            p.exp += 1;
        }
        self.second_rounding(p, first_remainder, was_added);
    }

    fn toward_nearest_rounding(&self, p: &mut Number, start: i32) {
        let max_len = get_max_len(p.mant, start);
        let first_remainder = p.mant & mask(max_len - start + 1);
        let mut was_added = 0i64;
        if max_len > 0 {
            if (p.mant >> (max_len - start)) & 1 == 0 {
                p.mant >>= max_len - start + 1;
            } else {
                let remainder = p.mant & mask(max_len - start);
                p.mant >>= max_len - start + 1;
                was_added = toward_nearest_round_tail(&mut p.mant, remainder);
            }
            p.exp = increase_exp(p.exp, start, max_len);
        }
        self.second_rounding(p, first_remainder, was_added);
    }

    fn find_max_len(&self, p: &mut Number, start: i32) {
        let max_len = get_max_len(p.mant, start);
        let first_remainder = p.mant & mask(max_len - start + 1);
        let mut was_added = 0i64;
        if max_len > 0 {
            was_added = ((p.mant & mask(max_len - start + 1)) > 0) as i64;
            p.mant = (p.mant >> (max_len - start + 1)) + was_added;
            p.exp = increase_exp(p.exp, start, max_len);
        }
        self.second_rounding(p, first_remainder, was_added);
    }

    fn toward_inf_rounding(&self, p: &mut Number, sign: bool, start: i32, mant_len: u32, max_mant: i64) {
        if p.sign == sign {
            self.find_max_len(p, start);
        } else {
            self.toward_zero_rounding(p, mant_len, max_mant);
        }
    }

    /// Stage B: once a result has folded down into the subnormal
    /// exponent range, its mantissa still carries normal-width
    /// precision and must be re-quantized to the narrower subnormal
    /// one. `first_remainder`/`was_added` are what Stage A discarded
    /// or already added in, and they still influence this rounding
    /// decision (most visibly for ties-to-even).
    fn second_rounding(&self, result: &mut Number, first_remainder: i64, was_added: i64) {
        let f = self.format;
        if result.exp > f.reserved_low_exp() {
            return;
        }

        let bias = -f.subnormal_range_min_exp() + 1;
        let shift = f.w() as i32 - (bias + result.exp);
        if shift <= 0 || result.exp < f.subnormal_range_min_exp() {
            return;
        }

        result.mant -= was_added;
        let remainder = result.mant & mask(shift);
        result.mant >>= shift;

        if ((self.mode == RoundingMode::TowardPositive && !result.sign)
            || (self.mode == RoundingMode::TowardNegative && result.sign))
            && (remainder > 0 || first_remainder > 0)
        {
            result.mant += 1;
        }

        if self.mode == RoundingMode::NearestTiesToEven && remainder >= (1i64 << (shift - 1)) {
            toward_nearest_round_tail(&mut result.mant, (remainder & mask(shift - 1)) + first_remainder);
        }

        result.mant <<= shift;
        while result.mant >= (1i64 << f.w()) {
            result.exp += 1;
            result.mant >>= 1;
        }

        if result.is_zero() {
            while result.exp < f.min_normal_exp() {
                result.mant >>= 1;
                result.exp += 1;
            }
            result.exp -= 1;
            result.normalized = false;
        }
    }

    /// Stage C/D: clamps an out-of-range exponent to infinity or the
    /// format's largest/smallest finite magnitude, then settles any
    /// subnormal result that carried past `MIN_MANT` back into the
    /// normal range.
    fn check_res(&self, result: Number) -> Number {
        let f = self.format;
        let mut r = result;

        if r.exp >= f.reserved_high_exp() {
            let to_max = self.mode == RoundingMode::TowardZero
                || (self.mode == RoundingMode::TowardPositive && r.sign)
                || (self.mode == RoundingMode::TowardNegative && !r.sign);
            return if to_max { Number::max_finite(r.sign, f) } else { Number::inf(r.sign, f) };
        }

        if r.exp < f.subnormal_range_min_exp() {
            let to_min = (self.mode == RoundingMode::TowardNegative && r.sign)
                || (self.mode == RoundingMode::TowardPositive && !r.sign)
                || (self.mode == RoundingMode::NearestTiesToEven
                    && r.exp == f.subnormal_range_min_exp() - 1
                    && r.mant > f.min_mant());
            return if to_min { Number::min_subnormal(r.sign, f) } else { Number::zero(r.sign, f) };
        }

        while !r.normalized && r.mant >= (1i64 << f.w()) {
            r.mant >>= 1;
            r.exp += 1;
        }
        r
    }
}

pub(crate) fn mask(diff: i32) -> i64 {
    (1i64 << diff) - 1
}

fn get_max_len(mant: i64, start: i32) -> i32 {
    let mut max_len = 0i32;
    for i in start..=60 {
        if mant >= (1i64 << i) {
            max_len = i;
        }
    }
    max_len
}

fn increase_exp(exp: i32, start: i32, max_len: i32) -> i32 {
    let mut e = exp;
    if max_len > start * 2 - 2 {
        e += max_len - (start * 2 - 2);
    }
    if max_len < start * 2 - 3 && max_len >= start {
        e += max_len - start + 1;
    }
    e
}

fn toward_nearest_round_tail(mant: &mut i64, remainder: i64) -> i64 {
    if remainder > 0 || (*mant & 1) != 0 {
        *mant += 1;
        1
    } else {
        0
    }
}

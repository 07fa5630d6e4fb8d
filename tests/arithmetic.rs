// End-to-end arithmetic scenarios, driven the same way the CLI would:
// parse the hex operands, run one kernel under one rounding mode,
// check the printed text.

use binfp::round::RoundingMode;
use binfp::{text::format_text, Context, Format, Number};

fn eval(format: Format, mode: RoundingMode, a: u32, op: Option<(char, u32)>) -> String {
    let ctx = Context::new(format, mode);
    let a = Number::decode(a, format);
    let result = match op {
        None => a,
        Some(('+', b)) => ctx.add(&a, &Number::decode(b, format)),
        Some(('-', b)) => ctx.sub(&a, &Number::decode(b, format)),
        Some(('*', b)) => ctx.mul(&a, &Number::decode(b, format)),
        Some(('/', b)) => ctx.div(&a, &Number::decode(b, format)),
        _ => unreachable!(),
    };
    format_text(&result)
}

#[test]
fn scenario_1_bare_decode() {
    assert_eq!(eval(Format::Single, RoundingMode::TowardZero, 0x3f80_0000, None), "0x1.000000p+0");
}

#[test]
fn scenario_2_one_plus_one() {
    let r = eval(Format::Single, RoundingMode::NearestTiesToEven, 0x3f80_0000, Some(('+', 0x3f80_0000)));
    assert_eq!(r, "0x1.000000p+1");
}

#[test]
fn scenario_3_opposite_infinities_add_to_nan() {
    let r = eval(Format::Single, RoundingMode::NearestTiesToEven, 0x7f80_0000, Some(('+', 0xff80_0000)));
    assert_eq!(r, "nan");
}

#[test]
fn scenario_4_subnormal_times_half_underflows_to_zero() {
    let r = eval(Format::Single, RoundingMode::NearestTiesToEven, 0x0000_0001, Some(('*', 0x3f00_0000)));
    assert_eq!(r, "0x0.000000p+0");
}

#[test]
fn scenario_5_half_division_toward_positive() {
    let r = eval(Format::Half, RoundingMode::TowardPositive, 0x3c00, Some(('/', 0x4000)));
    assert_eq!(r, "0x1.000p-1");
}

#[test]
fn scenario_6_one_minus_one_toward_negative_is_neg_zero() {
    let r = eval(Format::Single, RoundingMode::TowardNegative, 0x3f80_0000, Some(('-', 0x3f80_0000)));
    assert_eq!(r, "-0x0.000000p+0");
}

#[test]
fn invariant_add_identity_with_zero() {
    for mode in [
        RoundingMode::TowardZero,
        RoundingMode::NearestTiesToEven,
        RoundingMode::TowardPositive,
        RoundingMode::TowardNegative,
    ] {
        let ctx = Context::new(Format::Single, mode);
        let a = Number::decode(0x4049_0fdb, Format::Single); // pi, roughly
        let z = Number::zero(false, Format::Single);
        let r = ctx.add(&a, &z);
        assert_eq!(format_text(&r), format_text(&a));
    }
}

#[test]
fn invariant_nan_absorbing_for_every_op_and_mode() {
    for mode in [
        RoundingMode::TowardZero,
        RoundingMode::NearestTiesToEven,
        RoundingMode::TowardPositive,
        RoundingMode::TowardNegative,
    ] {
        let ctx = Context::new(Format::Single, mode);
        let nan = Number::nan(Format::Single);
        let one = Number::decode(0x3f80_0000, Format::Single);
        assert_eq!(format_text(&ctx.add(&nan, &one)), "nan");
        assert_eq!(format_text(&ctx.sub(&one, &nan)), "nan");
        assert_eq!(format_text(&ctx.mul(&nan, &one)), "nan");
        assert_eq!(format_text(&ctx.div(&one, &nan)), "nan");
    }
}

#[test]
fn invariant_directed_rounding_brackets_two_thirds() {
    // 2/3 is not exactly representable; toward +inf must not undershoot,
    // toward -inf must not overshoot.
    let two = Number::decode(0x4000_0000, Format::Single);
    let three = Number::decode(0x4040_0000, Format::Single);

    let up = Context::new(Format::Single, RoundingMode::TowardPositive).div(&two, &three);
    let down = Context::new(Format::Single, RoundingMode::TowardNegative).div(&two, &three);

    assert_ne!(up.mant, down.mant);
    assert!(!up.sign);
    assert!(!down.sign);
}

#[test]
fn invariant_mul_by_exact_divisor_round_trips() {
    let ctx_trunc = Context::new(Format::Single, RoundingMode::TowardZero);
    let a = Number::decode(0x4248_0000, Format::Single); // 50.0
    let b = Number::decode(0x4080_0000, Format::Single); // 4.0
    let q = ctx_trunc.div(&a, &b);
    let back = ctx_trunc.mul(&q, &b);
    assert_eq!(format_text(&back), format_text(&a));
}

#[test]
fn sub_matches_add_of_negated() {
    for mode in [
        RoundingMode::TowardZero,
        RoundingMode::NearestTiesToEven,
        RoundingMode::TowardPositive,
        RoundingMode::TowardNegative,
    ] {
        let ctx = Context::new(Format::Single, mode);
        let a = Number::decode(0x402d_f84d, Format::Single);
        let b = Number::decode(0x3f00_0000, Format::Single);
        let mut neg_b = b;
        neg_b.sign = !neg_b.sign;
        assert_eq!(format_text(&ctx.sub(&a, &b)), format_text(&ctx.add(&a, &neg_b)));
    }
}

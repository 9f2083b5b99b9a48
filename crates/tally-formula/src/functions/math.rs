//! Math functions

use super::CallContext;
use crate::error::FormulaResult;

/// Round half up: the fractional part is compared to 0.5
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// ABS(x)
pub fn fn_abs(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].abs())
}

/// SGN(x) / SIGN(x) - -1, 0 or 1
pub fn fn_sign(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    let x = args[0];
    Ok(if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    })
}

/// INT(x) / TRUNC(x) / FLOOR(x) - all round toward negative infinity
pub fn fn_floor(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].floor())
}

/// CEIL(x)
pub fn fn_ceil(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].ceil())
}

/// ROUND(x)
pub fn fn_round(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(round_half_up(args[0]))
}

/// FRAC(x) - fractional part, keeping the sign of x
pub fn fn_frac(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].fract())
}

/// SQRT(x)
pub fn fn_sqrt(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].sqrt())
}

/// LN(x)
pub fn fn_ln(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].ln())
}

/// LOG(x) or LOG(x; base)
pub fn fn_log(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    match args {
        [x, base] => Ok(x.log(*base)),
        _ => Ok(args[0].log10()),
    }
}

/// EXP(x)
pub fn fn_exp(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].exp())
}

/// SIN(x), radians
pub fn fn_sin(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].sin())
}

/// COS(x), radians
pub fn fn_cos(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].cos())
}

/// TAN(x), radians
pub fn fn_tan(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].tan())
}

pub fn fn_asin(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].asin())
}

pub fn fn_acos(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].acos())
}

pub fn fn_atan(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].atan())
}

pub fn fn_sinh(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].sinh())
}

pub fn fn_cosh(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].cosh())
}

pub fn fn_tanh(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].tanh())
}

/// MAX(a; b) / LIMINF(a; b) - LIMINF clamps `a` from below at `b`
pub fn fn_max(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].max(args[1]))
}

/// MIN(a; b) / LIMSUP(a; b) - LIMSUP clamps `a` from above at `b`
pub fn fn_min(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].min(args[1]))
}

/// POWER(base; exponent) / POW(base; exponent)
pub fn fn_power(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(args[0].powf(args[1]))
}

/// RND(n) - random integer in `[0, n)`, or 0 when `n <= 0`
/// This is a volatile function that returns a different value on each calculation.
pub fn fn_rnd(args: &[f64], ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    let n = args[0];
    if n <= 0.0 || n.is_nan() {
        return Ok(0.0);
    }
    Ok((ctx.random.next_f64() * n).floor())
}

//! Unit conversions and sign-gated functions

use super::math::round_half_up;
use super::CallContext;
use crate::error::FormulaResult;

const MINUTES_PER_HOUR: f64 = 60.0;
const HOURS_PER_DAY: f64 = 24.0;
const MINUTES_PER_DAY: f64 = 1440.0;

fn round2(x: f64) -> f64 {
    round_half_up(x * 100.0) / 100.0
}

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// DAYS2MINS(days) - whole minutes
pub fn fn_days2mins(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok((args[0] * MINUTES_PER_DAY).floor())
}

/// DAYS2HOURS(days) - whole hours
pub fn fn_days2hours(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok((args[0] * HOURS_PER_DAY).floor())
}

/// HOURS2MINS(hours) - whole minutes
pub fn fn_hours2mins(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok((args[0] * MINUTES_PER_HOUR).floor())
}

/// HOURS2DAYS(hours) - rounded to two decimals
pub fn fn_hours2days(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(round2(args[0] / HOURS_PER_DAY))
}

/// MINS2HOURS(minutes) - rounded to two decimals
pub fn fn_mins2hours(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(round2(args[0] / MINUTES_PER_HOUR))
}

/// MINS2DAYS(minutes) - rounded to two decimals
pub fn fn_mins2days(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(round2(args[0] / MINUTES_PER_DAY))
}

/// VALPO(x) - x when positive, else 0
pub fn fn_valpo(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(if args[0] > 0.0 { args[0] } else { 0.0 })
}

/// VALNE(x) - x when negative, else 0
pub fn fn_valne(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(if args[0] < 0.0 { args[0] } else { 0.0 })
}

/// IFPO(x) - 1 when x > 0
pub fn fn_ifpo(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(flag(args[0] > 0.0))
}

/// IFNE(x) - 1 when x < 0
pub fn fn_ifne(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(flag(args[0] < 0.0))
}

/// IFZE(x) - 1 when x == 0
pub fn fn_ifze(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(flag(args[0] == 0.0))
}

/// IFNZ(x) - 1 when x != 0
pub fn fn_ifnz(args: &[f64], _ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
    Ok(flag(args[0] != 0.0))
}

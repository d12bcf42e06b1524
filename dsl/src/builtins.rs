//! Built-in constants and math functions.
//!
//! The tables are static so that `Context::add_builtins` is a plain
//! copy; every entry is a native function the code generator can call
//! directly.

use phf::{phf_map, Map};

use crate::context::NativeFn;

/// Built-in constants.
pub static CONSTANTS: Map<&'static str, f64> = phf_map! {
    "INF" => f64::INFINITY,
    "NAN" => f64::NAN,
    "PI" => std::f64::consts::PI,
    "E" => std::f64::consts::E,
};

/// Built-in functions.
pub static FUNCTIONS: Map<&'static str, NativeFn> = phf_map! {
    "isnan" => NativeFn::F1(is_nan),
    "isinf" => NativeFn::F1(is_inf),
    "isfinite" => NativeFn::F1(is_finite),
    "abs" => NativeFn::F1(abs),
    "round" => NativeFn::F1(round),
    "floor" => NativeFn::F1(floor),
    "ceil" => NativeFn::F1(ceil),
    "trunc" => NativeFn::F1(trunc),
    "frac" => NativeFn::F1(frac),
    "sqrt" => NativeFn::F1(sqrt),
    "exp" => NativeFn::F1(exp),
    "log" => NativeFn::F1(log),
    "log2" => NativeFn::F1(log2),
    "log10" => NativeFn::F1(log10),
    "sin" => NativeFn::F1(sin),
    "cos" => NativeFn::F1(cos),
    "tan" => NativeFn::F1(tan),
    "sinh" => NativeFn::F1(sinh),
    "cosh" => NativeFn::F1(cosh),
    "tanh" => NativeFn::F1(tanh),
    "asin" => NativeFn::F1(asin),
    "acos" => NativeFn::F1(acos),
    "atan" => NativeFn::F1(atan),
    "atan2" => NativeFn::F2(atan2),
    "min" => NativeFn::F2(min),
    "max" => NativeFn::F2(max),
    "pow" => NativeFn::F2(pow),
    "hypot" => NativeFn::F2(hypot),
    "copysign" => NativeFn::F2(copysign),
};

fn is_nan(x: f64) -> f64 {
    bool_value(x.is_nan())
}

fn is_inf(x: f64) -> f64 {
    bool_value(x.is_infinite())
}

fn is_finite(x: f64) -> f64 {
    bool_value(x.is_finite())
}

fn abs(x: f64) -> f64 {
    x.abs()
}

/// Rounds half away from zero, like C `round`.
fn round(x: f64) -> f64 {
    x.round()
}

fn floor(x: f64) -> f64 {
    x.floor()
}

fn ceil(x: f64) -> f64 {
    x.ceil()
}

fn trunc(x: f64) -> f64 {
    x.trunc()
}

/// The fractional part with the sign of `x`: `x - trunc(x)`.
fn frac(x: f64) -> f64 {
    x.fract()
}

fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

fn exp(x: f64) -> f64 {
    x.exp()
}

/// The natural logarithm.
fn log(x: f64) -> f64 {
    x.ln()
}

fn log2(x: f64) -> f64 {
    x.log2()
}

fn log10(x: f64) -> f64 {
    x.log10()
}

fn sin(x: f64) -> f64 {
    x.sin()
}

fn cos(x: f64) -> f64 {
    x.cos()
}

fn tan(x: f64) -> f64 {
    x.tan()
}

fn sinh(x: f64) -> f64 {
    x.sinh()
}

fn cosh(x: f64) -> f64 {
    x.cosh()
}

fn tanh(x: f64) -> f64 {
    x.tanh()
}

fn asin(x: f64) -> f64 {
    x.asin()
}

fn acos(x: f64) -> f64 {
    x.acos()
}

fn atan(x: f64) -> f64 {
    x.atan()
}

fn atan2(y: f64, x: f64) -> f64 {
    y.atan2(x)
}

fn min(a: f64, b: f64) -> f64 {
    a.min(b)
}

fn max(a: f64, b: f64) -> f64 {
    a.max(b)
}

fn pow(x: f64, y: f64) -> f64 {
    x.powf(y)
}

fn hypot(x: f64, y: f64) -> f64 {
    x.hypot(y)
}

fn copysign(x: f64, y: f64) -> f64 {
    x.copysign(y)
}

fn bool_value(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

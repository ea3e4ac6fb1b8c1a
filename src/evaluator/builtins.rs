//! The default constant and function catalogue, present in every session.
//!
//! Functions receive their already-validated argument slice plus the
//! session's [`EvalContext`]; the trigonometric group converts its inputs
//! from degrees to radians when `use_degrees` is set.

use super::registry::{ConstantDef, EvalContext, FunctionDef};

/// The golden ratio; exported as the `PHI` constant and used by `fib`.
const PHI: f64 = 1.6180339887498948482045868343;

pub(crate) fn default_constants() -> Vec<ConstantDef> {
    vec![
        ConstantDef::new("PI", 3.14159265358979323846),
        ConstantDef::new("PI_2", 1.57079632679489661923),
        ConstantDef::new("PI_4", 0.785398163397448309616),
        ConstantDef::new("E", 2.71828182845904523536),
        ConstantDef::new("LOG2E", 1.44269504088896340736),
        ConstantDef::new("LOG10E", 0.434294481903251827651),
        ConstantDef::new("LN2", 0.693147180559945309417),
        ConstantDef::new("LN10", 2.30258509299404568402),
        ConstantDef::new("ONE_PI", 0.318309886183790671538),
        ConstantDef::new("TWO_PI", 0.636619772367581343076),
        ConstantDef::new("TWO_SQRTPI", 1.12837916709551257390),
        ConstantDef::new("SQRT2", 1.41421356237309504880),
        ConstantDef::new("ONE_SQRT2", 0.707106781186547524401),
        ConstantDef::new("INTMIN", i64::MIN as f64),
        ConstantDef::new("INTMAX", i64::MAX as f64),
        ConstantDef::new("UINTMAX", u64::MAX as f64),
        ConstantDef::new("DBLMIN", f64::MIN_POSITIVE),
        ConstantDef::new("DBLMAX", f64::MAX),
        ConstantDef::new("E_PI", 23.140692632779269006),
        ConstantDef::new("PI_E", 22.45915771836104547342715),
        ConstantDef::new("PHI", PHI),
    ]
}

pub(crate) fn default_functions() -> Vec<FunctionDef> {
    const UNBOUNDED: usize = usize::MAX;
    vec![
        FunctionDef::new("abs", 1, 1, abs),
        FunctionDef::new("acos", 1, 1, acos),
        FunctionDef::new("arr", 2, 2, arr),
        FunctionDef::new("asin", 1, 1, asin),
        FunctionDef::new("atan", 1, 1, atan),
        FunctionDef::new("atan2", 2, 2, atan2),
        FunctionDef::new("avg", 1, UNBOUNDED, avg),
        FunctionDef::new("ceil", 1, 1, ceil),
        FunctionDef::new("comb", 2, 2, comb),
        FunctionDef::new("cos", 1, 1, cos),
        FunctionDef::new("cosh", 1, 1, cosh),
        FunctionDef::new("delta1", 3, 3, delta1),
        FunctionDef::new("delta2", 3, 3, delta2),
        FunctionDef::new("dev", 1, UNBOUNDED, dev),
        FunctionDef::new("dist", 4, 4, dist),
        FunctionDef::new("exp", 1, 1, exp),
        FunctionDef::new("fib", 1, 1, fib),
        FunctionDef::new("floor", 1, 1, floor),
        FunctionDef::new("log", 1, 1, log),
        FunctionDef::new("log2", 1, 1, log2),
        FunctionDef::new("log10", 1, 1, log10),
        FunctionDef::new("sigma", 2, 3, sigma),
        FunctionDef::new("sin", 1, 1, sin),
        FunctionDef::new("sinh", 1, 1, sinh),
        FunctionDef::new("slope", 4, 4, slope),
        FunctionDef::new("sqrt", 1, 1, sqrt),
        FunctionDef::new("tan", 1, 1, tan),
        FunctionDef::new("tanh", 1, 1, tanh),
        FunctionDef::new("var", 1, UNBOUNDED, var),
    ]
}

/// Converts a trigonometric input from degrees when the session says so.
fn trig_input(ctx: &EvalContext, value: f64) -> f64 {
    if ctx.use_degrees {
        value * std::f64::consts::PI / 180.0
    } else {
        value
    }
}

/// Iterative factorial over the integer-truncated absolute value of the
/// operand; `0!` is 1. Shared with the `!` operator, `arr` and `comb`.
pub(crate) fn factorial(value: f64) -> f64 {
    let n = (value as i32).unsigned_abs();
    let mut result = 1.0;
    for i in 2..=n {
        result *= f64::from(i);
    }
    result
}

// abs(x): absolute value
fn abs(_ctx: &EvalContext, args: &[f64]) -> f64 {
    if args[0] >= 0.0 {
        args[0]
    } else {
        -args[0]
    }
}

// sigma(low, high [, step]): sum of the values in the range, computed in
// closed form; the step divides the term count regardless of its value
fn sigma(_ctx: &EvalContext, args: &[f64]) -> f64 {
    let step = if args.len() == 3 { args[2] } else { 1.0 };
    let low = args[0];
    let high = args[1];
    ((high + low) * ((high - low + 1.0) / step)) / 2.0
}

// avg(x1, ..., xn): arithmetic mean
fn avg(_ctx: &EvalContext, args: &[f64]) -> f64 {
    args.iter().sum::<f64>() / args.len() as f64
}

// var(x1, ..., xn): population variance
fn var(ctx: &EvalContext, args: &[f64]) -> f64 {
    let mean = avg(ctx, args);
    args.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / args.len() as f64
}

// dev(x1, ..., xn): standard deviation
fn dev(ctx: &EvalContext, args: &[f64]) -> f64 {
    var(ctx, args).sqrt()
}

// arr(n, p): ordered arrangements, n! / (p - n)!
fn arr(_ctx: &EvalContext, args: &[f64]) -> f64 {
    factorial(args[0]) / factorial(args[1] - args[0])
}

// comb(n, p): unordered arrangements, n! / ((p - n)! * p!)
fn comb(_ctx: &EvalContext, args: &[f64]) -> f64 {
    factorial(args[0]) / (factorial(args[1] - args[0]) * factorial(args[1]))
}

// dist(x1, y1, x2, y2): distance between two points
fn dist(_ctx: &EvalContext, args: &[f64]) -> f64 {
    let (x1, y1, x2, y2) = (args[0], args[1], args[2], args[3]);
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

// slope(x1, y1, x2, y2): slope of the line through two points
fn slope(_ctx: &EvalContext, args: &[f64]) -> f64 {
    let (x1, y1, x2, y2) = (args[0], args[1], args[2], args[3]);
    (y2 - y1) / (x2 - x1)
}

// fib(n): Fibonacci number of order n, closed form
fn fib(_ctx: &EvalContext, args: &[f64]) -> f64 {
    const SQRT_5: f64 = 2.2360679774997896964091736687313;
    let n = args[0];
    (PHI.powf(n) - (-1.0 / PHI).powf(n)) / SQRT_5
}

// delta1/delta2(a, b, c): the two roots of a quadratic
fn delta1(_ctx: &EvalContext, args: &[f64]) -> f64 {
    let (a, b, c) = (args[0], args[1], args[2]);
    (-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a)
}

fn delta2(_ctx: &EvalContext, args: &[f64]) -> f64 {
    let (a, b, c) = (args[0], args[1], args[2]);
    (-b - (b * b - 4.0 * a * c).sqrt()) / (2.0 * a)
}

fn acos(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).acos()
}

fn asin(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).asin()
}

fn atan(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).atan()
}

fn atan2(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).atan2(trig_input(ctx, args[1]))
}

fn ceil(_ctx: &EvalContext, args: &[f64]) -> f64 {
    args[0].ceil()
}

fn cos(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).cos()
}

fn cosh(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).cosh()
}

fn exp(_ctx: &EvalContext, args: &[f64]) -> f64 {
    args[0].exp()
}

fn floor(_ctx: &EvalContext, args: &[f64]) -> f64 {
    args[0].floor()
}

fn log(_ctx: &EvalContext, args: &[f64]) -> f64 {
    args[0].ln()
}

fn log2(_ctx: &EvalContext, args: &[f64]) -> f64 {
    args[0].log2()
}

fn log10(_ctx: &EvalContext, args: &[f64]) -> f64 {
    args[0].log10()
}

fn sin(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).sin()
}

fn sinh(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).sinh()
}

fn sqrt(_ctx: &EvalContext, args: &[f64]) -> f64 {
    args[0].sqrt()
}

fn tan(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).tan()
}

fn tanh(ctx: &EvalContext, args: &[f64]) -> f64 {
    trig_input(ctx, args[0]).tanh()
}

//! Tests for the built-in constant and function catalogue, exercised through
//! full expressions.

use noether::{ConstantDef, EvalContext, EvalError, Evaluator, FunctionDef};

fn eval(input: &str) -> f64 {
    Evaluator::new().evaluate(input).unwrap()
}

// ==================== CONSTANTS ====================

#[test]
fn the_catalogue_is_complete() {
    let eval = Evaluator::new();
    let names: Vec<&str> = eval.constants().iter().map(|c| c.name.as_str()).collect();

    for expected in [
        "PI", "PI_2", "PI_4", "E", "LOG2E", "LOG10E", "LN2", "LN10", "ONE_PI", "TWO_PI",
        "TWO_SQRTPI", "SQRT2", "ONE_SQRT2", "INTMIN", "INTMAX", "UINTMAX", "DBLMIN", "DBLMAX",
        "E_PI", "PI_E", "PHI",
    ] {
        assert!(names.contains(&expected), "missing constant {expected}");
    }

    let functions: Vec<&str> = eval.functions().iter().map(|f| f.name.as_str()).collect();
    for expected in [
        "abs", "acos", "arr", "asin", "atan", "atan2", "avg", "ceil", "comb", "cos", "cosh",
        "delta1", "delta2", "dev", "dist", "exp", "fib", "floor", "log", "log2", "log10", "sigma",
        "sin", "sinh", "slope", "sqrt", "tan", "tanh", "var",
    ] {
        assert!(functions.contains(&expected), "missing function {expected}");
    }
}

#[test]
fn constant_relationships_hold() {
    assert!((eval("PI_2 * 2 - PI")).abs() < 1e-12);
    assert!((eval("PI_4 * 4 - PI")).abs() < 1e-12);
    assert!((eval("ONE_SQRT2 * SQRT2") - 1.0).abs() < 1e-12);
    assert!((eval("E ** LN2") - 2.0).abs() < 1e-12);
}

#[test]
fn limit_constants() {
    assert_eq!(eval("INTMAX"), i64::MAX as f64);
    assert_eq!(eval("INTMIN"), i64::MIN as f64);
    assert_eq!(eval("UINTMAX"), u64::MAX as f64);
    assert_eq!(eval("DBLMAX"), f64::MAX);
    assert_eq!(eval("DBLMIN"), f64::MIN_POSITIVE);
}

// ==================== NUMERIC FUNCTIONS ====================

#[test]
fn rounding_and_magnitude() {
    assert_eq!(eval("abs(-3.5)"), 3.5);
    assert_eq!(eval("abs(3.5)"), 3.5);
    assert_eq!(eval("ceil(1.01)"), 2.0);
    assert_eq!(eval("floor(1.99)"), 1.0);
    assert_eq!(eval("ceil(-1.5)"), -1.0);
    assert_eq!(eval("floor(-1.5)"), -2.0);
}

#[test]
fn exponentials_and_logarithms() {
    assert_eq!(eval("exp(0)"), 1.0);
    assert!((eval("log(E)") - 1.0).abs() < 1e-12);
    assert_eq!(eval("log2(1024)"), 10.0);
    assert_eq!(eval("log10(100)"), 2.0);
    assert_eq!(eval("sqrt(144)"), 12.0);
}

#[test]
fn sigma_and_its_step_quirk() {
    assert_eq!(eval("sigma(1, 10)"), 55.0);
    assert_eq!(eval("sigma(1, 100)"), 5050.0);
    // The closed form divides the term count by the step unconditionally
    assert_eq!(eval("sigma(1, 10, 2)"), 27.5);
}

#[test]
fn statistics_family() {
    assert_eq!(eval("avg(1, 2, 3, 4)"), 2.5);
    assert_eq!(eval("var(2, 4, 4, 4, 5, 5, 7, 9)"), 4.0);
    assert_eq!(eval("dev(2, 4, 4, 4, 5, 5, 7, 9)"), 2.0);
    assert_eq!(eval("dev(5)"), 0.0);
}

#[test]
fn combinatorics_as_catalogued() {
    // arr(n, p) = n! / (p - n)!
    assert_eq!(eval("arr(5, 7)"), 120.0 / 2.0);
    // comb(n, p) = n! / ((p - n)! * p!), the catalogue's inverted divisor
    assert_eq!(eval("comb(2, 4)"), 2.0 / (2.0 * 24.0));
}

#[test]
fn geometry() {
    assert_eq!(eval("dist(0, 0, 3, 4)"), 5.0);
    assert_eq!(eval("dist(1, 1, 1, 1)"), 0.0);
    assert_eq!(eval("slope(0, 0, 2, 8)"), 4.0);
    assert_eq!(eval("slope(0, 0, 0, 1)"), f64::INFINITY);
}

#[test]
fn quadratic_roots() {
    assert_eq!(eval("delta1(1, -5, 6)"), 3.0);
    assert_eq!(eval("delta2(1, -5, 6)"), 2.0);
    assert!(eval("delta1(1, 0, 1)").is_nan());
}

#[test]
fn fibonacci_closed_form() {
    assert!((eval("fib(10)") - 55.0).abs() < 1e-9);
    assert!((eval("fib(20)") - 6765.0).abs() < 1e-6);
}

// ==================== TRIGONOMETRY & THE DEGREE FLAG ====================

#[test]
fn trig_defaults_to_degrees() {
    assert!((eval("sin(90)") - 1.0).abs() < 1e-12);
    assert!((eval("cos(60)") - 0.5).abs() < 1e-12);
    assert!((eval("tan(45)") - 1.0).abs() < 1e-12);
}

#[test]
fn radians_mode_is_a_session_setting() {
    let mut eval = Evaluator::new();
    eval.set_use_degrees(false);

    assert!((eval.evaluate("sin(PI_2)").unwrap() - 1.0).abs() < 1e-12);
    assert!((eval.evaluate("cos(PI)").unwrap() + 1.0).abs() < 1e-12);
    assert!((eval.evaluate("atan2(1, 0)").unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn hyperbolic_functions_share_the_conversion() {
    // cosh(0) is 1 under either convention
    assert_eq!(eval("cosh(0)"), 1.0);

    let mut radians = Evaluator::new();
    radians.set_use_degrees(false);
    assert!((radians.evaluate("sinh(1)").unwrap() - 1.0f64.sinh()).abs() < 1e-12);
}

// ==================== REGISTRATION ====================

#[test]
fn user_primitives_join_the_catalogue() {
    fn cube(_ctx: &EvalContext, args: &[f64]) -> f64 {
        args[0] * args[0] * args[0]
    }

    let mut eval = Evaluator::new();
    eval.register_constants(&[ConstantDef::new("GRAVITY", 9.81)]);
    eval.register_functions(&[FunctionDef::new("cube", 1, 1, cube)]);

    assert_eq!(eval.evaluate("cube(3)").unwrap(), 27.0);
    assert!((eval.evaluate("GRAVITY * 2").unwrap() - 19.62).abs() < 1e-12);
    // Lookup stays case-insensitive for user entries
    assert_eq!(eval.evaluate("CUBE(2)").unwrap(), 8.0);
}

#[test]
fn user_functions_get_arity_checking() {
    fn one(_ctx: &EvalContext, _args: &[f64]) -> f64 {
        1.0
    }

    let mut eval = Evaluator::new();
    eval.register_functions(&[FunctionDef::new("pair", 2, 2, one)]);

    assert_eq!(eval.evaluate("pair(1, 2)").unwrap(), 1.0);
    assert!(matches!(
        eval.evaluate("pair(1)"),
        Err(EvalError::BadArgumentCount { .. })
    ));
}

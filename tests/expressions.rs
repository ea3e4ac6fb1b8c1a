//! End-to-end evaluation tests for the expression grammar: literals,
//! operators, precedence, parentheses and calls.

use noether::Evaluator;

fn eval(input: &str) -> f64 {
    Evaluator::new().evaluate(input).unwrap()
}

// ==================== ARITHMETIC & PRECEDENCE ====================

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(eval("2 + 3 * 4"), 14.0);
    assert_eq!(eval("2 + 3 * 4"), eval("2 + (3 * 4)"));
}

#[test]
fn power_is_right_associative() {
    assert_eq!(eval("2 ** 3 ** 2"), 512.0);
    assert_eq!(eval("2 ** 3 ** 2"), eval("2 ** (3 ** 2)"));
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(eval("10 - 3 - 4"), 3.0);
    assert_eq!(eval("10 - 3 - 4"), eval("(10 - 3) - 4"));
}

#[test]
fn parentheses_group_subexpressions() {
    assert_eq!(eval("(1+2)*(3+4)"), 21.0);
    assert_eq!(eval("((2))"), 2.0);
}

#[test]
fn division_family() {
    assert_eq!(eval("7 / 2"), 3.5);
    assert_eq!(eval("7 \\ 2"), 3.0);
    assert_eq!(eval("-7 \\ 2"), -4.0); // floor, not truncation
    assert_eq!(eval("7 % 3"), 1.0);
}

#[test]
fn division_by_zero_follows_ieee() {
    assert_eq!(eval("1 / 0"), f64::INFINITY);
    assert_eq!(eval("-1 / 0"), f64::NEG_INFINITY);
    assert!(eval("0 / 0").is_nan());
}

// ==================== UNARY OPERATORS ====================

#[test]
fn unary_minus_disambiguation() {
    assert_eq!(eval("-3"), eval("0-3"));
    assert_eq!(eval("2+-3"), eval("2+(-3)"));
    assert_eq!(eval("2*-3"), -6.0);
    assert_eq!(eval("--3"), 3.0);
}

#[test]
fn unary_plus_is_dropped() {
    assert_eq!(eval("+3"), 3.0);
    assert_eq!(eval("2 + +3"), 5.0);
}

#[test]
fn factorial_is_postfix() {
    assert_eq!(eval("5!"), 120.0);
    assert_eq!(eval("0!"), 1.0);
    assert_eq!(eval("3! + 2"), 8.0);
    assert_eq!(eval("(2 + 3)!"), 120.0);
}

#[test]
fn bitwise_not_is_prefix() {
    assert_eq!(eval("~0"), -1.0);
    assert_eq!(eval("~~5"), 5.0);
}

// ==================== BITWISE OPERATORS ====================

#[test]
fn masking_and_shifting() {
    assert_eq!(eval("0xFF & 0x0F"), 15.0);
    assert_eq!(eval("0xF0 | 0x0F"), 255.0);
    assert_eq!(eval("0xFF ^ 0x0F"), 240.0);
    assert_eq!(eval("1 << 4"), 16.0);
    assert_eq!(eval("64 >> 2"), 16.0);
}

#[test]
fn bitwise_operands_truncate_to_integers() {
    assert_eq!(eval("6.9 & 3.2"), 2.0);
    assert_eq!(eval("1.5 << 2.9"), 4.0);
}

// ==================== NUMBER LITERALS ====================

#[test]
fn integer_bases() {
    assert_eq!(eval("0x10"), 16.0);
    assert_eq!(eval("0b101"), 5.0);
    assert_eq!(eval("0o17"), 15.0);
    assert_eq!(eval("0d42"), 42.0);
    assert_eq!(eval("0777"), 511.0);
}

#[test]
fn float_literals() {
    assert_eq!(eval("1.5"), 1.5);
    assert_eq!(eval("0.5"), 0.5);
    assert_eq!(eval("2e3"), 2000.0);
    assert_eq!(eval("1.5e+2"), 150.0);
    assert_eq!(eval("25E-2"), 0.25);
}

// ==================== CONSTANTS ====================

#[test]
fn constants_resolve_case_insensitively() {
    let mut eval = Evaluator::new();
    let pi = eval.evaluate("PI").unwrap();
    assert!((pi - std::f64::consts::PI).abs() < 1e-12);
    assert_eq!(eval.evaluate("pi").unwrap(), pi);
    assert_eq!(eval.evaluate("Pi").unwrap(), pi);
}

#[test]
fn constants_combine_with_operators() {
    assert!((eval("PHI ** 2 - PHI - 1")).abs() < 1e-12);
    assert!((eval("SQRT2 * SQRT2") - 2.0).abs() < 1e-12);
}

// ==================== FUNCTION CALLS ====================

#[test]
fn fixed_arity_calls() {
    assert_eq!(eval("abs(-4)"), 4.0);
    assert_eq!(eval("sigma(1, 10)"), 55.0);
    assert_eq!(eval("atan2(0, 1)"), 0.0);
}

#[test]
fn variadic_calls() {
    assert_eq!(eval("avg(1,2,3,4)"), 2.5);
    assert_eq!(eval("avg(7)"), 7.0);
}

#[test]
fn call_arguments_are_expressions() {
    assert_eq!(eval("abs(1 - 2 * 3)"), 5.0);
    assert_eq!(eval("avg(1 + 1, 2 * 2, 3 + 3)"), 4.0);
}

#[test]
fn calls_nest() {
    assert_eq!(eval("abs(avg(-2, -4))"), 3.0);
    assert_eq!(eval("avg(avg(1, 3), avg(5, 7))"), 4.0);
}

#[test]
fn sqrt_of_negative_is_a_nan_success() {
    assert!(eval("sqrt(-1)").is_nan());
}

#[test]
fn whitespace_and_newlines_are_insignificant() {
    assert_eq!(eval("  2\n  +\n  3  "), 5.0);
    assert_eq!(eval("avg( 1 , 2 , 3 )"), 2.0);
}

// ==================== SESSION BEHAVIOR ====================

#[test]
fn fresh_sessions_agree() {
    let a = Evaluator::new().evaluate("sigma(1, 10) * PI").unwrap();
    let b = Evaluator::new().evaluate("sigma(1, 10) * PI").unwrap();
    assert_eq!(a, b);
}

#[test]
fn results_are_plain_doubles() {
    assert_eq!(eval("2 ** 62"), (1u64 << 62) as f64);
    assert_eq!(eval("INTMAX"), i64::MAX as f64);
}

//! Noether is an arithmetic expression evaluator, usable as a library or
//! through its interactive REPL binary.
//!
//! Expressions are plain text: integer literals with optional base prefixes,
//! floats with exponents, a fixed operator set with the usual precedence
//! rules, parentheses, named constants (`PI`, `SQRT2`, ...), n-ary functions
//! (`sigma(1, 10)`, `avg(1, 2, 3)`), caller-resolved variables (`$name`) and
//! a bank of numbered registers for carrying results between evaluations
//! (`#0!` stores, `#0?` recalls).
//!
//! ## Examples
//!
//! ```
//! use noether::Evaluator;
//!
//! let mut eval = Evaluator::new();
//!
//! assert_eq!(eval.evaluate("2 + 3 * 4").unwrap(), 14.0);
//! assert_eq!(eval.evaluate("sigma(1, 10)").unwrap(), 55.0);
//!
//! // Registers persist for the lifetime of the Evaluator
//! eval.evaluate("5 #0!").unwrap();
//! assert_eq!(eval.evaluate("#0? * 2").unwrap(), 10.0);
//!
//! // Variables are resolved through a caller-supplied closure
//! let result = eval.evaluate_with("$TIME + 1", |name| {
//!     (name == "TIME").then_some(1000.0)
//! });
//! assert_eq!(result.unwrap(), 1001.0);
//! ```

pub mod evaluator;

#[cfg(feature = "repl")]
pub mod cli;

pub use evaluator::{
    parse, ConstantDef, EvalContext, EvalError, Evaluator, FunctionDef, Position,
};

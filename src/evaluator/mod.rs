//! The expression engine: lexer, parser, executor and the session that ties
//! them together.
//!
//! Evaluation is two-phase. The parser runs the lexer over the input and
//! produces a postfix instruction sequence (shunting-yard, with extensions
//! for n-ary function calls and register addressing); the executor then
//! interprets that sequence against a value stack. An [`Evaluator`] session
//! owns everything either phase needs besides the input itself: the constant
//! and function registries (seeded with the built-in catalogue), the register
//! bank, and the degree-conversion flag for trigonometry.
//!
//! ## Examples
//!
//! ```
//! use noether::Evaluator;
//!
//! let mut eval = Evaluator::new();
//!
//! // Operator precedence and associativity
//! assert_eq!(eval.evaluate("2 + 3 * 4").unwrap(), 14.0);
//! assert_eq!(eval.evaluate("2 ** 3 ** 2").unwrap(), 512.0);
//!
//! // Built-in constants and functions
//! assert_eq!(eval.evaluate("avg(1, 2, 3, 4)").unwrap(), 2.5);
//!
//! // Registers carry values to later evaluations in the same session
//! eval.evaluate("5 #0!").unwrap();
//! assert_eq!(eval.evaluate("#0? * 2").unwrap(), 10.0);
//! ```

mod builtins;
mod errors;
mod executor;
mod lexer;
mod operators;
mod parser;
mod registers;
mod registry;
mod types;

pub use errors::EvalError;
pub use operators::{Assoc, OpCode, Operator};
pub use parser::{parse, MAX_NESTED_CALLS};
pub use registers::MAX_REGISTERS;
pub use registry::{ConstantDef, EvalContext, EvalFunction, FunctionDef};
pub use types::{Instr, Position};

use registers::RegisterBank;
use registry::Registry;

/// An evaluation session.
///
/// The session owns the primitive registries (pre-loaded with the built-in
/// constants and functions), the register bank, and the trigonometry mode.
/// Reuse one session to let `#k!` / `#k?` carry values between expressions.
pub struct Evaluator {
    constants: Registry<ConstantDef>,
    functions: Registry<FunctionDef>,
    registers: RegisterBank,
    use_degrees: bool,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates a session with the built-in constants and functions
    /// registered and trigonometric degree conversion enabled.
    pub fn new() -> Self {
        let mut constants = Registry::new();
        constants.register(builtins::default_constants());

        let mut functions = Registry::new();
        functions.register(builtins::default_functions());

        Self {
            constants,
            functions,
            registers: RegisterBank::new(),
            use_degrees: true,
        }
    }

    /// Evaluates an expression. Variable references (`$name`) are rejected;
    /// use [`evaluate_with`](Self::evaluate_with) to supply a resolver.
    pub fn evaluate(&mut self, expression: &str) -> Result<f64, EvalError> {
        self.run(expression, None)
    }

    /// Evaluates an expression, resolving `$name` references through
    /// `resolver`. Returning `None` from the resolver reports the variable as
    /// undefined.
    pub fn evaluate_with<F>(&mut self, expression: &str, mut resolver: F) -> Result<f64, EvalError>
    where
        F: FnMut(&str) -> Option<f64>,
    {
        self.run(expression, Some(&mut resolver))
    }

    fn run(
        &mut self,
        expression: &str,
        resolver: Option<&mut dyn FnMut(&str) -> Option<f64>>,
    ) -> Result<f64, EvalError> {
        let program = parser::parse(expression, resolver.is_some())?;

        if program.is_empty() {
            return Err(EvalError::UnexpectedToken {
                token: "end of input".to_string(),
                at: Position { line: 1, column: 1 },
            });
        }

        let ctx = EvalContext {
            use_degrees: self.use_degrees,
        };
        executor::run(
            &program,
            &self.constants,
            &self.functions,
            &mut self.registers,
            &ctx,
            resolver,
        )
    }

    /// Registers additional constants. Duplicate names are permitted; lookup
    /// resolves to whichever entry the binary search finds first.
    pub fn register_constants(&mut self, definitions: &[ConstantDef]) {
        self.constants.register(definitions.iter().cloned());
    }

    /// Registers additional functions.
    pub fn register_functions(&mut self, definitions: &[FunctionDef]) {
        self.functions.register(definitions.iter().cloned());
    }

    /// The registered constants, sorted by name.
    pub fn constants(&self) -> &[ConstantDef] {
        self.constants.entries()
    }

    /// The registered functions, sorted by name.
    pub fn functions(&self) -> &[FunctionDef] {
        self.functions.entries()
    }

    /// Whether trigonometric built-ins convert their inputs from degrees.
    pub fn use_degrees(&self) -> bool {
        self.use_degrees
    }

    pub fn set_use_degrees(&mut self, use_degrees: bool) {
        self.use_degrees = use_degrees;
    }

    /// Clears the register bank while keeping registered primitives and
    /// settings.
    pub fn reset(&mut self) {
        self.registers.reset();
    }
}

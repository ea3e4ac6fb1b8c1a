//! Error types for expression evaluation
//!
//! Every failure mode of the lexer, parser and executor is a variant of
//! [`EvalError`]. Parse-time variants carry the source position of the
//! offending token; evaluation-time variants carry the names or indices
//! involved instead. Each variant has a stable numeric [`code`](EvalError::code)
//! and a symbolic [`code_name`](EvalError::code_name) used by the REPL.

use super::types::Position;
use std::fmt;

/// Errors reported by [`Evaluator::evaluate`](super::Evaluator::evaluate) and
/// friends.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A character no lexer rule matched
    UnexpectedCharacter { ch: char, at: Position },
    /// A number token that could not be converted to a value
    InvalidNumber { literal: String, at: Position },
    /// A valid token in an invalid place (also reported for empty input)
    UnexpectedToken { token: String, at: Position },
    /// A number in an invalid place
    UnexpectedNumber { literal: String, at: Position },
    /// An operator in an invalid place
    UnexpectedOperator { operator: String, at: Position },
    /// A name in an invalid place
    UnexpectedName { name: String, at: Position },
    /// A variable reference in an invalid place
    UnexpectedVariable { name: String, at: Position },
    /// An argument separator outside a function call
    UnexpectedArgumentSeparator { at: Position },
    /// A closing parenthesis with no matching opening one
    UnexpectedClosingParenthesis { at: Position },
    /// Opening parentheses left unclosed at end of input
    UnbalancedParentheses,
    /// A function call left unclosed at end of input
    UnterminatedFunctionCall,
    /// Function call nesting exceeded the supported depth
    TooManyNestedCalls { at: Position },
    /// A name that is not a registered constant
    UndefinedConstant { name: String },
    /// A called name that is not a registered function
    UndefinedFunction { name: String },
    /// A variable the resolver reported as undefined
    UndefinedVariable { name: String },
    /// An argument count outside the function's declared range
    BadArgumentCount {
        function: String,
        argc: usize,
        min: usize,
        max: usize,
    },
    /// A register index outside `0..64`; the position is present when the
    /// index was written in the expression
    InvalidRegisterIndex { index: u32, at: Option<Position> },
    /// A register recall of a cell that was never written; `None` means an
    /// implicit `#?` with no prior store
    RegisterNotSet { index: Option<usize> },
    /// A `$name` reference in an entry point without a variable resolver
    VariablesNotAllowed { name: String, at: Position },
    /// Internal: an operator or register store found too few stack values
    StackEmpty { operator: String },
    /// Internal: the postfix program left an inconsistent value stack
    ImplementationError { detail: String },
}

impl EvalError {
    /// Stable numeric code for this error kind.
    pub fn code(&self) -> i32 {
        match self {
            EvalError::UnexpectedCharacter { .. } => -1,
            EvalError::InvalidNumber { .. } => -2,
            EvalError::UnexpectedToken { .. } => -3,
            EvalError::UnexpectedNumber { .. } => -4,
            EvalError::UnexpectedOperator { .. } => -5,
            EvalError::StackEmpty { .. } => -6,
            EvalError::UnbalancedParentheses => -9,
            EvalError::UnexpectedClosingParenthesis { .. } => -10,
            EvalError::UndefinedConstant { .. } => -11,
            EvalError::UnexpectedName { .. } => -12,
            EvalError::ImplementationError { .. } => -13,
            EvalError::InvalidRegisterIndex { .. } => -14,
            EvalError::RegisterNotSet { .. } => -15,
            EvalError::UndefinedFunction { .. } => -16,
            EvalError::UnterminatedFunctionCall => -17,
            EvalError::TooManyNestedCalls { .. } => -18,
            EvalError::UnexpectedArgumentSeparator { .. } => -19,
            EvalError::BadArgumentCount { .. } => -21,
            EvalError::UndefinedVariable { .. } => -22,
            EvalError::VariablesNotAllowed { .. } => -23,
            EvalError::UnexpectedVariable { .. } => -24,
        }
    }

    /// Symbolic name of the error code, as printed by the REPL.
    pub fn code_name(&self) -> &'static str {
        match self {
            EvalError::UnexpectedCharacter { .. } => "E_EVAL_UNEXPECTED_CHARACTER",
            EvalError::InvalidNumber { .. } => "E_EVAL_INVALID_NUMBER",
            EvalError::UnexpectedToken { .. } => "E_EVAL_UNEXPECTED_TOKEN",
            EvalError::UnexpectedNumber { .. } => "E_EVAL_UNEXPECTED_NUMBER",
            EvalError::UnexpectedOperator { .. } => "E_EVAL_UNEXPECTED_OPERATOR",
            EvalError::StackEmpty { .. } => "E_EVAL_STACK_EMPTY",
            EvalError::UnbalancedParentheses => "E_EVAL_UNBALANCED_PARENTHESES",
            EvalError::UnexpectedClosingParenthesis { .. } => "E_EVAL_UNEXPECTED_RIGHT_PARENT",
            EvalError::UndefinedConstant { .. } => "E_EVAL_UNDEFINED_CONSTANT",
            EvalError::UnexpectedName { .. } => "E_EVAL_UNEXPECTED_NAME",
            EvalError::ImplementationError { .. } => "E_EVAL_IMPLEMENTATION_ERROR",
            EvalError::InvalidRegisterIndex { .. } => "E_EVAL_INVALID_REGISTER_INDEX",
            EvalError::RegisterNotSet { .. } => "E_EVAL_REGISTER_NOT_SET",
            EvalError::UndefinedFunction { .. } => "E_EVAL_UNDEFINED_FUNCTION",
            EvalError::UnterminatedFunctionCall => "E_EVAL_UNTERMINATED_FUNCTION_CALL",
            EvalError::TooManyNestedCalls { .. } => "E_EVAL_TOO_MANY_NESTED_CALLS",
            EvalError::UnexpectedArgumentSeparator { .. } => "E_EVAL_UNEXPECTED_ARG_SEPARATOR",
            EvalError::BadArgumentCount { .. } => "E_EVAL_BAD_ARGUMENT_COUNT",
            EvalError::UndefinedVariable { .. } => "E_EVAL_UNDEFINED_VARIABLE",
            EvalError::VariablesNotAllowed { .. } => "E_EVAL_VARIABLES_NOT_ALLOWED",
            EvalError::UnexpectedVariable { .. } => "E_EVAL_UNEXPECTED_VARIABLE",
        }
    }

    /// Position of the offending token, when the error arose during parsing.
    pub fn position(&self) -> Option<Position> {
        match self {
            EvalError::UnexpectedCharacter { at, .. }
            | EvalError::InvalidNumber { at, .. }
            | EvalError::UnexpectedToken { at, .. }
            | EvalError::UnexpectedNumber { at, .. }
            | EvalError::UnexpectedOperator { at, .. }
            | EvalError::UnexpectedName { at, .. }
            | EvalError::UnexpectedVariable { at, .. }
            | EvalError::UnexpectedArgumentSeparator { at }
            | EvalError::UnexpectedClosingParenthesis { at }
            | EvalError::TooManyNestedCalls { at }
            | EvalError::VariablesNotAllowed { at, .. } => Some(*at),
            EvalError::InvalidRegisterIndex { at, .. } => *at,
            _ => None,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnexpectedCharacter { ch, at } => {
                write!(f, "Unexpected character '{ch}' ({at})")
            }
            EvalError::InvalidNumber { literal, at } => {
                write!(f, "Invalid numeric value '{literal}' ({at})")
            }
            EvalError::UnexpectedToken { token, at } => {
                write!(f, "Unexpected {token} ({at})")
            }
            EvalError::UnexpectedNumber { literal, at } => {
                write!(f, "Unexpected number '{literal}' ({at})")
            }
            EvalError::UnexpectedOperator { operator, at } => {
                write!(f, "Unexpected operator '{operator}' ({at})")
            }
            EvalError::UnexpectedName { name, at } => {
                write!(f, "Unexpected name '{name}' ({at})")
            }
            EvalError::UnexpectedVariable { name, at } => {
                write!(f, "Unexpected variable reference '{name}' ({at})")
            }
            EvalError::UnexpectedArgumentSeparator { at } => {
                write!(f, "Unexpected argument separator ({at})")
            }
            EvalError::UnexpectedClosingParenthesis { at } => {
                write!(f, "Unexpected closing parenthesis ({at})")
            }
            EvalError::UnbalancedParentheses => {
                write!(f, "Unbalanced parentheses")
            }
            EvalError::UnterminatedFunctionCall => {
                write!(f, "Unterminated function call")
            }
            EvalError::TooManyNestedCalls { at } => {
                write!(f, "Too many nested function calls ({at})")
            }
            EvalError::UndefinedConstant { name } => {
                write!(f, "Undefined constant '{name}'")
            }
            EvalError::UndefinedFunction { name } => {
                write!(f, "Undefined function '{name}'")
            }
            EvalError::UndefinedVariable { name } => {
                write!(f, "Undefined variable '{name}'")
            }
            EvalError::BadArgumentCount {
                function,
                argc,
                min,
                max,
            } => {
                write!(
                    f,
                    "Bad number of arguments ({argc}) for function {function}(); authorized range is {min}.."
                )?;
                if *max != usize::MAX {
                    write!(f, "{max}")?;
                }
                Ok(())
            }
            EvalError::InvalidRegisterIndex { index, at } => {
                write!(f, "Invalid register index {index} (allowed range is 0..63)")?;
                if let Some(at) = at {
                    write!(f, " ({at})")?;
                }
                Ok(())
            }
            EvalError::RegisterNotSet { index } => match index {
                Some(index) => write!(f, "Register #{index} has not been assigned any value"),
                None => write!(f, "No register has been assigned any value"),
            },
            EvalError::VariablesNotAllowed { name, at } => {
                write!(
                    f,
                    "Variable references are not allowed without a resolver (referenced variable: '{name}') ({at})"
                )
            }
            EvalError::StackEmpty { operator } => {
                write!(
                    f,
                    "Stack does not contain enough elements to process the '{operator}' operator"
                )
            }
            EvalError::ImplementationError { detail } => {
                write!(f, "Implementation error: {detail}")
            }
        }
    }
}

impl std::error::Error for EvalError {}

//! Executes a postfix program against a value stack.
//!
//! A single linear scan: literals push, operators pop their operands and push
//! the result, names and calls dispatch through the session registries,
//! register instructions read and write the bank. A well-formed program
//! leaves exactly one value on the stack; anything else is an implementation
//! error in the parser, not a user mistake.

use super::builtins;
use super::errors::EvalError;
use super::operators::{OpCode, Operator};
use super::registers::RegisterBank;
use super::registry::{ConstantDef, EvalContext, FunctionDef, Registry};
use super::types::Instr;

pub(crate) fn run(
    program: &[Instr],
    constants: &Registry<ConstantDef>,
    functions: &Registry<FunctionDef>,
    registers: &mut RegisterBank,
    ctx: &EvalContext,
    mut resolver: Option<&mut dyn FnMut(&str) -> Option<f64>>,
) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::with_capacity(program.len());

    for instr in program {
        match instr {
            Instr::Number(value) => stack.push(*value),

            Instr::Constant(name) => {
                let def = constants
                    .find(name)
                    .ok_or_else(|| EvalError::UndefinedConstant { name: name.clone() })?;
                stack.push(def.value);
            }

            Instr::Variable(name) => {
                let value = resolver
                    .as_mut()
                    .and_then(|resolve| resolve(name))
                    .ok_or_else(|| EvalError::UndefinedVariable { name: name.clone() })?;
                stack.push(value);
            }

            Instr::Operator(op) => {
                let value = apply_operator(op, &mut stack)?;
                stack.push(value);
            }

            // Stores do not pop: the value remains available to the rest of
            // the expression
            Instr::RegisterSave(index) => {
                let value = *stack.last().ok_or_else(|| EvalError::StackEmpty {
                    operator: "#!".to_string(),
                })?;
                registers.save(*index, value)?;
            }

            Instr::RegisterRecall(index) => {
                stack.push(registers.recall(*index)?);
            }

            Instr::Call { name, argc } => {
                let def = functions
                    .find(name)
                    .ok_or_else(|| EvalError::UndefinedFunction { name: name.clone() })?;

                if stack.len() < *argc {
                    return Err(EvalError::ImplementationError {
                        detail: format!(
                            "not enough values ({}) remain on the stack for function {}()",
                            stack.len(),
                            def.name
                        ),
                    });
                }
                if *argc < def.min_args || *argc > def.max_args {
                    return Err(EvalError::BadArgumentCount {
                        function: def.name.clone(),
                        argc: *argc,
                        min: def.min_args,
                        max: def.max_args,
                    });
                }

                // The last value pushed is the last positional argument
                let args = stack.split_off(stack.len() - argc);
                stack.push((def.func)(ctx, &args));
            }
        }
    }

    if stack.len() > 1 {
        return Err(EvalError::ImplementationError {
            detail: "value stack should hold at most one value".to_string(),
        });
    }
    stack.pop().ok_or_else(|| EvalError::ImplementationError {
        detail: "value stack is empty".to_string(),
    })
}

fn apply_operator(op: &'static Operator, stack: &mut Vec<f64>) -> Result<f64, EvalError> {
    let value = match op.opcode {
        OpCode::Add => {
            let (a, b) = pop2(stack, op)?;
            a + b
        }
        OpCode::Sub => {
            let (a, b) = pop2(stack, op)?;
            a - b
        }
        OpCode::Mul => {
            let (a, b) = pop2(stack, op)?;
            a * b
        }
        OpCode::Div => {
            let (a, b) = pop2(stack, op)?;
            a / b
        }
        OpCode::IntDiv => {
            let (a, b) = pop2(stack, op)?;
            (a / b).floor()
        }
        OpCode::Pow => {
            let (a, b) = pop2(stack, op)?;
            a.powf(b)
        }
        OpCode::Mod => {
            let (a, b) = pop2(stack, op)?;
            a % b
        }
        OpCode::And => {
            let (a, b) = pop2(stack, op)?;
            ((a as i64) & (b as i64)) as f64
        }
        OpCode::Or => {
            let (a, b) = pop2(stack, op)?;
            ((a as i64) | (b as i64)) as f64
        }
        OpCode::Xor => {
            let (a, b) = pop2(stack, op)?;
            ((a as i64) ^ (b as i64)) as f64
        }
        OpCode::Shl => {
            let (a, b) = pop2(stack, op)?;
            (a as i64).wrapping_shl(b as i64 as u32) as f64
        }
        OpCode::Shr => {
            let (a, b) = pop2(stack, op)?;
            (a as i64).wrapping_shr(b as i64 as u32) as f64
        }
        OpCode::BitNot => !(pop1(stack, op)? as i64) as f64,
        OpCode::UnaryMinus => -pop1(stack, op)?,
        OpCode::Factorial => builtins::factorial(pop1(stack, op)?),
    };
    Ok(value)
}

fn pop1(stack: &mut Vec<f64>, op: &Operator) -> Result<f64, EvalError> {
    stack.pop().ok_or_else(|| stack_empty(op))
}

/// Pops the right-hand operand first; returns `(lhs, rhs)`.
fn pop2(stack: &mut Vec<f64>, op: &Operator) -> Result<(f64, f64), EvalError> {
    let rhs = stack.pop();
    let lhs = stack.pop();
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => Ok((lhs, rhs)),
        _ => Err(stack_empty(op)),
    }
}

fn stack_empty(op: &Operator) -> EvalError {
    EvalError::StackEmpty {
        operator: op.symbol.to_string(),
    }
}

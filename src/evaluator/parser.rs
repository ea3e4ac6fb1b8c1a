//! Shunting-yard parser with function-call and arity extensions.
//!
//! The parser walks the token stream once, maintaining the classic pair of
//! stacks: **output** (which becomes the postfix program) and **operators**
//! (operators, open-paren sentinels and pending function-call markers). On
//! top of that it tracks the kind of the last significant token for
//! context-sensitive decisions — unary/binary disambiguation of `+`/`-`,
//! rejecting values in operator position — and, per call-nesting level, an
//! open-paren depth and a running argument count.
//!
//! A name followed by `(` is lifted off the output stack and becomes a call
//! marker; the matching `)` turns the marker into a call instruction carrying
//! the argument count observed at that level.

use super::errors::EvalError;
use super::lexer::{literal_value, Lexer};
use super::operators::{Assoc, OpCode, Operator, UNARY_MINUS};
use super::registers::MAX_REGISTERS;
use super::types::{Instr, Token, TokenKind};

/// Maximum function-call nesting depth.
pub const MAX_NESTED_CALLS: usize = 64;

/// Parses an expression into its postfix program.
///
/// `allow_variables` mirrors the entry point in use: `$name` references are
/// rejected here when the session has no variable resolver.
pub fn parse(input: &str, allow_variables: bool) -> Result<Vec<Instr>, EvalError> {
    Parser::new(input, allow_variables).run()
}

/// The kind of the last significant token. Inert tokens (register stores,
/// postfix unary operators) leave this untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Last {
    Start,
    Number,
    Name,
    Variable,
    Operator,
    Comma,
    LeftParen,
    RightParen,
    RegisterRecall,
}

/// Entries of the operator stack.
#[derive(Debug)]
enum StackOp {
    Operator(&'static Operator),
    LeftParen,
    /// A pending function application, created when a name is followed by `(`
    Call(String),
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    src: &'a str,
    allow_variables: bool,
    output: Vec<Instr>,
    ops: Vec<StackOp>,
    last: Last,
    /// Open parens per nesting level; level 0 is the whole expression
    paren_depth: [usize; MAX_NESTED_CALLS],
    /// Argument count of the call at each nesting level
    args: [usize; MAX_NESTED_CALLS],
    level: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, allow_variables: bool) -> Self {
        Self {
            lexer: Lexer::new(src),
            src,
            allow_variables,
            output: Vec::new(),
            ops: Vec::new(),
            last: Last::Start,
            paren_depth: [0; MAX_NESTED_CALLS],
            args: [0; MAX_NESTED_CALLS],
            level: 0,
        }
    }

    fn run(mut self) -> Result<Vec<Instr>, EvalError> {
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Error => {
                    let ch = self.src[token.end..].chars().next().unwrap_or(' ');
                    return Err(EvalError::UnexpectedCharacter { ch, at: token.at });
                }
                TokenKind::Number => self.on_number(token)?,
                TokenKind::Name => self.on_name(token)?,
                TokenKind::Variable => self.on_variable(token)?,
                TokenKind::Operator(op) => self.on_operator(op, token)?,
                TokenKind::LeftParen => self.on_left_paren(token)?,
                TokenKind::RightParen => self.on_right_paren(token)?,
                TokenKind::Comma => self.on_comma(token)?,
                TokenKind::RegisterSave(index) => self.on_register_save(index, token)?,
                TokenKind::RegisterRecall(index) => self.on_register_recall(index, token)?,
            }
        }
        self.finish()
    }

    fn text(&self, token: &Token) -> &'a str {
        &self.src[token.start..token.end]
    }

    /// Values (numbers, names, variables, register recalls) may appear at the
    /// start of the expression, after an operator, or inside a call after the
    /// opening paren or a separator.
    fn value_can_start_here(&self) -> bool {
        matches!(
            self.last,
            Last::Start | Last::Operator | Last::Comma | Last::LeftParen
        )
    }

    fn on_number(&mut self, token: Token) -> Result<(), EvalError> {
        let text = self.text(&token);
        if !self.value_can_start_here() {
            return Err(EvalError::UnexpectedNumber {
                literal: text.to_string(),
                at: token.at,
            });
        }

        let value = literal_value(text).ok_or_else(|| EvalError::InvalidNumber {
            literal: text.to_string(),
            at: token.at,
        })?;

        self.output.push(Instr::Number(value));
        self.last = Last::Number;
        Ok(())
    }

    fn on_name(&mut self, token: Token) -> Result<(), EvalError> {
        let text = self.text(&token);
        if !self.value_can_start_here() {
            return Err(EvalError::UnexpectedName {
                name: text.to_string(),
                at: token.at,
            });
        }

        // Pushed unresolved; a following `(` re-tags it as a call marker,
        // otherwise the executor resolves it as a constant
        self.output.push(Instr::Constant(text.to_string()));
        self.last = Last::Name;
        Ok(())
    }

    fn on_variable(&mut self, token: Token) -> Result<(), EvalError> {
        let text = self.text(&token);
        if !self.allow_variables {
            return Err(EvalError::VariablesNotAllowed {
                name: text.to_string(),
                at: token.at,
            });
        }
        if !self.value_can_start_here() {
            return Err(EvalError::UnexpectedVariable {
                name: text.to_string(),
                at: token.at,
            });
        }

        self.output.push(Instr::Variable(text.to_string()));
        self.last = Last::Variable;
        Ok(())
    }

    fn on_operator(&mut self, op: &'static Operator, token: Token) -> Result<(), EvalError> {
        let mut op = op;

        if matches!(
            self.last,
            Last::Start | Last::Operator | Last::LeftParen | Last::Comma
        ) {
            // Prefix position (a separator starts one too, so calls can take
            // negative arguments): unary plus is dropped, minus becomes
            // negation, other binary operators are misplaced
            match op.opcode {
                OpCode::Add => {
                    self.last = Last::Operator;
                    return Ok(());
                }
                OpCode::Sub => op = &UNARY_MINUS,
                _ if !op.unary => {
                    return Err(EvalError::UnexpectedOperator {
                        operator: self.text(&token).to_string(),
                        at: token.at,
                    });
                }
                _ => {}
            }
        } else if !matches!(
            self.last,
            Last::Number | Last::Name | Last::Variable | Last::RightParen | Last::RegisterRecall
        ) {
            return Err(EvalError::UnexpectedOperator {
                operator: self.text(&token).to_string(),
                at: token.at,
            });
        } else if op.unary && op.assoc == Assoc::Left {
            // Postfix operators (factorial) apply to the value already on the
            // output stack; they are inert with respect to the context
            self.output.push(Instr::Operator(op));
            return Ok(());
        }

        // Classical shunting rule: pop while the stack top dominates
        loop {
            let top = match self.ops.last() {
                Some(StackOp::Operator(top)) => *top,
                _ => break,
            };
            let pops = match op.assoc {
                Assoc::Left => top.precedence >= op.precedence,
                Assoc::Right => top.precedence > op.precedence,
            };
            if !pops {
                break;
            }
            self.ops.pop();
            self.output.push(Instr::Operator(top));
        }

        self.ops.push(StackOp::Operator(op));
        self.last = Last::Operator;
        Ok(())
    }

    fn on_left_paren(&mut self, token: Token) -> Result<(), EvalError> {
        if self.last == Last::Name {
            // A name followed by `(` starts a function call: lift the name
            // off the output stack onto the operator stack as a call marker
            if self.level + 1 >= MAX_NESTED_CALLS {
                return Err(EvalError::TooManyNestedCalls { at: token.at });
            }
            let name = match self.output.pop() {
                Some(Instr::Constant(name)) => name,
                other => {
                    return Err(EvalError::ImplementationError {
                        detail: format!("expected a name on the output stack, found {other:?}"),
                    });
                }
            };
            self.ops.push(StackOp::Call(name));
            self.level += 1;
            self.paren_depth[self.level] = 1;
            self.args[self.level] = 0;
        } else if matches!(
            self.last,
            Last::Start | Last::LeftParen | Last::Operator | Last::Comma
        ) {
            self.ops.push(StackOp::LeftParen);
            self.paren_depth[self.level] += 1;
        } else {
            return Err(EvalError::UnexpectedToken {
                token: "opening parenthesis".to_string(),
                at: token.at,
            });
        }

        self.last = Last::LeftParen;
        Ok(())
    }

    fn on_right_paren(&mut self, token: Token) -> Result<(), EvalError> {
        let mut found_open = false;

        if matches!(
            self.last,
            Last::Number
                | Last::RightParen
                | Last::Name
                | Last::Variable
                | Last::LeftParen
                | Last::RegisterRecall
        ) {
            // One more argument, unless the call or group was empty
            if self.last != Last::LeftParen {
                self.args[self.level] += 1;
            }

            while let Some(entry) = self.ops.pop() {
                match entry {
                    StackOp::Call(name) => {
                        self.output.push(Instr::Call {
                            name,
                            argc: self.args[self.level],
                        });
                        found_open = true;
                        break;
                    }
                    StackOp::LeftParen => {
                        found_open = true;
                        break;
                    }
                    StackOp::Operator(op) => self.output.push(Instr::Operator(op)),
                }
            }
        }

        // A call whose paren depth is back down to one is being closed by
        // this parenthesis
        if self.last != Last::Comma && self.level > 0 && self.paren_depth[self.level] == 1 {
            found_open = true;
        }

        if !found_open {
            return Err(EvalError::UnexpectedClosingParenthesis { at: token.at });
        }

        self.paren_depth[self.level] -= 1;
        if self.paren_depth[self.level] == 0 && self.level > 0 {
            self.level -= 1;
        }

        self.last = Last::RightParen;
        Ok(())
    }

    fn on_comma(&mut self, token: Token) -> Result<(), EvalError> {
        if !matches!(
            self.last,
            Last::Number | Last::Name | Last::Variable | Last::RightParen | Last::RegisterRecall
        ) {
            return Err(EvalError::UnexpectedArgumentSeparator { at: token.at });
        }

        self.args[self.level] += 1;

        // Flush pending operators for the argument that just ended. A call
        // marker stays on the stack (the closing paren resolves it); a plain
        // open paren is consumed.
        loop {
            match self.ops.pop() {
                Some(StackOp::Call(name)) => {
                    self.ops.push(StackOp::Call(name));
                    break;
                }
                Some(StackOp::LeftParen) => break,
                Some(StackOp::Operator(op)) => self.output.push(Instr::Operator(op)),
                None => {
                    return Err(EvalError::UnexpectedArgumentSeparator { at: token.at });
                }
            }
        }

        self.last = Last::Comma;
        Ok(())
    }

    fn on_register_save(&mut self, index: Option<u32>, token: Token) -> Result<(), EvalError> {
        let index = self.checked_index(index, &token)?;
        // Inert: emitted immediately, the context is left untouched
        self.output.push(Instr::RegisterSave(index));
        Ok(())
    }

    fn on_register_recall(&mut self, index: Option<u32>, token: Token) -> Result<(), EvalError> {
        if !self.value_can_start_here() {
            return Err(EvalError::UnexpectedToken {
                token: format!("register recall '{}'", self.text(&token)),
                at: token.at,
            });
        }
        let index = self.checked_index(index, &token)?;
        self.output.push(Instr::RegisterRecall(index));
        self.last = Last::RegisterRecall;
        Ok(())
    }

    fn checked_index(
        &self,
        index: Option<u32>,
        token: &Token,
    ) -> Result<Option<usize>, EvalError> {
        match index {
            Some(index) if index as usize >= MAX_REGISTERS => {
                Err(EvalError::InvalidRegisterIndex {
                    index,
                    at: Some(token.at),
                })
            }
            Some(index) => Ok(Some(index as usize)),
            None => Ok(None),
        }
    }

    fn finish(mut self) -> Result<Vec<Instr>, EvalError> {
        if self.level != 0 {
            return Err(EvalError::UnterminatedFunctionCall);
        }
        if self.paren_depth[0] != 0 {
            return Err(EvalError::UnbalancedParentheses);
        }

        while let Some(entry) = self.ops.pop() {
            match entry {
                StackOp::Operator(op) => self.output.push(Instr::Operator(op)),
                StackOp::LeftParen => return Err(EvalError::UnbalancedParentheses),
                StackOp::Call(_) => return Err(EvalError::UnterminatedFunctionCall),
            }
        }

        Ok(self.output)
    }
}

//! Lexer for the expression language.
//!
//! The lexer is a byte cursor over the input producing one spanned [`Token`]
//! per call. Dispatch is on the first character after whitespace: names,
//! numbers, parentheses, comma, `$variable`, `#register` constructs, and
//! finally a longest-prefix match against the operator table. Number tokens
//! are only validated here; [`literal_value`] converts them when the parser
//! emits the instruction.

use super::operators;
use super::types::{Position, Token, TokenKind};

pub(crate) struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !b.is_ascii_whitespace() {
                break;
            }
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if b != b'\r' {
                self.column += 1;
            }
            self.pos += 1;
        }
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Scans and returns the next token.
    ///
    /// Once `Eof` has been returned, further calls keep returning `Eof`. For
    /// `Error` tokens, `end` is the offset of the offending byte.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let at = self.position();
        let start = self.pos;

        let Some(first) = self.peek() else {
            return Token {
                kind: TokenKind::Eof,
                start,
                end: start,
                at,
            };
        };

        let kind = match first {
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.scan_name(),
            b'0'..=b'9' => self.scan_number(),
            b'(' => {
                self.advance();
                TokenKind::LeftParen
            }
            b')' => {
                self.advance();
                TokenKind::RightParen
            }
            b',' => {
                self.advance();
                TokenKind::Comma
            }
            b'$' => return self.scan_variable(at),
            b'#' => self.scan_register(),
            _ => match operators::match_operator(&self.src[self.pos..]) {
                Some(op) => {
                    for _ in 0..op.symbol.len() {
                        self.advance();
                    }
                    TokenKind::Operator(op)
                }
                None => TokenKind::Error,
            },
        };

        Token {
            kind,
            start,
            end: self.pos,
            at,
        }
    }

    fn scan_name(&mut self) -> TokenKind {
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.advance();
            } else {
                break;
            }
        }
        TokenKind::Name
    }

    /// `$name`: the token span covers the name without the `$` sigil.
    fn scan_variable(&mut self, at: Position) -> Token {
        self.advance();
        let start = self.pos;

        let kind = match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                self.scan_name();
                TokenKind::Variable
            }
            _ => TokenKind::Error,
        };

        Token {
            kind,
            start,
            end: self.pos,
            at,
        }
    }

    /// `#k!` / `#k?` with optional whitespace around the optional index.
    fn scan_register(&mut self) -> TokenKind {
        self.advance();
        self.skip_whitespace();

        let mut index: Option<u32> = None;
        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            let digit = (b - b'0') as u32;
            index = Some(
                index
                    .unwrap_or(0)
                    .saturating_mul(10)
                    .saturating_add(digit),
            );
            self.advance();
        }
        self.skip_whitespace();

        match self.peek() {
            Some(b'!') => {
                self.advance();
                TokenKind::RegisterSave(index)
            }
            Some(b'?') => {
                self.advance();
                TokenKind::RegisterRecall(index)
            }
            _ => TokenKind::Error,
        }
    }

    /// Numbers: an integer with an optional base letter (`0x`, `0b`, `0o`,
    /// `0d`), a leading-zero octal, or a float with at most one decimal
    /// point and one exponent. A digit exceeding the current base, a second
    /// base letter, or an ill-placed `.` aborts the token.
    fn scan_number(&mut self) -> TokenKind {
        let mut base: u32 = 10;
        let mut found_base = false;
        let mut found_dot = false;
        let mut found_exp = false;

        // A number starting with zero is octal, unless something
        // float-specific (a decimal point or an exponent) appears in the
        // digit run
        if self.bytes[self.pos] == b'0'
            && self
                .bytes
                .get(self.pos + 1)
                .is_some_and(|b| b.is_ascii_hexdigit())
        {
            let mut octal = true;
            let mut ahead = self.pos + 1;
            while let Some(&b) = self.bytes.get(ahead) {
                if b == b'.' || b == b'E' || b == b'e' {
                    octal = false;
                    break;
                }
                if !b.is_ascii_hexdigit() {
                    break;
                }
                ahead += 1;
            }
            if octal {
                base = 8;
                self.advance();
            }
        }

        loop {
            let Some(b) = self.peek() else { break };

            match b.to_ascii_uppercase() {
                // Base letter, valid once and only before any float syntax.
                // Note that this claims B and D even in hex literals.
                letter @ (b'X' | b'B' | b'D' | b'O') => {
                    if found_dot || found_exp || found_base {
                        return TokenKind::Error;
                    }
                    base = match letter {
                        b'X' => 16,
                        b'D' => 10,
                        b'O' => 8,
                        _ => 2,
                    };
                    found_base = true;
                    self.advance();
                }
                b'.' => {
                    if found_dot || found_exp || found_base {
                        return TokenKind::Error;
                    }
                    found_dot = true;
                    self.advance();
                }
                // Exponent marker when no base is in effect; with a base it
                // is the hex digit E and falls through to the digit arm
                b'E' if !found_base => {
                    if found_exp {
                        return TokenKind::Error;
                    }
                    found_exp = true;
                    self.advance();
                    if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                        self.advance();
                    }
                }
                digit @ (b'0'..=b'9' | b'A'..=b'F') => {
                    let value = match digit {
                        b'0'..=b'9' => (digit - b'0') as u32,
                        _ => (digit - b'A') as u32 + 10,
                    };
                    if value >= base {
                        return TokenKind::Error;
                    }
                    self.advance();
                }
                _ => break,
            }
        }

        TokenKind::Number
    }
}

/// Converts a validated number token to its value.
///
/// Integer forms with an explicit or implied base are accumulated manually;
/// everything else goes through the standard float parser. Returns `None`
/// when the text does not convert in full.
pub(crate) fn literal_value(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();

    if bytes.first() == Some(&b'0') && bytes.len() > 1 {
        let (base, digits) = match bytes[1].to_ascii_uppercase() {
            b'B' => (2u32, &bytes[2..]),
            b'O' => (8, &bytes[2..]),
            b'D' => (10, &bytes[2..]),
            b'X' => (16, &bytes[2..]),
            _ => {
                if text.contains(['.', 'e', 'E']) {
                    return text.parse::<f64>().ok();
                }
                (8, &bytes[1..])
            }
        };

        let mut value = 0.0f64;
        for &b in digits {
            let digit = (b as char).to_digit(16)?;
            if digit >= base {
                return None;
            }
            value = value * base as f64 + digit as f64;
        }
        return Some(value);
    }

    text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::operators::OpCode;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            out.push(token.kind);
            if done {
                break;
            }
        }
        out
    }

    fn single(input: &str) -> Token {
        Lexer::new(input).next_token()
    }

    #[test]
    fn names_and_numbers() {
        assert_eq!(
            kinds("foo 12"),
            vec![TokenKind::Name, TokenKind::Number, TokenKind::Eof]
        );
        let token = single("delta_1 ");
        assert_eq!((token.start, token.end), (0, 7));
    }

    #[test]
    fn operators_match_longest_spelling() {
        let mut lexer = Lexer::new("** * <<");
        let mut codes = Vec::new();
        loop {
            match lexer.next_token().kind {
                TokenKind::Operator(op) => codes.push(op.opcode),
                TokenKind::Eof => break,
                other => panic!("unexpected token {other:?}"),
            }
        }
        assert_eq!(codes, vec![OpCode::Pow, OpCode::Mul, OpCode::Shl]);

        // A lone '<' matches no operator spelling
        assert_eq!(single("<").kind, TokenKind::Error);
    }

    #[test]
    fn unknown_character_is_an_error_token() {
        assert_eq!(single("@").kind, TokenKind::Error);
    }

    #[test]
    fn number_bases() {
        assert_eq!(literal_value("0xFF"), Some(255.0));
        assert_eq!(literal_value("0b101"), Some(5.0));
        assert_eq!(literal_value("0o17"), Some(15.0));
        assert_eq!(literal_value("0d42"), Some(42.0));
        assert_eq!(literal_value("0777"), Some(511.0));
        assert_eq!(literal_value("42"), Some(42.0));
    }

    #[test]
    fn number_floats() {
        assert_eq!(literal_value("1.5"), Some(1.5));
        assert_eq!(literal_value("0.5"), Some(0.5));
        assert_eq!(literal_value("1e3"), Some(1000.0));
        assert_eq!(literal_value("1.5e+2"), Some(150.0));
        assert_eq!(literal_value("2E-2"), Some(0.02));
    }

    #[test]
    fn digit_beyond_base_aborts_the_token() {
        assert_eq!(single("0b12").kind, TokenKind::Error);
        assert_eq!(single("09").kind, TokenKind::Error);
        assert_eq!(single("0o8").kind, TokenKind::Error);
    }

    #[test]
    fn float_syntax_is_exclusive_with_bases() {
        // A second base letter, or a dot after a base, aborts
        assert_eq!(single("0x1.5").kind, TokenKind::Error);
        assert_eq!(single("1.2.3").kind, TokenKind::Error);
        assert_eq!(single("1e5e5").kind, TokenKind::Error);
        // E is a plain hex digit once a base is in effect
        assert_eq!(single("0xE").kind, TokenKind::Number);
        assert_eq!(literal_value("0xE"), Some(14.0));
    }

    #[test]
    fn float_marker_defeats_octal_detection() {
        let token = single("05e1");
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(literal_value("05e1"), Some(50.0));
    }

    #[test]
    fn variables() {
        let mut lexer = Lexer::new("$TIME + 1");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Variable);
        // The span excludes the sigil
        assert_eq!((token.start, token.end), (1, 5));

        assert_eq!(single("$").kind, TokenKind::Error);
        assert_eq!(single("$1").kind, TokenKind::Error);
    }

    #[test]
    fn registers() {
        assert_eq!(single("#0!").kind, TokenKind::RegisterSave(Some(0)));
        assert_eq!(single("#63?").kind, TokenKind::RegisterRecall(Some(63)));
        assert_eq!(single("#!").kind, TokenKind::RegisterSave(None));
        assert_eq!(single("#?").kind, TokenKind::RegisterRecall(None));
        // Whitespace is permitted around the index
        assert_eq!(single("# 12 !").kind, TokenKind::RegisterSave(Some(12)));
        // Anything but ! or ? terminates with an error
        assert_eq!(single("#0").kind, TokenKind::Error);
        assert_eq!(single("#0*").kind, TokenKind::Error);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let mut lexer = Lexer::new("1 +\n  foo");
        assert_eq!(lexer.next_token().at, Position { line: 1, column: 1 });
        assert_eq!(lexer.next_token().at, Position { line: 1, column: 3 });
        let name = lexer.next_token();
        assert_eq!(name.at, Position { line: 2, column: 3 });
    }

    #[test]
    fn mixed_literal_fails_conversion() {
        // Lexes as a number (X switches the base mid-run) but does not
        // convert, because base letters only count after a leading zero
        assert_eq!(single("12x34").kind, TokenKind::Number);
        assert_eq!(literal_value("12x34"), None);
    }
}

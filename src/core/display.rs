use std::fmt;
use std::result;

use super::{RpascalError, TokenType, Value};

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        // Handle the literal payloads separately so we don't have to
        // allocate for the rest.
        if let Self::IntegerConst(n) = self {
            return write!(f, "{}", n);
        }
        if let Self::RealConst(n) = self {
            return write!(f, "{:?}", n);
        }

        let token = match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Assign => ":=",
            Self::Identifier => "identifier",
            Self::Program => "PROGRAM",
            Self::Var => "VAR",
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Div => "DIV",
            Self::Eof => "end of input",
            // we already handled the literals above
            _ => unreachable!(),
        };

        write!(f, "{}", token)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            // reals format with '{:?}' so the two kinds stay
            // distinguishable in output: 3 vs 3.0
            Self::Int(n) => write!(f, "{}", n),
            Self::Real(n) => write!(f, "{:?}", n),
        }
    }
}

impl fmt::Display for RpascalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Self::UnrecognizedCharacter(c, line) => {
                write!(f, "error: {}: unrecognized character '{}'", line, c)
            }
            Self::UnterminatedComment(line) => {
                write!(f, "error: {}: unterminated comment", line)
            }
            Self::MalformedNumber(lexeme, line) => {
                write!(f, "error: {}: malformed number '{}'", line, lexeme)
            }
            Self::SyntaxError { expected, found } => write!(
                f,
                "error: {}: expected '{}', found '{}'",
                found.line, expected, found.token_type
            ),
            Self::UndefinedVariable(name) => {
                write!(f, "runtime error: undefined variable '{}'", name)
            }
            Self::DivisionByZero(line) => {
                write!(f, "runtime error: {}: division by zero", line)
            }
            Self::UnhandledOperator(token) => write!(
                f,
                "internal error: {}: no evaluation rule for '{}'",
                token.line, token
            ),
        }
    }
}

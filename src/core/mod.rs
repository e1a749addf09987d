use std::error;
use std::fmt;
use std::rc::Rc;
use std::result;

mod display;
mod environment;
mod interpreter;
mod parser;
mod scanner;

pub type Environment = environment::Environment;
pub type Interpreter<'a> = interpreter::Interpreter<'a>;
pub type Parser = parser::Parser;
pub type Result<T> = result::Result<T, RpascalError>;
pub type Scanner = scanner::Scanner;

#[derive(Debug, PartialEq)]
pub enum RpascalError {
    /// A character was encountered that matches no token rule. Carries the
    /// offending character and the line it was found on.
    UnrecognizedCharacter(char, usize),
    /// A '{' comment opener was never closed by a matching '}' before the
    /// end of the source.
    UnterminatedComment(usize),
    /// A numeric literal contains a second '.' (e.g. `7.2.3`), or its digits
    /// do not fit the literal's numeric type.
    MalformedNumber(String, usize),
    /// The current token does not match the kind the grammar requires at
    /// this point. Carries the expected kind and the token actually found.
    SyntaxError { expected: TokenType, found: Token },
    /// A variable was read before anything was assigned to it.
    UndefinedVariable(String),
    /// An integer or real division had a zero divisor.
    DivisionByZero(usize),
    /// An operator token reached the evaluator with no evaluation rule.
    /// A conforming parser never produces one; hitting this path is an
    /// implementation bug, not a user error.
    UnhandledOperator(Token),
}

impl error::Error for RpascalError {}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenType {
    // Single-character tokens
    LeftParen,
    RightParen,
    Plus,
    Minus,
    Star,
    Slash,
    Semicolon,
    Colon,
    Comma,
    Dot,

    // Two character tokens
    Assign,

    // Literals
    Identifier,
    IntegerConst(i64),
    RealConst(f64),

    // Reserved words. 'Div' is the integer-division operator and is never
    // conflated with the lexical '/' (real division).
    Program,
    Var,
    Begin,
    End,
    Integer,
    Real,
    Div,

    Eof,
}

impl TokenType {
    /// Looks up `word` in the reserved-word table. The table is
    /// case-sensitive: `BEGIN` is a reserved word, `begin` is an identifier.
    #[must_use]
    pub fn from_word(word: &str) -> TokenType {
        match word {
            "PROGRAM" => TokenType::Program,
            "VAR" => TokenType::Var,
            "DIV" => TokenType::Div,
            "INTEGER" => TokenType::Integer,
            "REAL" => TokenType::Real,
            "BEGIN" => TokenType::Begin,
            "END" => TokenType::End,
            _ => TokenType::Identifier,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    token_type: TokenType,
    lexeme: Rc<str>,
    line: usize,
}

impl Token {
    #[must_use]
    pub fn new(token_type: TokenType, lexeme: String, line: usize) -> Self {
        Token {
            token_type,
            lexeme: Rc::from(lexeme),
            line,
        }
    }
}

/// A Pascal numeric value.
///
/// The two numeric kinds stay distinguished through evaluation: arithmetic
/// on two `Int`s yields an `Int` (except real division, which always yields
/// a `Real`), and any `Real` operand promotes the result to `Real`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
}

impl Value {
    /// Widens self to `f64` for promoted arithmetic.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_real(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Real(n) => n,
        }
    }
}

/// spi implements the AST with OOP. Namely spi:
/// - Defines an abstract class: AST
/// - Creates a subclass for each variant (i.e. BinOp, Num, Compound, ...)
/// - Uses a reflective visitor (`visit_` + type name) to dispatch on them.
///
/// Here the node set is closed: statements and expressions are sum types and
/// the evaluator matches on them exhaustively, so a node kind without an
/// evaluation rule is a compile error rather than a runtime surprise.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    name: Token,
    block: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    declarations: Vec<VarDecl>,
    compound: Stmt,
}

/// A single `name : type` declaration record. A source line declaring
/// several names (`a, b, c : INTEGER`) expands into one of these per name.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    name: Token,
    type_spec: TypeSpec,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TypeSpec {
    Integer,
    Real,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Compound(Vec<Stmt>),
    Assign(Token, Expr),
    NoOp,
}

/// Operator tokens ride inside `Binary` and `Unary` nodes, so evaluation
/// errors get a line number for free.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Binary(Box<Expr>, Token, Box<Expr>),
    Unary(Token, Box<Expr>),
    Num(Token),
    Var(Token),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self.lexeme)
    }
}

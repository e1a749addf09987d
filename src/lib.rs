//! `librpascal` is the library that powers the rpascal interpreter.
//!
//! `rpascal` is a rust port of the little Pascal interpreter built over the
//! course of Ruslan Spivak's *Let's Build a Simple Interpreter* series (i.e.
//! `spi`). `rpascal` differs from `spi` in a number of ways namely:
//! - `rpascal` uses `std::result::Result` to report errors (`spi` uses
//!   exceptions)
//! - `rpascal` uses `Stmt` and `Expr` sum types to represent statements and
//!   expressions, respectively (`spi` uses an abstract `AST` class and
//!   specialized subclasses)
//! - `rpascal` matches exhaustively on node variants in the evaluator (`spi`
//!   looks up `visit_*` methods reflectively by type name)
//! - `rpascal` hands the interpreter a caller-owned variable store (`spi`
//!   keeps a `GLOBAL_SCOPE` dict as class state)
#![warn(clippy::pedantic)]

pub mod core;

use super::{Environment, Expr, Program, Result, RpascalError, Stmt, TokenType, Value};

/// Walks a parsed `Program` once, depth-first and left-to-right, mutating a
/// caller-owned variable store.
///
/// The store is borrowed rather than owned so independent runs never share
/// state: evaluating the same tree against two fresh stores produces the
/// same contents both times, and the tree itself is never mutated.
pub struct Interpreter<'a> {
    environment: &'a mut Environment,
}

impl<'a> Interpreter<'a> {
    #[must_use]
    pub fn new(environment: &'a mut Environment) -> Self {
        Interpreter { environment }
    }

    /// Executes `program` to completion or to its first error.
    ///
    /// Declarations are informational in this language: they parse into
    /// `VarDecl` records but evaluation does not consult them, so a
    /// declared-but-never-assigned variable still reads as undefined.
    pub fn interpret(&mut self, program: &Program) -> Result<()> {
        self.execute(&program.block.compound)
    }

    fn execute(&mut self, statement: &Stmt) -> Result<()> {
        match statement {
            Stmt::Compound(statements) => {
                // strictly in source order, each statement completing
                // before the next starts
                for statement in statements {
                    self.execute(statement)?;
                }

                Ok(())
            }
            Stmt::Assign(name, expr) => {
                let value = self.evaluate(expr)?;
                self.environment.define(name.lexeme.to_string(), value);

                Ok(())
            }
            Stmt::NoOp => Ok(()),
        }
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Num(token) => match token.token_type {
                TokenType::IntegerConst(n) => Ok(Value::Int(n)),
                TokenType::RealConst(n) => Ok(Value::Real(n)),
                _ => Err(RpascalError::UnhandledOperator(token.clone())),
            },
            Expr::Var(token) => self.environment.get(&token.lexeme),
            Expr::Unary(token, operand) => {
                let value = self.evaluate(operand)?;

                match token.token_type {
                    TokenType::Plus => Ok(value),
                    TokenType::Minus => Ok(match value {
                        Value::Int(n) => Value::Int(-n),
                        Value::Real(n) => Value::Real(-n),
                    }),
                    _ => Err(RpascalError::UnhandledOperator(token.clone())),
                }
            }
            Expr::Binary(left_expr, token, right_expr) => {
                let left = self.evaluate(left_expr)?;
                let right = self.evaluate(right_expr)?;

                match token.token_type {
                    TokenType::Plus => Ok(match (left, right) {
                        (Value::Int(l), Value::Int(r)) => Value::Int(l + r),
                        (l, r) => Value::Real(l.as_real() + r.as_real()),
                    }),
                    TokenType::Minus => Ok(match (left, right) {
                        (Value::Int(l), Value::Int(r)) => Value::Int(l - r),
                        (l, r) => Value::Real(l.as_real() - r.as_real()),
                    }),
                    TokenType::Star => Ok(match (left, right) {
                        (Value::Int(l), Value::Int(r)) => Value::Int(l * r),
                        (l, r) => Value::Real(l.as_real() * r.as_real()),
                    }),
                    // lexical '/' always divides as reals, whatever the
                    // operand kinds
                    TokenType::Slash => {
                        if right.as_real() == 0.0 {
                            return Err(RpascalError::DivisionByZero(token.line));
                        }

                        Ok(Value::Real(left.as_real() / right.as_real()))
                    }
                    // keyword 'DIV' truncates toward zero
                    TokenType::Div => {
                        if right.as_real() == 0.0 {
                            return Err(RpascalError::DivisionByZero(token.line));
                        }

                        Ok(match (left, right) {
                            (Value::Int(l), Value::Int(r)) => Value::Int(l / r),
                            #[allow(clippy::cast_possible_truncation)]
                            (l, r) => Value::Int((l.as_real() / r.as_real()).trunc() as i64),
                        })
                    }
                    _ => Err(RpascalError::UnhandledOperator(token.clone())),
                }
            }
        }
    }
}

use std::mem::{self, discriminant};

use super::{
    Block, Expr, Program, Result, RpascalError, Scanner, Stmt, Token, TokenType, TypeSpec, VarDecl,
};

/// Parses a token stream into an abstract syntax tree.
///
/// `Parser` implements the following grammar by recursive descent, one
/// method per production, with exactly one token of lookahead:
///
/// ```notrust
/// program        → "PROGRAM" IDENTIFIER ";" block "." ;
/// block          → declarations compound_statement ;
/// declarations   → ( "VAR" ( variable_declaration ";" )+ )? ;
/// variable_declaration
///                → IDENTIFIER ( "," IDENTIFIER )* ":" type_spec ;
/// type_spec      → "INTEGER" | "REAL" ;
///
/// compound_statement
///                → "BEGIN" statement_list "END" ;
/// statement_list → statement ( ";" statement )* ;
/// statement      → compound_statement
///                | assignment_statement
///                | empty ;
/// assignment_statement
///                → IDENTIFIER ":=" expr ;
///
/// expr           → term ( ( "+" | "-" ) term )* ;
/// term           → factor ( ( "*" | "/" | "DIV" ) factor )* ;
/// factor         → ( "+" | "-" ) factor
///                | INTEGER_CONST | REAL_CONST | IDENTIFIER
///                | "(" expr ")" ;
/// ```
///
/// The parser owns its token source and pulls one token at a time; the
/// stream position only ever advances, and there is no backtracking.
pub struct Parser {
    scanner: Scanner,
    current: Token,
}

impl Parser {
    /// Creates a `Parser` primed with the first token of `scanner`'s source.
    pub fn new(mut scanner: Scanner) -> Result<Self> {
        let current = scanner.next_token()?;
        Ok(Parser { scanner, current })
    }

    /// Parses the whole token stream into a `Program`.
    ///
    /// The grammar must consume every token: anything left over after the
    /// closing '.' is a syntax error.
    pub fn parse(mut self) -> Result<Program> {
        let program = self.program()?;
        self.eat(TokenType::Eof)?;
        Ok(program)
    }

    fn program(&mut self) -> Result<Program> {
        self.eat(TokenType::Program)?;
        let name = self.eat(TokenType::Identifier)?;
        self.eat(TokenType::Semicolon)?;
        let block = self.block()?;
        self.eat(TokenType::Dot)?;

        Ok(Program { name, block })
    }

    fn block(&mut self) -> Result<Block> {
        let declarations = self.declarations()?;
        let compound = self.compound_statement()?;

        Ok(Block {
            declarations,
            compound,
        })
    }

    fn declarations(&mut self) -> Result<Vec<VarDecl>> {
        let mut declarations = Vec::new();

        if self.check(&TokenType::Var) {
            self.eat(TokenType::Var)?;

            // 'VAR' requires at least one declaration line
            loop {
                self.variable_declaration(&mut declarations)?;
                self.eat(TokenType::Semicolon)?;

                if !self.check(&TokenType::Identifier) {
                    break;
                }
            }
        }

        Ok(declarations)
    }

    /// Parses one declaration line. A line declaring several names sharing
    /// one type (`a, b, c : INTEGER`) expands into one `VarDecl` per name,
    /// in declaration order.
    fn variable_declaration(&mut self, declarations: &mut Vec<VarDecl>) -> Result<()> {
        let mut names = vec![self.eat(TokenType::Identifier)?];

        while self.check(&TokenType::Comma) {
            self.eat(TokenType::Comma)?;
            names.push(self.eat(TokenType::Identifier)?);
        }

        self.eat(TokenType::Colon)?;
        let type_spec = self.type_spec()?;

        for name in names {
            declarations.push(VarDecl { name, type_spec });
        }

        Ok(())
    }

    fn type_spec(&mut self) -> Result<TypeSpec> {
        if self.check(&TokenType::Integer) {
            self.eat(TokenType::Integer)?;
            return Ok(TypeSpec::Integer);
        }

        self.eat(TokenType::Real)?;
        Ok(TypeSpec::Real)
    }

    fn compound_statement(&mut self) -> Result<Stmt> {
        self.eat(TokenType::Begin)?;
        let statements = self.statement_list()?;
        self.eat(TokenType::End)?;

        Ok(Stmt::Compound(statements))
    }

    fn statement_list(&mut self) -> Result<Vec<Stmt>> {
        let mut statements = vec![self.statement()?];

        while self.check(&TokenType::Semicolon) {
            self.eat(TokenType::Semicolon)?;
            statements.push(self.statement()?);
        }

        Ok(statements)
    }

    fn statement(&mut self) -> Result<Stmt> {
        if self.check(&TokenType::Begin) {
            return self.compound_statement();
        }

        if self.check(&TokenType::Identifier) {
            return self.assignment_statement();
        }

        Ok(Stmt::NoOp)
    }

    fn assignment_statement(&mut self) -> Result<Stmt> {
        let name = self.eat(TokenType::Identifier)?;
        self.eat(TokenType::Assign)?;
        let value = self.expr()?;

        Ok(Stmt::Assign(name, value))
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut node = self.term()?;

        // left-fold keeps '+' and '-' left-associative
        while self.check(&TokenType::Plus) || self.check(&TokenType::Minus) {
            let operator = self.advance()?;
            let right = self.term()?;

            node = Expr::Binary(Box::new(node), operator, Box::new(right));
        }

        Ok(node)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut node = self.factor()?;

        while self.check(&TokenType::Star)
            || self.check(&TokenType::Slash)
            || self.check(&TokenType::Div)
        {
            let operator = self.advance()?;
            let right = self.factor()?;

            node = Expr::Binary(Box::new(node), operator, Box::new(right));
        }

        Ok(node)
    }

    fn factor(&mut self) -> Result<Expr> {
        // unary '+'/'-' bind tighter than any binary operator and recurse,
        // so '--5' and '-+5' parse
        if self.check(&TokenType::Plus) || self.check(&TokenType::Minus) {
            let operator = self.advance()?;
            let operand = self.factor()?;

            return Ok(Expr::Unary(operator, Box::new(operand)));
        }

        // the literal payloads are dummies; check only compares discriminants
        if self.check(&TokenType::IntegerConst(0)) || self.check(&TokenType::RealConst(0.0)) {
            return Ok(Expr::Num(self.advance()?));
        }

        if self.check(&TokenType::Identifier) {
            return Ok(Expr::Var(self.advance()?));
        }

        self.eat(TokenType::LeftParen)?;
        let node = self.expr()?;
        self.eat(TokenType::RightParen)?;

        Ok(node)
    }

    /// Asserts that the current token is of `expected`'s kind, then
    /// advances past it. The mismatch case is the parser's single error
    /// path: every "required token missing" failure funnels through here.
    fn eat(&mut self, expected: TokenType) -> Result<Token> {
        if discriminant(&self.current.token_type) != discriminant(&expected) {
            return Err(RpascalError::SyntaxError {
                expected,
                found: self.current.clone(),
            });
        }

        self.advance()
    }

    fn check(&self, token_type: &TokenType) -> bool {
        discriminant(&self.current.token_type) == discriminant(token_type)
    }

    /// Unconditionally steps to the next token, returning the one stepped
    /// over. Callers must `check` first unless any token will do.
    fn advance(&mut self) -> Result<Token> {
        let next = self.scanner.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Program> {
        Parser::new(Scanner::new(source.to_owned()))?.parse()
    }

    /// Wraps a statement list in the minimal program boilerplate.
    fn wrap(body: &str) -> String {
        format!("PROGRAM test;\nBEGIN\n{}\nEND.", body)
    }

    /// Pulls the expression out of a program whose body is a lone
    /// assignment.
    fn lone_assignment(source: &str) -> Expr {
        let program = parse(source).unwrap();

        match program.block.compound {
            Stmt::Compound(mut statements) => {
                assert_eq!(1, statements.len());
                match statements.remove(0) {
                    Stmt::Assign(_, expr) => expr,
                    s => panic!("expected an assignment, got {:?}", s),
                }
            }
            s => panic!("expected a compound, got {:?}", s),
        }
    }

    #[test]
    fn it_can_parse_a_minimal_program() {
        let program = parse("PROGRAM empty; BEGIN END.").unwrap();

        assert!(program.block.declarations.is_empty());
        assert_eq!(Stmt::Compound(vec![Stmt::NoOp]), program.block.compound);
    }

    #[test]
    fn it_gives_multiplication_higher_precedence_than_addition() {
        let expr = lone_assignment(&wrap("x := 1 + 2 * 3"));

        let product = Expr::Binary(
            Box::new(Expr::Num(Token::new(
                TokenType::IntegerConst(2),
                "2".to_owned(),
                3,
            ))),
            Token::new(TokenType::Star, "*".to_owned(), 3),
            Box::new(Expr::Num(Token::new(
                TokenType::IntegerConst(3),
                "3".to_owned(),
                3,
            ))),
        );
        let expected = Expr::Binary(
            Box::new(Expr::Num(Token::new(
                TokenType::IntegerConst(1),
                "1".to_owned(),
                3,
            ))),
            Token::new(TokenType::Plus, "+".to_owned(), 3),
            Box::new(product),
        );

        assert_eq!(expected, expr);
    }

    #[test]
    fn it_folds_subtraction_to_the_left() {
        // 10 - 2 - 3 must parse as (10 - 2) - 3
        let expr = lone_assignment(&wrap("x := 10 - 2 - 3"));

        match expr {
            Expr::Binary(left, operator, right) => {
                assert_eq!(TokenType::Minus, operator.token_type);
                assert_eq!(
                    Expr::Num(Token::new(TokenType::IntegerConst(3), "3".to_owned(), 3)),
                    *right
                );
                assert!(matches!(*left, Expr::Binary(..)));
            }
            e => panic!("expected a binary expression, got {:?}", e),
        }
    }

    #[test]
    fn it_can_parse_chained_unary_operators() {
        let expr = lone_assignment(&wrap("x := --5"));

        let inner = Expr::Unary(
            Token::new(TokenType::Minus, "-".to_owned(), 3),
            Box::new(Expr::Num(Token::new(
                TokenType::IntegerConst(5),
                "5".to_owned(),
                3,
            ))),
        );
        let expected = Expr::Unary(
            Token::new(TokenType::Minus, "-".to_owned(), 3),
            Box::new(inner),
        );

        assert_eq!(expected, expr);
    }

    #[test]
    fn it_drops_parentheses_after_grouping() {
        // parenthesized expressions yield the inner node directly; there is
        // no grouping node in the tree
        let expr = lone_assignment(&wrap("x := (5)"));

        assert_eq!(
            Expr::Num(Token::new(TokenType::IntegerConst(5), "5".to_owned(), 3)),
            expr
        );
    }

    #[test]
    fn it_expands_a_multi_name_declaration_line() {
        let program = parse("PROGRAM test;\nVAR a, b, c : INTEGER;\nBEGIN END.").unwrap();

        let expected = vec![
            VarDecl {
                name: Token::new(TokenType::Identifier, "a".to_owned(), 2),
                type_spec: TypeSpec::Integer,
            },
            VarDecl {
                name: Token::new(TokenType::Identifier, "b".to_owned(), 2),
                type_spec: TypeSpec::Integer,
            },
            VarDecl {
                name: Token::new(TokenType::Identifier, "c".to_owned(), 2),
                type_spec: TypeSpec::Integer,
            },
        ];

        assert_eq!(expected, program.block.declarations);
    }

    #[test]
    fn it_can_parse_several_declaration_lines() {
        let program =
            parse("PROGRAM test;\nVAR a : INTEGER;\n    y : REAL;\nBEGIN END.").unwrap();

        assert_eq!(2, program.block.declarations.len());
        assert_eq!(TypeSpec::Integer, program.block.declarations[0].type_spec);
        assert_eq!(TypeSpec::Real, program.block.declarations[1].type_spec);
    }

    #[test]
    fn it_requires_a_declaration_after_var() {
        assert!(matches!(
            parse("PROGRAM test; VAR BEGIN END."),
            Err(RpascalError::SyntaxError { .. })
        ));
    }

    #[test]
    fn it_can_parse_a_nested_compound() {
        let program = parse(&wrap("BEGIN x := 1 END; y := 2")).unwrap();

        match program.block.compound {
            Stmt::Compound(statements) => {
                assert_eq!(2, statements.len());
                assert!(matches!(statements[0], Stmt::Compound(_)));
                assert!(matches!(statements[1], Stmt::Assign(..)));
            }
            s => panic!("expected a compound, got {:?}", s),
        }
    }

    #[test]
    fn it_parses_a_trailing_semicolon_as_an_empty_statement() {
        let program = parse(&wrap("x := 1;")).unwrap();

        assert_eq!(
            Stmt::Compound(vec![
                Stmt::Assign(
                    Token::new(TokenType::Identifier, "x".to_owned(), 3),
                    Expr::Num(Token::new(TokenType::IntegerConst(1), "1".to_owned(), 3)),
                ),
                Stmt::NoOp,
            ]),
            program.block.compound
        );
    }

    #[test]
    fn it_rejects_a_missing_assign() {
        let err = parse(&wrap("x : 1")).unwrap_err();

        match err {
            RpascalError::SyntaxError { expected, .. } => {
                assert_eq!(TokenType::Assign, expected);
            }
            e => panic!("expected a syntax error, got {:?}", e),
        }
    }

    #[test]
    fn it_rejects_trailing_tokens() {
        let err = parse("PROGRAM test; BEGIN END. extra").unwrap_err();

        match err {
            RpascalError::SyntaxError { expected, found } => {
                assert_eq!(TokenType::Eof, expected);
                assert_eq!(TokenType::Identifier, found.token_type);
            }
            e => panic!("expected a syntax error, got {:?}", e),
        }
    }

    #[test]
    fn it_rejects_an_unclosed_parenthesis() {
        let err = parse(&wrap("x := (1 + 2")).unwrap_err();

        match err {
            RpascalError::SyntaxError { expected, .. } => {
                assert_eq!(TokenType::RightParen, expected);
            }
            e => panic!("expected a syntax error, got {:?}", e),
        }
    }

    #[test]
    fn it_rejects_a_missing_program_header() {
        assert!(matches!(
            parse("BEGIN x := 1 END."),
            Err(RpascalError::SyntaxError { .. })
        ));
    }
}

use std::iter::Peekable;

use owned_chars::OwnedChars;

use super::{Result, RpascalError, Token, TokenType};

pub struct Scanner {
    // Scratch pad for the token currently being assembled
    scratch: String,
    chars: Peekable<OwnedChars>,
    line: usize,
}

impl Scanner {
    /// Creates a new `Scanner` whose referent is `source`.
    ///
    /// A `Scanner` is really just an encapsulated iterator over a given
    /// source `String`. Rather than borrowing the source, store it as a
    /// `Peekable<OwnedChars>` iterator so the scanner is self-contained.
    #[must_use]
    pub fn new(source: String) -> Self {
        Scanner {
            // cautiously optimistic allocation
            scratch: String::with_capacity(1024),
            chars: OwnedChars::from_string(source).peekable(),
            line: 1,
        }
    }

    /// Drains self into a list of tokens ending with `Eof`.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.token_type == TokenType::Eof;
            tokens.push(token);

            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scans the next token out of the source.
    ///
    /// Whitespace and `{ ... }` comments are skipped before the token
    /// starts. Once the source is exhausted every subsequent call returns an
    /// `Eof` token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.scratch.clear();

        while let Some(c) = self.peek() {
            match c {
                '\n' => {
                    self.line += 1;
                    self.chars.next();
                }
                '{' => {
                    self.chars.next();
                    self.skip_comment()?;
                }
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                _ => break,
            }
        }

        let c = match self.advance() {
            Some(c) => c,
            None => return Ok(Token::new(TokenType::Eof, String::new(), self.line)),
        };

        match c {
            '+' => Ok(self.token(TokenType::Plus)),
            '-' => Ok(self.token(TokenType::Minus)),
            '*' => Ok(self.token(TokenType::Star)),
            '/' => Ok(self.token(TokenType::Slash)),
            '(' => Ok(self.token(TokenType::LeftParen)),
            ')' => Ok(self.token(TokenType::RightParen)),
            '.' => Ok(self.token(TokenType::Dot)),
            ';' => Ok(self.token(TokenType::Semicolon)),
            ',' => Ok(self.token(TokenType::Comma)),
            ':' => {
                // ':=' must win over a bare ':'
                if let Some('=') = self.peek() {
                    self.advance();
                    Ok(self.token(TokenType::Assign))
                } else {
                    Ok(self.token(TokenType::Colon))
                }
            }
            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() => Ok(self.word()),
            c => Err(RpascalError::UnrecognizedCharacter(c, self.line)),
        }
    }

    /// Skips past a comment's closing '}'. The opening '{' has already been
    /// consumed. Comments do not nest.
    fn skip_comment(&mut self) -> Result<()> {
        let opened = self.line;

        loop {
            match self.chars.next() {
                Some('}') => return Ok(()),
                Some('\n') => self.line += 1,
                Some(_) => {}
                None => return Err(RpascalError::UnterminatedComment(opened)),
            }
        }
    }

    /// Scans a maximal run of digits with at most one '.'. A '.' means the
    /// literal is a real; a second '.' is malformed.
    fn number(&mut self) -> Result<Token> {
        let mut real = false;

        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    self.advance();
                }
                Some('.') => {
                    self.advance();
                    if real {
                        return Err(RpascalError::MalformedNumber(
                            String::from(&self.scratch),
                            self.line,
                        ));
                    }
                    real = true;
                }
                _ => break,
            }
        }

        let token_type = if real {
            TokenType::RealConst(self.parse_scratch::<f64>()?)
        } else {
            TokenType::IntegerConst(self.parse_scratch::<i64>()?)
        };

        Ok(self.token(token_type))
    }

    fn parse_scratch<T: std::str::FromStr>(&self) -> Result<T> {
        self.scratch
            .parse::<T>()
            .map_err(|_| RpascalError::MalformedNumber(String::from(&self.scratch), self.line))
    }

    /// Scans a maximal alphanumeric run and looks it up in the
    /// reserved-word table.
    fn word(&mut self) -> Token {
        while Scanner::is_alphanumeric(self.peek()) {
            self.advance();
        }

        self.token(TokenType::from_word(&self.scratch))
    }

    /// Adapter for Option<char>
    fn is_alphanumeric(c: Option<char>) -> bool {
        c.map_or(false, |c| c.is_ascii_alphanumeric())
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|c| {
            self.scratch.push(c);
            c
        })
    }

    fn token(&self, token_type: TokenType) -> Token {
        Token::new(token_type, String::from(&self.scratch), self.line)
    }
}

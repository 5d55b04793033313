//! Lexer module
//!
//! Splits action-script source into a flat token sequence: bare words,
//! quoted strings, and `{` / `}` block delimiters. `#` starts a line
//! comment.

pub mod tokens;

use tokens::*;

pub use tokenizer::tokenize;

/// Lexer error
#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("Unterminated string starting at {position}")]
    UnterminatedString { position: String },
    #[error("Invalid escape sequence: \\{sequence}")]
    InvalidEscape { sequence: String },
}

/// Tokenize source code
mod tokenizer {
    use super::*;
    use crate::util::span::{Position, Span};
    use std::iter::Peekable;
    use std::str::Chars;

    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();

        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    struct Lexer<'a> {
        chars: Peekable<Chars<'a>>,
        line: usize,
        column: usize,
        start_line: usize,
        start_column: usize,
    }

    impl<'a> Lexer<'a> {
        fn new(source: &'a str) -> Self {
            Self {
                chars: source.chars().peekable(),
                line: 1,
                column: 1,
                start_line: 1,
                start_column: 1,
            }
        }

        fn position(&self) -> Position {
            Position::new(self.line, self.column)
        }

        fn start_position(&self) -> Position {
            Position::new(self.start_line, self.start_column)
        }

        fn span(&self) -> Span {
            Span::new(self.start_position(), self.position())
        }

        fn advance(&mut self) -> Option<char> {
            match self.chars.next() {
                Some('\n') => {
                    self.line += 1;
                    self.column = 1;
                    Some('\n')
                }
                Some(c) => {
                    self.column += 1;
                    Some(c)
                }
                None => None,
            }
        }

        fn peek(&mut self) -> Option<&char> {
            self.chars.peek()
        }

        fn skip_whitespace_and_comments(&mut self) {
            while let Some(&c) = self.peek() {
                match c {
                    ' ' | '\t' | '\r' | '\n' => {
                        self.advance();
                    }
                    '#' => {
                        while let Some(&c) = self.peek() {
                            if c == '\n' {
                                break;
                            }
                            self.advance();
                        }
                    }
                    _ => break,
                }
            }
        }

        fn next_token(&mut self) -> Result<Option<Token>, LexError> {
            self.skip_whitespace_and_comments();

            if self.peek().is_none() {
                return Ok(None);
            }

            self.start_line = self.line;
            self.start_column = self.column;

            let c = match self.advance() {
                Some(c) => c,
                None => return Ok(None),
            };

            let token = match c {
                '{' => Token::new(TokenKind::OpenBrace, "{", self.span()),
                '}' => Token::new(TokenKind::CloseBrace, "}", self.span()),
                '"' | '\'' => self.scan_quoted(c)?,
                _ => self.scan_word(c),
            };

            Ok(Some(token))
        }

        fn scan_quoted(&mut self, quote: char) -> Result<Token, LexError> {
            let mut text = String::new();

            loop {
                match self.advance() {
                    None => {
                        return Err(LexError::UnterminatedString {
                            position: self.start_position().to_string(),
                        });
                    }
                    Some(c) if c == quote => break,
                    Some('\\') => {
                        let escaped = self.advance().ok_or_else(|| LexError::UnterminatedString {
                            position: self.start_position().to_string(),
                        })?;
                        match escaped {
                            'n' => text.push('\n'),
                            't' => text.push('\t'),
                            '\\' => text.push('\\'),
                            '"' => text.push('"'),
                            '\'' => text.push('\''),
                            other => {
                                return Err(LexError::InvalidEscape {
                                    sequence: other.to_string(),
                                });
                            }
                        }
                    }
                    Some(c) => text.push(c),
                }
            }

            Ok(Token::new(TokenKind::Quoted, text, self.span()))
        }

        fn scan_word(&mut self, first: char) -> Token {
            let mut text = String::new();
            text.push(first);

            while let Some(&c) = self.peek() {
                match c {
                    ' ' | '\t' | '\r' | '\n' | '{' | '}' | '#' => break,
                    _ => {
                        text.push(c);
                        self.advance();
                    }
                }
            }

            Token::new(TokenKind::Word, text, self.span())
        }
    }
}

#[cfg(test)]
mod tests;

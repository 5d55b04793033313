//! Token reader
//!
//! A sequential cursor over the lexer's token stream. The reader is
//! the only mutable state of the build phase: builders consume tokens
//! through it exactly once, left to right. `&mut` receivers make the
//! single-driver rule a compile-time guarantee.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexer::tokens::{Token, TokenKind};
use super::registry::CommandRegistry;
use super::ParseError;
use crate::runtime::{Action, RuntimeError, Value};

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("number pattern"));

/// Whether a bare token spells a decimal number
pub fn is_number(text: &str) -> bool {
    NUMBER_RE.is_match(text)
}

/// Cursor over a finite token sequence
pub struct TokenReader {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    max_depth: usize,
    registry: Arc<CommandRegistry>,
}

impl TokenReader {
    /// Wrap a token sequence with the default block-depth limit
    pub fn new(tokens: Vec<Token>, registry: Arc<CommandRegistry>) -> Self {
        Self::with_limits(tokens, registry, 64)
    }

    /// Wrap a token sequence with an explicit block-depth limit
    pub fn with_limits(
        tokens: Vec<Token>,
        registry: Arc<CommandRegistry>,
        max_depth: usize,
    ) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
            max_depth,
            registry,
        }
    }

    /// Current cursor offset, in tokens
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Whether all tokens have been consumed
    pub fn is_empty(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Peek the next token without consuming it
    pub fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Whether the next token is the bare word `text`
    pub fn peek_is(&self, text: &str) -> bool {
        self.peek_token().is_some_and(|t| t.is_word(text))
    }

    /// Consume and return the next token
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        let token = self
            .tokens
            .get(self.cursor)
            .cloned()
            .ok_or(ParseError::UnexpectedEof)?;
        self.cursor += 1;
        Ok(token)
    }

    /// Peek-and-consume: advance over the next token when it is a bare
    /// word contained in `expected`, leaving the cursor alone otherwise.
    pub fn expect_any(&mut self, expected: &[&str]) -> bool {
        let matched = self
            .peek_token()
            .is_some_and(|t| t.kind == TokenKind::Word && expected.contains(&t.text.as_str()));
        if matched {
            self.cursor += 1;
        }
        matched
    }

    /// Extract one `{ ... }` unit as a bounded sub-reader.
    ///
    /// The sub-reader shares this reader's registry and counts against
    /// the block-depth limit.
    pub fn next_block(&mut self) -> Result<TokenReader, ParseError> {
        let open = self.next_token()?;
        if open.kind != TokenKind::OpenBrace {
            return Err(ParseError::token_mismatch(&["{"], Some(&open)));
        }
        if self.depth + 1 > self.max_depth {
            return Err(ParseError::BlockTooDeep {
                limit: self.max_depth,
            });
        }

        let start = self.cursor;
        let mut level = 1usize;
        while let Some(token) = self.tokens.get(self.cursor) {
            match token.kind {
                TokenKind::OpenBrace => level += 1,
                TokenKind::CloseBrace => {
                    level -= 1;
                    if level == 0 {
                        let inner = self.tokens[start..self.cursor].to_vec();
                        self.cursor += 1;
                        return Ok(TokenReader {
                            tokens: inner,
                            cursor: 0,
                            depth: self.depth + 1,
                            max_depth: self.max_depth,
                            registry: self.registry.clone(),
                        });
                    }
                }
                _ => {}
            }
            self.cursor += 1;
        }

        Err(ParseError::UnclosedBlock)
    }

    /// Parse the next action: a nested `{ ... }` sequence or a command
    /// resolved through the registry. Inline literals (`&var`, quoted
    /// strings, numbers) also stand as actions.
    pub fn parse_action(&mut self) -> Result<Action<Value>, ParseError> {
        let token = self.peek_token().ok_or(ParseError::UnexpectedEof)?.clone();

        match token.kind {
            TokenKind::OpenBrace => {
                let mut block = self.next_block()?;
                block.parse_sequence()
            }
            TokenKind::CloseBrace => Err(ParseError::token_mismatch(&["action"], Some(&token))),
            TokenKind::Quoted => {
                self.cursor += 1;
                Ok(Action::constant(Value::Str(token.text)))
            }
            TokenKind::Word => {
                if let Some(name) = token.text.strip_prefix('&') {
                    self.cursor += 1;
                    return Ok(variable_action(name.to_string()));
                }
                if is_number(&token.text) {
                    self.cursor += 1;
                    return Ok(Action::constant(number_value(&token.text)));
                }
                self.cursor += 1;
                let resolver = self
                    .registry
                    .resolve(&token.text)
                    .ok_or_else(|| ParseError::UnknownCommand(token.text.clone()))?;
                resolver(self)
            }
        }
    }

    /// Parse actions until the stream ends, chaining them in order
    pub fn parse_sequence(&mut self) -> Result<Action<Value>, ParseError> {
        let mut actions = Vec::new();
        while !self.is_empty() {
            actions.push(self.parse_action()?);
        }
        Ok(Action::sequence(actions))
    }

    /// Parse one argument-position value.
    ///
    /// Unlike [`parse_action`], a bare word here is a string literal,
    /// not a command; a `{ ... }` block is a nested action that runs in
    /// a derived child frame.
    pub fn parse_value(&mut self) -> Result<Action<Value>, ParseError> {
        let token = self.peek_token().ok_or(ParseError::UnexpectedEof)?.clone();

        match token.kind {
            TokenKind::OpenBrace => {
                let mut block = self.next_block()?;
                let inner = block.parse_sequence()?;
                Ok(scoped(inner))
            }
            TokenKind::CloseBrace => Err(ParseError::token_mismatch(&["value"], Some(&token))),
            TokenKind::Quoted => {
                self.cursor += 1;
                Ok(Action::constant(Value::Str(token.text)))
            }
            TokenKind::Word => {
                self.cursor += 1;
                if let Some(name) = token.text.strip_prefix('&') {
                    return Ok(variable_action(name.to_string()));
                }
                if is_number(&token.text) {
                    return Ok(Action::constant(number_value(&token.text)));
                }
                Ok(Action::constant(Value::Str(token.text)))
            }
        }
    }
}

/// Run `inner` in a child frame derived at call time
pub(crate) fn scoped(inner: Action<Value>) -> Action<Value> {
    Action::new(move |frame| {
        let inner = inner.clone();
        Box::pin(async move { inner.run(frame.child()).await })
    })
}

fn variable_action(name: String) -> Action<Value> {
    Action::new(move |frame| {
        let name = name.clone();
        Box::pin(async move {
            frame
                .get(&name)
                .ok_or(RuntimeError::UndefinedVariable(name))
        })
    })
}

fn number_value(text: &str) -> Value {
    if text.contains('.') {
        Value::Float(text.parse().unwrap_or(0.0))
    } else {
        text.parse::<i64>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Float(text.parse().unwrap_or(0.0)))
    }
}

//! Parse-time half of the engine
//!
//! The lexer feeds a [`TokenReader`]; command resolvers drive
//! [`Deferred`] builders over it to produce the runtime action tree.
//! Parsing a command consumes its tokens exactly once, left to right,
//! depth first; a parse error aborts the enclosing command with
//! nothing partially registered.

pub mod deferred;
pub mod lexer;
pub mod reader;
pub mod registry;

pub use deferred::{combine2, combine3, combine4, combine5, combine6, Deferred};
pub use lexer::tokens::{Token, TokenKind};
pub use lexer::LexError;
pub use reader::TokenReader;
pub use registry::{CommandRegistry, RegistryError, Resolver};

use std::sync::Arc;

use thiserror::Error;

use crate::runtime::Script;
use crate::util::config::EngineConfig;

/// Parse result
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse-time errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected one of [{expected}], found {found}")]
    TokenMismatch { expected: String, found: String },

    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),

    #[error("unknown argument \"{0}\"")]
    UnknownArgument(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unbalanced block: missing closing brace")]
    UnclosedBlock,

    #[error("nested blocks exceed depth limit {limit}")]
    BlockTooDeep { limit: usize },

    #[error("builder reused after a failed build")]
    SpentBuilder,

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    /// A token gate failed: records the expected set and what was
    /// actually there.
    pub fn token_mismatch(expected: &[&str], found: Option<&Token>) -> Self {
        Self::TokenMismatch {
            expected: expected.join(", "),
            found: found
                .map(|token| token.to_string())
                .unwrap_or_else(|| "end of input".to_string()),
        }
    }
}

/// Script compiler: lexes source and resolves commands into a
/// reusable [`Script`].
pub struct ScriptCompiler {
    registry: Arc<CommandRegistry>,
    max_block_depth: usize,
}

impl ScriptCompiler {
    /// Compiler with the built-in command set
    pub fn new() -> Self {
        Self::with_registry(crate::actions::standard_registry())
    }

    /// Compiler over a caller-assembled registry
    pub fn with_registry(registry: CommandRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            max_block_depth: 64,
        }
    }

    /// Apply engine configuration
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.max_block_depth = config.limits.max_block_depth;
        self
    }

    /// The registry commands resolve through
    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Compile source into a script
    pub fn compile(&self, source: &str) -> ParseResult<Script> {
        let tokens = lexer::tokenize(source)?;
        let mut reader =
            TokenReader::with_limits(tokens, self.registry.clone(), self.max_block_depth);
        let body = reader.parse_sequence()?;
        Ok(Script::new(body))
    }
}

impl Default for ScriptCompiler {
    fn default() -> Self {
        Self::new()
    }
}

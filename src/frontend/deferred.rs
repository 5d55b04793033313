//! Deferred builders - the parse-time combinator engine
//!
//! A [`Deferred`] is the build-time half of the two-phase model: a
//! single-use wrapper that, driven once over a [`TokenReader`],
//! produces exactly one [`Action`]. The result is memoized, so a
//! builder wired into several combinators still parses its tokens
//! once. Composition happens through [`Deferred::map`],
//! [`Deferred::optional`], and the `combine*` family; none of them
//! re-parse.

use std::sync::Arc;

use smallvec::SmallVec;

use super::reader::TokenReader;
use super::ParseError;
use crate::runtime::{Action, Frame, RuntimeError, Value};

/// Token sets used for trim/expect gates; nearly always one or two
type TokenSet = SmallVec<[&'static str; 2]>;

type BuildFn<T> = Box<dyn FnOnce(&mut TokenReader) -> Result<Action<T>, ParseError> + Send>;

/// Single-use, parse-time builder producing one [`Action`]
pub struct Deferred<T> {
    trim: TokenSet,
    expect: TokenSet,
    build: Option<BuildFn<T>>,
    built: Option<Action<T>>,
}

impl<T: Send + 'static> Deferred<T> {
    /// Wrap a build function
    pub fn new<F>(build: F) -> Self
    where
        F: FnOnce(&mut TokenReader) -> Result<Action<T>, ParseError> + Send + 'static,
    {
        Self {
            trim: TokenSet::new(),
            expect: TokenSet::new(),
            build: Some(Box::new(build)),
            built: None,
        }
    }

    /// A builder whose action always resolves to `value`.
    ///
    /// Consumes no tokens.
    pub fn literal(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self::new(move |_reader| Ok(Action::constant(value)))
    }

    /// Consume tokens synchronously at build time and capture the
    /// result as a resolved constant action.
    pub fn from_reader<F>(f: F) -> Self
    where
        T: Clone + Sync,
        F: FnOnce(&mut TokenReader) -> Result<T, ParseError> + Send + 'static,
    {
        Self::new(move |reader| Ok(Action::constant(f(reader)?)))
    }

    /// Parse a full nested action at build time.
    ///
    /// At run time the nested action runs in a child frame derived
    /// from the caller's; `adapt` converts its value to `T`.
    pub fn nested<F>(adapt: F) -> Self
    where
        F: Fn(Value) -> Result<T, RuntimeError> + Send + Sync + 'static,
    {
        Self::new(move |reader| {
            let inner = reader.parse_action()?;
            let adapt = Arc::new(adapt);
            Ok(Action::new(move |frame| {
                let inner = inner.clone();
                let adapt = adapt.clone();
                Box::pin(async move {
                    let value = inner.run(frame.child()).await?;
                    adapt(value)
                })
            }))
        })
    }

    /// Tokens to consume unconditionally before building.
    ///
    /// A missing trim token is a fatal [`ParseError::TokenMismatch`].
    pub fn trim(mut self, tokens: &[&'static str]) -> Self {
        self.trim = TokenSet::from_slice(tokens);
        self
    }

    /// Tokens the next token must match before building.
    ///
    /// On mismatch the build fails without consuming anything.
    pub fn expect(mut self, tokens: &[&'static str]) -> Self {
        self.expect = TokenSet::from_slice(tokens);
        self
    }

    /// Drive this builder over the reader, producing its action.
    ///
    /// Building is idempotent: the first call consumes tokens and runs
    /// the build function; every later call returns the same action
    /// without touching the reader.
    pub fn build(&mut self, reader: &mut TokenReader) -> Result<Action<T>, ParseError> {
        if let Some(action) = &self.built {
            return Ok(action.clone());
        }
        if !self.trim.is_empty() && !reader.expect_any(&self.trim) {
            return Err(ParseError::token_mismatch(&self.trim, reader.peek_token()));
        }
        if !self.expect.is_empty() && !reader.expect_any(&self.expect) {
            return Err(ParseError::token_mismatch(&self.expect, reader.peek_token()));
        }
        let build = self.build.take().ok_or(ParseError::SpentBuilder)?;
        let action = build(reader)?;
        self.built = Some(action.clone());
        Ok(action)
    }

    /// Transform the built value on success.
    ///
    /// On failure the error propagates unchanged and `f` never runs.
    pub fn map<R, F>(self, f: F) -> Deferred<R>
    where
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Deferred::new(move |reader| {
            let mut this = self;
            let action = this.build(reader)?;
            let f = Arc::new(f);
            Ok(Action::new(move |frame| {
                let action = action.clone();
                let f = f.clone();
                Box::pin(async move { action.run(frame).await.map(|value| f(value)) })
            }))
        })
    }

    /// Like [`Deferred::map`], but fallible and frame-aware.
    ///
    /// Used for coercions that consult the frame's host. Keeps the
    /// fail-fast contract: an upstream failure skips `f` entirely.
    pub fn adapt<R, F>(self, f: F) -> Deferred<R>
    where
        R: Send + 'static,
        F: Fn(&Frame, T) -> Result<R, RuntimeError> + Send + Sync + 'static,
    {
        Deferred::new(move |reader| {
            let mut this = self;
            let action = this.build(reader)?;
            let f = Arc::new(f);
            Ok(Action::new(move |frame| {
                let action = action.clone();
                let f = f.clone();
                Box::pin(async move {
                    let value = action.run(frame.clone()).await?;
                    f(&frame, value)
                })
            }))
        })
    }

    /// Build conditionally on a match set.
    ///
    /// With an empty set the wrapped builder always builds and runs,
    /// its value wrapped in `Some`. With a non-empty set the builder
    /// is built only when the next token is a member (consuming the
    /// matched token); otherwise the action resolves to `None` and the
    /// wrapped builder is never built nor run.
    pub fn optional(self, match_set: &'static [&'static str]) -> Deferred<Option<T>> {
        if match_set.is_empty() {
            return self.map(Some);
        }
        Deferred::new(move |reader| {
            if reader.expect_any(match_set) {
                let mut this = self;
                let action = this.build(reader)?;
                Ok(Action::new(move |frame| {
                    let action = action.clone();
                    Box::pin(async move { action.run(frame).await.map(Some) })
                }))
            } else {
                Ok(Action::new(|_frame| Box::pin(async { Ok(None) })))
            }
        })
    }

    /// [`Deferred::optional`] with a caller-supplied default.
    ///
    /// With an empty match set this is the identity.
    pub fn optional_or(self, match_set: &'static [&'static str], default: T) -> Deferred<T>
    where
        T: Clone + Sync,
    {
        if match_set.is_empty() {
            return self;
        }
        Deferred::new(move |reader| {
            let mut this = self;
            if reader.expect_any(match_set) {
                this.build(reader)
            } else {
                Ok(Action::constant(default))
            }
        })
    }
}

macro_rules! impl_combine {
    ($name:ident => $($arg:ident : $ty:ident),+) => {
        /// Merge child builders into one.
        ///
        /// Every child builds at build time, left to right. At run
        /// time the child futures are evaluated strictly sequentially
        /// on the same frame: a child does not start until its left
        /// neighbor resolved successfully, and the first failure
        /// aborts the chain before later children start.
        pub fn $name<$($ty,)* R, F>($($arg: Deferred<$ty>,)* f: F) -> Deferred<R>
        where
            $($ty: Send + 'static,)*
            R: Send + 'static,
            F: Fn($($ty),*) -> Result<R, RuntimeError> + Send + Sync + 'static,
        {
            Deferred::new(move |reader| {
                $(
                    let mut $arg = $arg;
                    let $arg = $arg.build(reader)?;
                )*
                let f = Arc::new(f);
                Ok(Action::new(move |frame| {
                    $(let $arg = $arg.clone();)*
                    let f = f.clone();
                    let frame = frame.clone();
                    Box::pin(async move {
                        $(let $arg = $arg.run(frame.clone()).await?;)*
                        f($($arg),*)
                    })
                }))
            })
        }
    };
}

impl_combine!(combine2 => a: A, b: B);
impl_combine!(combine3 => a: A, b: B, c: C);
impl_combine!(combine4 => a: A, b: B, c: C, d: D);
impl_combine!(combine5 => a: A, b: B, c: C, d: D, e: E);
impl_combine!(combine6 => a: A, b: B, c: C, d: D, e: E, f_: F2);

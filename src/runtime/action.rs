//! Built action nodes
//!
//! An [`Action`] is the run-time half of the two-phase engine: an
//! immutable computation produced once at parse time and invoked any
//! number of times against a [`Frame`]. Invoking it returns a future
//! immediately; the caller decides when (or whether) to await it.

use std::sync::Arc;

use futures::future::BoxFuture;

use super::frame::Frame;
use super::RuntimeError;
use crate::runtime::value::Value;

/// Future yielded by running an action
pub type ActionFuture<T> = BoxFuture<'static, Result<T, RuntimeError>>;

/// A built, reusable computation from frame to future result.
///
/// Actions hold no reference to the token reader they were parsed
/// from; they may close over child actions captured at build time.
/// Cloning is cheap and preserves identity (see [`Action::ptr_eq`]).
pub struct Action<T> {
    run: Arc<dyn Fn(Frame) -> ActionFuture<T> + Send + Sync>,
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            run: self.run.clone(),
        }
    }
}

impl<T: Send + 'static> Action<T> {
    /// Wrap a run function into an action
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(Frame) -> ActionFuture<T> + Send + Sync + 'static,
    {
        Self { run: Arc::new(run) }
    }

    /// An action resolving immediately to `value` under any frame
    pub fn constant(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Action::new(move |_frame| {
            let value = value.clone();
            Box::pin(async move { Ok(value) })
        })
    }

    /// Run this action against a frame, yielding a future
    pub fn run(&self, frame: Frame) -> ActionFuture<T> {
        (self.run)(frame)
    }

    /// Whether two handles refer to the same built action
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.run, &b.run)
    }
}

impl Action<Value> {
    /// Chain actions into one that runs them in order and resolves to
    /// the last value, or `Unit` when the sequence is empty.
    pub fn sequence(actions: Vec<Action<Value>>) -> Action<Value> {
        if actions.len() == 1 {
            return actions.into_iter().next().unwrap_or_else(|| Action::constant(Value::Unit));
        }
        let actions: Arc<[Action<Value>]> = actions.into();
        Action::new(move |frame| {
            let actions = actions.clone();
            Box::pin(async move {
                let mut last = Value::Unit;
                for action in actions.iter() {
                    last = action.run(frame.clone()).await?;
                }
                Ok(last)
            })
        })
    }
}

impl<T> std::fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

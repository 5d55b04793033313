//! Runtime half of the engine
//!
//! Built actions, execution frames, script values, and the host
//! bridge. Everything here is reusable: a compiled script may be run
//! any number of times, concurrently, against independent frames.

pub mod action;
pub mod frame;
pub mod host;
pub mod value;

pub use action::{Action, ActionFuture};
pub use frame::Frame;
pub use host::{Host, SimHost};
pub use value::{Color, EntityId, ItemStack, Location, Player, Value, Vector};

use thiserror::Error;

/// Runtime result
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Runtime errors
///
/// A runtime error fails only the future of the affected action
/// subtree; siblings that already resolved keep their values, and
/// siblings not yet started inside a `combine` never start.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("no conversion to {kind} from \"{value}\"")]
    ConversionFailure { kind: &'static str, value: String },

    #[error("undefined variable \"{0}\"")]
    UndefinedVariable(String),
}

impl RuntimeError {
    /// A required coercion found no matching rule
    pub fn no_conversion(kind: &'static str, value: &Value) -> Self {
        Self::ConversionFailure {
            kind,
            value: value.to_string(),
        }
    }
}

/// A compiled script: a reusable action tree
#[derive(Debug)]
pub struct Script {
    body: Action<Value>,
}

impl Script {
    /// Wrap a built action body
    pub fn new(body: Action<Value>) -> Self {
        Self { body }
    }

    /// Run the script against a frame, resolving to its last value
    pub fn run(&self, frame: &Frame) -> ActionFuture<Value> {
        frame.run(&self.body)
    }

    /// The script body as an action
    pub fn body(&self) -> &Action<Value> {
        &self.body
    }
}

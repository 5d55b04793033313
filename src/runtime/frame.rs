//! Execution frames
//!
//! A [`Frame`] is the runtime context an action runs against: a
//! variable table plus the host bridge. Frames are cheap handles;
//! every child of one `combine`/`map` chain observes the same frame.
//! Deriving a child frame opens a nested scope that reads through to
//! its parent but keeps writes local.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::action::{Action, ActionFuture};
use super::host::Host;
use super::value::Value;

/// Runtime context handle
#[derive(Clone)]
pub struct Frame {
    inner: Arc<FrameInner>,
}

struct FrameInner {
    vars: Mutex<HashMap<String, Value>>,
    parent: Option<Frame>,
    host: Arc<dyn Host>,
}

impl Frame {
    /// Create a root frame bound to a host
    pub fn root(host: Arc<dyn Host>) -> Self {
        Self {
            inner: Arc::new(FrameInner {
                vars: Mutex::new(HashMap::new()),
                parent: None,
                host,
            }),
        }
    }

    /// Derive a child frame scoped to a nested action.
    ///
    /// The child resolves variables through its parent chain; writes
    /// stay in the child scope.
    pub fn child(&self) -> Self {
        Self {
            inner: Arc::new(FrameInner {
                vars: Mutex::new(HashMap::new()),
                parent: Some(self.clone()),
                host: self.inner.host.clone(),
            }),
        }
    }

    /// Look up a variable, walking the parent chain
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.inner.vars.lock().get(name) {
            return Some(value.clone());
        }
        self.inner.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Bind a variable in this scope
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.inner.vars.lock().insert(name.into(), value);
    }

    /// The host bridge this frame runs against
    pub fn host(&self) -> &Arc<dyn Host> {
        &self.inner.host
    }

    /// Run an action against this frame
    pub fn run<T: Send + 'static>(&self, action: &Action<T>) -> ActionFuture<T> {
        action.run(self.clone())
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("vars", &self.inner.vars.lock().len())
            .field("nested", &self.inner.parent.is_some())
            .finish()
    }
}

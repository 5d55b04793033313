//! Zhuque Action Script Engine
//!
//! An embeddable command DSL: scripts compile once into trees of
//! lazily-built action nodes and run any number of times against a
//! host-backed frame, yielding futures.
//!
//! # Example
//!
//! ```zhuque
//! set home to world,10,10,10
//! loc div &home with world,2,2,2,2,2
//! ```

#![doc(html_root_url = "https://docs.rs/zhuque")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod actions;
pub mod frontend;
pub mod runtime;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

pub use frontend::{CommandRegistry, Deferred, ParseError, ScriptCompiler, TokenReader};
pub use runtime::{Action, Frame, Host, RuntimeError, Script, SimHost, Value};

use std::sync::Arc;

use tracing::debug;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name
pub const NAME: &str = "Zhuque (朱雀)";

/// Compile and run a script against a host, resolving to the last
/// action's value.
///
/// # Example
///
/// ```no_run
/// use zhuque::{eval, Result, SimHost};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let value = eval("vec 1 2 3", SimHost::shared()).await?;
///     println!("{value}");
///     Ok(())
/// }
/// ```
pub async fn eval(source: &str, host: Arc<dyn Host>) -> Result<Value> {
    debug!("compiling script ({} bytes)", source.len());
    let compiler = ScriptCompiler::new();
    let script = compiler
        .compile(source)
        .context("Failed to compile script")?;
    let frame = Frame::root(host);
    debug!("running script");
    let value = script.run(&frame).await?;
    Ok(value)
}

use std::path::Path;

/// Compile and run a script file
pub async fn eval_file(path: &Path, host: Arc<dyn Host>) -> Result<Value> {
    let source = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    debug!("loaded {}", path.display());
    eval(&source, host).await
}

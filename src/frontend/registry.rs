//! Command registry
//!
//! Maps canonical command names and their aliases to resolver
//! functions. Registration is explicit and happens at startup; there
//! is no implicit resolver discovery.

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use super::reader::TokenReader;
use super::ParseError;
use crate::runtime::{Action, Value};

/// A command resolver: parses the command's arguments and produces
/// its built action.
pub type Resolver = Arc<dyn Fn(&mut TokenReader) -> Result<Action<Value>, ParseError> + Send + Sync>;

/// Registration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command \"{0}\" is already registered")]
    Duplicate(String),
}

/// Name-and-aliases to resolver mapping, in registration order
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: IndexMap<String, Resolver>,
}

impl CommandRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver under a canonical name plus aliases.
    ///
    /// Every name must be unused; on conflict nothing is registered.
    pub fn register<F>(&mut self, names: &[&str], resolver: F) -> Result<(), RegistryError>
    where
        F: Fn(&mut TokenReader) -> Result<Action<Value>, ParseError> + Send + Sync + 'static,
    {
        for name in names {
            if self.commands.contains_key(*name) {
                return Err(RegistryError::Duplicate(name.to_string()));
            }
        }
        let resolver: Resolver = Arc::new(resolver);
        for name in names {
            self.commands.insert(name.to_string(), resolver.clone());
        }
        Ok(())
    }

    /// Registration path for the built-in command set; name conflicts
    /// among built-ins are a programming error.
    pub(crate) fn insert<F>(&mut self, names: &[&str], resolver: F)
    where
        F: Fn(&mut TokenReader) -> Result<Action<Value>, ParseError> + Send + Sync + 'static,
    {
        debug_assert!(
            names.iter().all(|name| !self.commands.contains_key(*name)),
            "built-in command name collision"
        );
        let resolver: Resolver = Arc::new(resolver);
        for name in names {
            self.commands.insert(name.to_string(), resolver.clone());
        }
    }

    /// Look up a resolver by name or alias
    pub fn resolve(&self, name: &str) -> Option<Resolver> {
        self.commands.get(name).cloned()
    }

    /// All registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(|name| name.as_str())
    }

    /// Number of registered names (aliases included)
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(names: &[&str], registry: &mut CommandRegistry) -> Result<(), RegistryError> {
        registry.register(names, |_reader| Ok(Action::constant(Value::Unit)))
    }

    #[test]
    fn test_register_and_resolve_alias() {
        let mut registry = CommandRegistry::new();
        noop(&["loc", "location"], &mut registry).unwrap();
        assert!(registry.resolve("loc").is_some());
        assert!(registry.resolve("location").is_some());
        assert!(registry.resolve("vector").is_none());
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut registry = CommandRegistry::new();
        noop(&["loc"], &mut registry).unwrap();
        let err = noop(&["location", "loc"], &mut registry).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("loc".to_string()));
        // the conflicting registration left nothing behind
        assert!(registry.resolve("location").is_none());
    }
}

//! Core commands: literals, variables, output
//!
//! ```text
//! literal <token>
//! set <name> to <value>
//! get <name>
//! print <value>
//! vec <x> <y> <z>
//! ```

use super::args;
use crate::frontend::{combine3, CommandRegistry, Deferred, ParseError, TokenReader};
use crate::runtime::{Action, RuntimeError, Value, Vector};

pub(crate) fn register(registry: &mut CommandRegistry) {
    registry.insert(&["literal", "lit"], resolve_literal);
    registry.insert(&["set"], resolve_set);
    registry.insert(&["get"], resolve_get);
    registry.insert(&["print", "log"], resolve_print);
    registry.insert(&["vec", "vector"], resolve_vec);
}

/// `literal <token>` - the next token, verbatim, as a string value
fn resolve_literal(reader: &mut TokenReader) -> Result<Action<Value>, ParseError> {
    args::built(
        Deferred::from_reader(|r| r.next_token().map(|t| t.text)).map(Value::Str),
        reader,
    )
}

/// `set <name> to <value>` - bind a variable in the current scope
fn resolve_set(reader: &mut TokenReader) -> Result<Action<Value>, ParseError> {
    let name = reader.next_token()?.text;
    let value = args::built(args::value().trim(&["to"]), reader)?;

    Ok(Action::new(move |frame| {
        let name = name.clone();
        let value = value.clone();
        Box::pin(async move {
            let resolved = value.run(frame.clone()).await?;
            frame.set(name, resolved);
            Ok(Value::Unit)
        })
    }))
}

/// `get <name>` - read a variable, failing when unbound
fn resolve_get(reader: &mut TokenReader) -> Result<Action<Value>, ParseError> {
    let name = reader.next_token()?.text;

    Ok(Action::new(move |frame| {
        let name = name.clone();
        Box::pin(async move {
            frame
                .get(&name)
                .ok_or(RuntimeError::UndefinedVariable(name))
        })
    }))
}

/// `print <value>` - log the value's string form
fn resolve_print(reader: &mut TokenReader) -> Result<Action<Value>, ParseError> {
    let message = args::built(args::string_list(), reader)?;

    Ok(Action::new(move |frame| {
        let message = message.clone();
        Box::pin(async move {
            let lines = message.run(frame).await?;
            for line in &lines {
                tracing::info!("{}", line);
            }
            Ok(Value::Unit)
        })
    }))
}

/// `vec <x> <y> <z>` - assemble a vector from three numbers
fn resolve_vec(reader: &mut TokenReader) -> Result<Action<Value>, ParseError> {
    args::built(
        combine3(args::double(), args::double(), args::double(), |x, y, z| {
            Ok(Value::Vector(Vector::new(x, y, z)))
        }),
        reader,
    )
}

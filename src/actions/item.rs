//! Item commands
//!
//! ```text
//! item modify <source> [-material <id>] [-amount <n>] [-durability <n>]
//!                      [-name <text>] [-model <n>]
//! ```
//!
//! Options are parsed in a flag loop, any order, each one at most
//! once per occurrence in the source text; an unsupported flag is an
//! `UnknownArgument` parse error. Present options apply to the source
//! item in the order written.

use std::sync::Arc;

use super::args;
use crate::frontend::{CommandRegistry, ParseError, TokenKind, TokenReader};
use crate::runtime::{Action, Value};

pub(crate) fn register(registry: &mut CommandRegistry) {
    registry.insert(&["item"], resolve);
}

fn resolve(reader: &mut TokenReader) -> Result<Action<Value>, ParseError> {
    let op = reader.next_token()?;
    match op.text.as_str() {
        "modify" | "set" => resolve_modify(reader),
        other => Err(ParseError::UnknownCommand(format!("item {other}"))),
    }
}

enum ItemOption {
    Material(Action<String>),
    Amount(Action<i64>),
    Durability(Action<i64>),
    Name(Action<String>),
    Model(Action<i64>),
}

fn resolve_modify(reader: &mut TokenReader) -> Result<Action<Value>, ParseError> {
    let source = args::built(args::item(), reader)?;

    let mut options = Vec::new();
    while reader
        .peek_token()
        .is_some_and(|t| t.kind == TokenKind::Word && t.text.starts_with('-'))
    {
        let flag = reader.next_token()?;
        match flag.text.trim_start_matches('-') {
            "material" | "mat" | "type" => {
                options.push(ItemOption::Material(args::built(args::text(), reader)?));
            }
            "amount" | "amt" | "a" => {
                options.push(ItemOption::Amount(args::built(args::int(), reader)?));
            }
            "durability" | "dura" => {
                options.push(ItemOption::Durability(args::built(args::int(), reader)?));
            }
            "name" | "n" => {
                options.push(ItemOption::Name(args::built(args::text(), reader)?));
            }
            "model" => {
                options.push(ItemOption::Model(args::built(args::int(), reader)?));
            }
            other => return Err(ParseError::UnknownArgument(other.to_string())),
        }
    }

    let options = Arc::new(options);
    Ok(Action::new(move |frame| {
        let source = source.clone();
        let options = options.clone();
        Box::pin(async move {
            let mut item = source.run(frame.clone()).await?;

            for option in options.iter() {
                match option {
                    ItemOption::Material(action) => {
                        let name = action.run(frame.clone()).await?;
                        // an unrecognized material id leaves the type alone
                        if let Some(material) = frame.host().material(&name) {
                            item.material = material;
                        }
                    }
                    ItemOption::Amount(action) => {
                        item.amount = action.run(frame.clone()).await? as i32;
                    }
                    ItemOption::Durability(action) => {
                        item.durability = action.run(frame.clone()).await? as i32;
                    }
                    ItemOption::Name(action) => {
                        item.display_name = Some(action.run(frame.clone()).await?);
                    }
                    ItemOption::Model(action) => {
                        item.model = Some(action.run(frame.clone()).await? as i32);
                    }
                }
            }

            Ok(Value::Item(item))
        })
    }))
}

//! 内置命令库
//!
//! 将引擎自带的命令注册到命令注册表。每个命令对应一个解析函数，
//! 按 canonical 名称加别名显式注册。

pub mod args;

mod basic;
mod item;
mod location;

use crate::frontend::CommandRegistry;

/// Registry preloaded with the built-in command set
pub fn standard_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    basic::register(&mut registry);
    location::register(&mut registry);
    item::register(&mut registry);
    registry
}

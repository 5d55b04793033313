#[path = "integration/commands.rs"]
mod commands;
#[path = "integration/engine.rs"]
mod engine;

//! Zhuque Action Script Engine - CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use zhuque::runtime::Location;
use zhuque::util::config::EngineConfig;
use zhuque::util::logger::{self, LogLevel};
use zhuque::{Frame, ScriptCompiler, SimHost, Value, NAME, VERSION};

/// An embeddable command DSL with lazily-built, asynchronously-evaluated action trees
#[derive(Parser, Debug)]
#[command(name = "zhuque")]
#[command(author = "YaoXiang Team")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a Zhuque script file
    Run {
        /// Script file to run
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Evaluate a script from the command line
    Eval {
        /// Script to evaluate
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Interactive read-eval-print loop
    Repl,

    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = EngineConfig::load().context("Failed to load zhuque.toml")?;

    if args.verbose {
        logger::init_debug();
    } else {
        let level = config.log.level.parse().unwrap_or(LogLevel::Info);
        logger::init_with_level(level);
    }

    match args.command {
        Commands::Run { file } => {
            let value = zhuque::eval_file(&file, sim_host())
                .await
                .with_context(|| format!("Failed to run: {}", file.display()))?;
            if !matches!(value, Value::Unit) {
                println!("{value}");
            }
        }
        Commands::Eval { code } => {
            let value = zhuque::eval(&code, sim_host())
                .await
                .context("Failed to evaluate script")?;
            if !matches!(value, Value::Unit) {
                println!("{value}");
            }
        }
        Commands::Repl => {
            repl(&config).await?;
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(())
}

/// Simulation host with a small demo world
fn sim_host() -> Arc<SimHost> {
    let host = SimHost::new();
    host.add_player("Steve", Location::new("world", 0.0, 64.0, 0.0));
    Arc::new(host)
}

async fn repl(config: &EngineConfig) -> Result<()> {
    use rustyline::error::ReadlineError;

    println!("{NAME} {VERSION} REPL");
    println!("Type a command, or \"exit\" to quit.");

    let compiler = ScriptCompiler::new().with_config(config);
    // one frame for the whole session, so `set` bindings persist
    let frame = Frame::root(sim_host());

    let mut editor = rustyline::DefaultEditor::new()?;
    let history = config
        .repl
        .history_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(".zhuque_history"));
    if config.repl.history {
        let _ = editor.load_history(&history);
    }

    loop {
        match editor.readline("zhuque> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                if config.repl.history {
                    let _ = editor.add_history_entry(line);
                }
                match compiler.compile(line) {
                    Ok(script) => match script.run(&frame).await {
                        Ok(Value::Unit) => {}
                        Ok(value) => println!("{value}"),
                        Err(err) => eprintln!("runtime error: {err}"),
                    },
                    Err(err) => eprintln!("parse error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if config.repl.history {
        let _ = editor.save_history(&history);
    }

    Ok(())
}

//! Engine-level integration tests: compilation, reuse, scoping,
//! error propagation, configuration.

use zhuque::util::config::EngineConfig;
use zhuque::{Frame, ParseError, RuntimeError, Script, ScriptCompiler, SimHost, Value};

fn compile(source: &str) -> Script {
    ScriptCompiler::new().compile(source).unwrap()
}

async fn run(source: &str) -> Result<Value, RuntimeError> {
    let frame = Frame::root(SimHost::shared());
    compile(source).run(&frame).await
}

#[tokio::test]
async fn empty_script_resolves_to_unit() {
    assert_eq!(run("").await.unwrap(), Value::Unit);
}

#[tokio::test]
async fn sequence_resolves_to_last_value() {
    assert_eq!(run("set x to 5 get x").await.unwrap(), Value::Int(5));
}

#[tokio::test]
async fn compiled_script_is_reusable_across_frames() {
    let script = compile("set n to 1 get n");

    let first = Frame::root(SimHost::shared());
    let second = Frame::root(SimHost::shared());
    assert_eq!(script.run(&first).await.unwrap(), Value::Int(1));
    assert_eq!(script.run(&second).await.unwrap(), Value::Int(1));
    // frames stay independent
    assert_eq!(first.get("n"), Some(Value::Int(1)));
    assert_eq!(second.get("n"), Some(Value::Int(1)));
}

#[tokio::test]
async fn nested_block_writes_stay_in_child_scope() {
    let frame = Frame::root(SimHost::shared());
    let script = compile("set x to 1 set y to { set x to 9 get x } get x");
    assert_eq!(script.run(&frame).await.unwrap(), Value::Int(1));
    // the block's value came from the child binding
    assert_eq!(frame.get("y"), Some(Value::Int(9)));
    assert_eq!(frame.get("x"), Some(Value::Int(1)));
}

#[tokio::test]
async fn variable_reference_reads_enclosing_scope() {
    assert_eq!(
        run("set greeting to hello set echoed to { get greeting } get echoed")
            .await
            .unwrap(),
        Value::Str("hello".into())
    );
}

#[test]
fn unknown_command_fails_compilation() {
    let err = ScriptCompiler::new().compile("frobnicate 1 2").unwrap_err();
    assert!(matches!(err, ParseError::UnknownCommand(name) if name == "frobnicate"));
}

#[test]
fn unclosed_block_fails_compilation() {
    let err = ScriptCompiler::new().compile("set x to { literal a").unwrap_err();
    assert!(matches!(err, ParseError::UnclosedBlock));
}

#[test]
fn block_depth_limit_is_enforced() {
    let mut config = EngineConfig::default();
    config.limits.max_block_depth = 2;
    let compiler = ScriptCompiler::new().with_config(&config);
    let err = compiler.compile("{ { { literal a } } }").unwrap_err();
    assert!(matches!(err, ParseError::BlockTooDeep { limit: 2 }));
}

#[tokio::test]
async fn undefined_variable_fails_at_runtime_only() {
    // compiles fine; the failure is the future's
    let script = compile("get missing");
    let frame = Frame::root(SimHost::shared());
    let err = script.run(&frame).await.unwrap_err();
    assert_eq!(err, RuntimeError::UndefinedVariable("missing".into()));
}

#[tokio::test]
async fn conversion_failure_names_the_kind() {
    let err = run("loc div notalocation 2 2 2").await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::ConversionFailure { kind: "location", .. }
    ));
}

#[tokio::test]
async fn eval_helper_runs_end_to_end() {
    let value = zhuque::eval("loc div world,10,10,10 with world,2,2,2,2,2", SimHost::shared())
        .await
        .unwrap();
    assert_eq!(
        value,
        Value::Location(zhuque::runtime::Location::new("world", 5.0, 5.0, 5.0))
    );
}

#[test]
fn config_defaults_when_file_missing() {
    let config = EngineConfig::load_from(std::path::Path::new("no/such/zhuque.toml")).unwrap();
    assert_eq!(config.log.level, "info");
    assert_eq!(config.limits.max_block_depth, 64);
    assert!(config.repl.history);
}

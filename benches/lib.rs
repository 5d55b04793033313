//! # Zhuque 性能基准测试
//!
//! 使用 Criterion.rs 进行性能基准测试。
//!
//! ## 基准测试分组
//! - `compile`: 脚本编译（分词 + 命令解析）
//! - `execute`: 已编译脚本的运行时开销
//!
//! ## 使用方法
//! ```bash
//! cargo bench          # 运行所有
//! cargo bench compile  # 只运行编译基准
//! ```

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use zhuque::{Frame, ScriptCompiler, SimHost};

const DIVIDE_SCRIPT: &str = "loc div world,10,10,10 with world,2,2,2,2,2";
const SEQUENCE_SCRIPT: &str = "set a to 1 set b to { vec 1 2 3 } get b";

// ============================================================================
// Compile Benchmarks - 编译阶段
// ============================================================================

fn bench_compile_divide(c: &mut Criterion) {
    let compiler = ScriptCompiler::new();
    c.bench_function("compile_loc_divide", |b| {
        b.iter(|| compiler.compile(black_box(DIVIDE_SCRIPT)).unwrap())
    });
}

fn bench_compile_sequence(c: &mut Criterion) {
    let compiler = ScriptCompiler::new();
    c.bench_function("compile_sequence", |b| {
        b.iter(|| compiler.compile(black_box(SEQUENCE_SCRIPT)).unwrap())
    });
}

// ============================================================================
// Execute Benchmarks - 运行阶段（复用已编译脚本）
// ============================================================================

fn bench_execute_divide(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let script = ScriptCompiler::new().compile(DIVIDE_SCRIPT).unwrap();
    let frame = Frame::root(SimHost::shared());
    c.bench_function("execute_loc_divide", |b| {
        b.iter(|| rt.block_on(script.run(&frame)).unwrap())
    });
}

fn bench_execute_sequence(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let script = ScriptCompiler::new().compile(SEQUENCE_SCRIPT).unwrap();
    let frame = Frame::root(SimHost::shared());
    c.bench_function("execute_sequence", |b| {
        b.iter(|| rt.block_on(script.run(&frame)).unwrap())
    });
}

criterion_group!(compile, bench_compile_divide, bench_compile_sequence);
criterion_group!(execute, bench_execute_divide, bench_execute_sequence);
criterion_main!(compile, execute);

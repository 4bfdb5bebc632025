use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use curly_parser::parser::Parser;

fn expr(source: &str) {
    let source = source.into();
    let _ast = Parser::new(&source).parse_expr().unwrap();
}

fn program(source: &str) {
    let source = source.into();
    let _ast = Parser::new(&source).parse_program().unwrap();
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| expr(&source)));
}

fn deep_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep-nesting");

    let source = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("deep-nesting", |b| b.iter(|| expr(&source)));
}

fn many_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("many-functions");

    let mut source = String::new();
    for i in 0..200 {
        source.push_str(&format!(
            "function f{i}(a: int, b: int): int {{\n  let c: int = a * b;\n  for (let j: int = 0; j < c; j++) {{ print(j); }}\n  return c - {i};\n}}\n"
        ));
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("many-functions", |b| b.iter(|| program(&source)));
}

criterion_group!(benches, long_expr, deep_nesting, many_functions);
criterion_main!(benches);

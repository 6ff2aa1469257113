//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package usc-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use usc_lex::{Lexer, PositionMode};

const PROGRAM: &str = r#"
    import io;

    class Counter {
        private var count = 0;

        public func inc(step) {
            count += step ** 2;
            return count;
        }
    }

    func fib(n) {
        if n <= 1 {
            return n;
        }
        return fib(n - 1) + fib(n - 2);
    }

    /* block comment
       spanning lines */
    const mask = 0xFF_FF & 0b1010 | 0o17; // trailing
    var s = "tab\there";
    var c = '\n';
"#;

fn token_count(source: &str) -> usize {
    Lexer::new("bench.us", source).count()
}

fn bench_lexer_statements(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "var x = 42; func main() { var y = x + 1; return y; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_var", |b| {
        b.iter(|| token_count(black_box("var x = 42;")))
    });

    group.bench_function("function_with_body", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_program");
    group.throughput(Throughput::Bytes(PROGRAM.len() as u64));

    group.bench_function("column_only", |b| {
        b.iter(|| token_count(black_box(PROGRAM)))
    });

    group.bench_function("line_column", |b| {
        b.iter(|| {
            Lexer::new("bench.us", black_box(PROGRAM))
                .with_position_mode(PositionMode::LineColumn)
                .count()
        })
    });

    let large = PROGRAM.repeat(200);
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large_program", |b| {
        b.iter(|| token_count(black_box(&large)))
    });

    group.finish();
}

fn bench_lexer_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_literals");

    group.bench_function("integer", |b| {
        b.iter(|| token_count(black_box("var x = 1_234_567;")))
    });

    group.bench_function("float", |b| {
        b.iter(|| token_count(black_box("var x = 3.141_59;")))
    });

    group.bench_function("hex", |b| {
        b.iter(|| token_count(black_box("var x = 0xDEADBEEF;")))
    });

    group.bench_function("escaped_string", |b| {
        b.iter(|| token_count(black_box(r#"var s = "line one\nline two\t\"quoted\"";"#)))
    });

    group.finish();
}

fn bench_lexer_errors(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_errors");

    group.bench_function("illegal_bytes", |b| {
        b.iter(|| token_count(black_box("@ # $ ` @ # $ `")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_statements,
    bench_lexer_program,
    bench_lexer_literals,
    bench_lexer_errors
);
criterion_main!(benches);

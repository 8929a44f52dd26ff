//! Benchmarks comparing marklet conversion vs pulldown-cmark
//!
//! Run with: cargo bench -p marklet-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use marklet_core::lexer::tokenize;
use marklet_core::{convert, Parser};
use pulldown_cmark::{html, Options, Parser as MdParser};

/// Sample document using every construct of the dialect.
///
/// Also valid CommonMark, so both converters see the same bytes.
const SAMPLE: &str = r"# Введение

Обычный _курсив_ и __жирный__ текст. Внутри __двойного выделения
_одинарное_ тоже__ работает, а в середине сл_ов_а тоже.

- первый пункт списка
- __второй__ пункт с _курсивом_
- третий пункт

# Экранирование

Символы \_подчерка\_ и \# решётки остаются как есть.
Цифры_12_3 не выделяются, _ пробелы _ тоже.

- новый список
- ещё пункт
";

fn convert_pulldown(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    html::push_html(&mut out, MdParser::new_ext(input, Options::empty()));
    out
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    group.bench_function("marklet", |b| {
        b.iter(|| black_box(convert(black_box(SAMPLE))).len())
    });

    group.bench_function("pulldown_cmark", |b| {
        b.iter(|| black_box(convert_pulldown(black_box(SAMPLE))).len())
    });

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    group.bench_function("tokenize", |b| {
        b.iter(|| black_box(tokenize(black_box(SAMPLE))).len())
    });

    let tokens = tokenize(SAMPLE);
    group.bench_function("parse_tokens", |b| {
        b.iter(|| {
            let doc = Parser::new().parse_tokens(black_box(&tokens));
            black_box(doc.children.len())
        })
    });

    group.bench_function("parse_with_recovery", |b| {
        b.iter(|| {
            let result = Parser::new().parse_with_recovery(black_box(SAMPLE));
            black_box(result.errors.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [1, 10, 100, 1000].iter() {
        let content = SAMPLE.repeat(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("marklet", size), &content, |b, content| {
            b.iter(|| black_box(convert(black_box(content))).len())
        });

        group.bench_with_input(
            BenchmarkId::new("pulldown_cmark", size),
            &content,
            |b, content| b.iter(|| black_box(convert_pulldown(black_box(content))).len()),
        );
    }

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");

    let unclosed = "__a _b ".repeat(10_000);
    let markers = "_ ".repeat(50_000);
    let nested = format!("_x{}", "\n# y _z".repeat(10_000));

    for (name, content) in [
        ("unclosed", &unclosed),
        ("lone_markers", &markers),
        ("nested_headers", &nested),
    ] {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("marklet", name), content, |b, content| {
            b.iter(|| black_box(convert(black_box(content))).len())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_convert,
    bench_stages,
    bench_scaling,
    bench_pathological
);
criterion_main!(benches);

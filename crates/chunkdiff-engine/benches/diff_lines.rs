use std::hint::black_box;

use chunkdiff_engine::{diff_chars, diff_lines, DiffOptions};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn generate_source(functions: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for i in 0..functions {
        lines.push(format!("fn handler_{i}(input: &str) -> usize {{"));
        lines.push(format!("    let value = input.len() * {i};"));
        lines.push("    if value > 10 {".to_string());
        lines.push("        return value;".to_string());
        lines.push("    }".to_string());
        lines.push("    0".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
    }
    lines
}

// Touch every seventh function and drop every eleventh.
fn edit_source(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let function = row / 8;
        if function % 11 == 3 {
            continue;
        }
        if function % 7 == 0 && line.contains("let value") {
            out.push(line.replace("input.len()", "input.trim().len()"));
        } else {
            out.push(line.clone());
        }
    }
    out
}

fn bench_diff_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_lines");
    group.sample_size(20);

    for functions in [50, 500, 2000] {
        let old = generate_source(functions);
        let new = edit_source(&old);
        group.throughput(Throughput::Elements(old.len() as u64));

        group.bench_with_input(BenchmarkId::new("default", functions), &functions, |b, _| {
            let options = DiffOptions::default();
            b.iter(|| black_box(diff_lines(black_box(&old), black_box(&new), &options)));
        });

        group.bench_with_input(BenchmarkId::new("lines_only", functions), &functions, |b, _| {
            let options = DiffOptions::default().compute_char_changes(false);
            b.iter(|| black_box(diff_lines(black_box(&old), black_box(&new), &options)));
        });
    }

    group.finish();
}

fn bench_diff_chars(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_chars");

    let old = generate_source(20).join("\n");
    let new = edit_source(&generate_source(20)).join("\n");
    group.bench_function("paragraph", |b| {
        b.iter(|| black_box(diff_chars(black_box(&old), black_box(&new))));
    });

    group.finish();
}

criterion_group!(benches, bench_diff_lines, bench_diff_chars);
criterion_main!(benches);

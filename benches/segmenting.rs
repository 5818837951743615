//! Performance benchmarks for lensmark
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Sample README descriptions of various sizes
mod samples {
    pub const SMALL: &str = r#"<p align="center">
  <img src="https://example.org/logo.png" alt="Logo" width="200">
</p>

<h1 align="center">demo</h1>

A small package. See <a href="https://example.org/docs">the docs</a>.
"#;

    pub const TABLE: &str = r#"## Options

| Option | Default | Description |
|:-------|:-------:|------------:|
| `verbose` | `false` | Print **more** output |
| `jobs` | `4` | Worker count |
| `color` | `auto` | One of `auto`, `always`, `never` |

Trailing paragraph.
"#;

    /// A large README built from repeated HTML and table sections.
    pub fn large() -> String {
        let mut out = String::with_capacity(64 * 1024);
        for i in 0..200 {
            out.push_str(&format!("<h2>Section {i}</h2>\n<!-- section {i} -->\n"));
            out.push_str(SMALL);
            out.push_str(TABLE);
            out.push_str("<div><span>wrapped</span><br/>text</div>\n\n\n\n");
        }
        out
    }

    /// Many pipes in prose and no tables: every line is a lookahead check.
    pub fn pipe_prose() -> String {
        "| not | a | table |\nsome | text | here\n".repeat(2000)
    }
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.throughput(Throughput::Bytes(samples::SMALL.len() as u64));
    group.bench_function("small", |b| {
        b.iter(|| lensmark::normalize(black_box(samples::SMALL)))
    });

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| {
        b.iter(|| lensmark::normalize(black_box(&large)))
    });

    // Plain Markdown: every pass borrows, nothing is copied
    let plain = samples::TABLE.repeat(100);
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("no_html", |b| {
        b.iter(|| lensmark::normalize(black_box(&plain)))
    });

    group.finish();
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");

    let large = lensmark::normalize(&samples::large());
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| {
        b.iter(|| lensmark::segment(black_box(&large)))
    });

    let prose = samples::pipe_prose();
    group.throughput(Throughput::Bytes(prose.len() as u64));
    group.bench_function("pipe_prose", |b| {
        b.iter(|| lensmark::segment(black_box(&prose)))
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    group.throughput(Throughput::Bytes(samples::TABLE.len() as u64));
    group.bench_function("table", |b| {
        b.iter(|| lensmark::to_html(black_box(samples::TABLE)))
    });

    let large = samples::large();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large", |b| {
        b.iter(|| lensmark::to_html(black_box(&large)))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_segment, bench_render);
criterion_main!(benches);

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mdline::LineClassifier;

fn generate_markdown(size_kb: usize) -> String {
    let section = r#"## Section

A paragraph with enough words to wrap across a couple of physical lines, so the
classifier spends most of its time on the common path.

- Bullet item
  - Nested item
    - Deeper item
- Sibling item

1. First
2. Second

> Quoted text with a hard break  
> and a second line.

```rust
fn example() {
    let value = 42;
    println!("{value}");
}
```

    indented code

---

"#;
    let target = size_kb * 1024;
    let mut out = String::with_capacity(target + section.len());
    while out.len() < target {
        out.push_str(section);
    }
    out
}

fn bench_input_char(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_char");
    for size_kb in [1usize, 16, 128] {
        let doc = generate_markdown(size_kb);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_kb), &doc, |b, doc| {
            b.iter(|| {
                let mut classifier = LineClassifier::default();
                for ch in doc.chars() {
                    classifier.input_char(black_box(ch));
                }
                black_box(classifier.lines().len())
            })
        });
    }
    group.finish();
}

/// Single long physical lines: per-character cost must not grow with the line length.
fn bench_long_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_char/long_line");
    let cases = [
        ("paragraph", "word ".repeat(20_000)),
        ("fence_line", format!("```{}", "a".repeat(100_000))),
        ("fence_body", format!("```\n{}", "a".repeat(100_000))),
    ];
    for (name, line) in &cases {
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| {
                let mut classifier = LineClassifier::default();
                classifier.input_str(black_box(line));
                black_box(classifier.active_line().content.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_input_char, bench_long_line);
criterion_main!(benches);

#![allow(dead_code)]

use mdline::{Line, LineClassifier, LineKind, Options};

pub fn classify(text: &str) -> LineClassifier {
    classify_with(text, Options::default())
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn classify_with(text: &str, opts: Options) -> LineClassifier {
    init_logger();
    let mut c = LineClassifier::new(opts).expect("valid options");
    for ch in text.chars() {
        c.input_char(ch);
    }
    c
}

pub fn lines(text: &str) -> Vec<Line> {
    classify(text).lines().to_vec()
}

/// `(kind, indent_level, content)` for every line.
pub fn summary(text: &str) -> Vec<(LineKind, usize, String)> {
    lines(text)
        .into_iter()
        .map(|l| (l.kind, l.indent_level, l.content))
        .collect()
}

pub fn kinds(text: &str) -> Vec<LineKind> {
    lines(text).into_iter().map(|l| l.kind).collect()
}

pub fn classify_chunks(chunks: impl IntoIterator<Item = String>) -> Vec<Line> {
    let mut c = LineClassifier::default();
    for chunk in chunks {
        c.input_str(&chunk);
    }
    c.lines().to_vec()
}

pub fn chunk_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(|s| s.to_string()).collect()
}

pub fn chunk_pseudo_random(text: &str, mut seed: u32) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0usize;
    while start < text.len() {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        let want = (seed % 16 + 1) as usize; // 1..=16 bytes
        let mut end = (start + want).min(text.len());
        while end < text.len() && !text.is_char_boundary(end) {
            end += 1;
        }
        out.push(text[start..end].to_string());
        start = end;
    }
    out
}

use std::{sync::LazyLock, time::Duration};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use patlex::{Tokenizer, TokenizerBuilder};

const PATTERNS: &[(usize, &str)] = &[
    (0, r"\r\n|\r|\n"),
    (1, r"[ \t]+"),
    (2, r","),
    (3, r#""(\\.|[^"\\])*""#),
    (4, r"-?\d+(\.\d+)?"),
    (5, r"[A-Za-z_]\w*"),
];

static TOKENIZER_INPUT: LazyLock<String> = LazyLock::new(|| {
    let mut input = String::new();
    for row in 0..2_000 {
        input.push_str(&format!(
            "{}, \"name {}\", {}.{}, field_{}\r\n",
            row,
            row,
            row * 3,
            row % 10,
            row % 7
        ));
    }
    input
});

static TOKENIZER: LazyLock<Tokenizer<usize>> = LazyLock::new(|| {
    TokenizerBuilder::new()
        .add_patterns(PATTERNS)
        .build()
        .unwrap()
});

fn builder_benchmark(c: &mut Criterion) {
    c.bench_function("builder_benchmark", |b| {
        b.iter(|| {
            black_box(
                TokenizerBuilder::new()
                    .add_patterns(PATTERNS)
                    .build()
                    .unwrap(),
            );
        });
    });
}

fn tokenize_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize_benchmark", |b| {
        b.iter(|| {
            let tokens = TOKENIZER.tokenize(&TOKENIZER_INPUT).unwrap();
            black_box(tokens);
        });
    });
}

fn stepping_cursor_benchmark(c: &mut Criterion) {
    c.bench_function("stepping_cursor_benchmark", |b| {
        b.iter(|| {
            // Step through the whole input
            let cursor = TOKENIZER.create_stepping_cursor(&TOKENIZER_INPUT);
            for t in cursor {
                black_box(t);
            }
        });
    });
}

criterion_group! {
    name = benchestokenizer;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = tokenize_benchmark, stepping_cursor_benchmark
}

criterion_group! {
    name = benchesbuilder;
    config = Criterion::default();
    targets = builder_benchmark
}

criterion_main!(benchestokenizer, benchesbuilder);

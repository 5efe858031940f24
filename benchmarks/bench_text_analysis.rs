use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use stringcraft::{char_frequency, levenshtein_distance, slugify, string_similarity, to_snake_case};

const SHORT_LHS: &str = "kitten";
const SHORT_RHS: &str = "sitting";
const LONG_LHS: &str = "The quick brown fox jumps over the lazy dog near the riverbank at dawn";
const LONG_RHS: &str = "A quick brown dog jumps over the lazy fox near the riverside at dusk";

fn bench_levenshtein_short(c: &mut Criterion) {
    c.bench_function("levenshtein_short", |b| {
        b.iter(|| {
            black_box(levenshtein_distance(black_box(SHORT_LHS), black_box(SHORT_RHS)));
        });
    });
}

fn bench_levenshtein_sentence(c: &mut Criterion) {
    c.bench_function("levenshtein_sentence", |b| {
        b.iter(|| {
            black_box(levenshtein_distance(black_box(LONG_LHS), black_box(LONG_RHS)));
        });
    });
}

fn bench_levenshtein_unicode(c: &mut Criterion) {
    let lhs = "café🚀crème brûlée";
    let rhs = "cafe🚀creme brulee";
    c.bench_function("levenshtein_unicode", |b| {
        b.iter(|| {
            black_box(levenshtein_distance(black_box(lhs), black_box(rhs)));
        });
    });
}

fn bench_string_similarity(c: &mut Criterion) {
    c.bench_function("string_similarity_sentence", |b| {
        b.iter(|| {
            black_box(string_similarity(black_box(LONG_LHS), black_box(LONG_RHS)));
        });
    });
}

fn bench_char_frequency(c: &mut Criterion) {
    let text = LONG_LHS.repeat(16);
    c.bench_function("char_frequency_1k", |b| {
        b.iter(|| {
            black_box(char_frequency(black_box(&text)));
        });
    });
}

fn bench_regex_backed_transforms(c: &mut Criterion) {
    let title = "  The Grand Line: Adventures of the Straw Hat Pirates!  ";
    c.bench_function("slugify_title", |b| {
        b.iter(|| {
            black_box(slugify(black_box(title)));
        });
    });
    c.bench_function("to_snake_case_identifier", |b| {
        b.iter(|| {
            black_box(to_snake_case(black_box("parseHTTPResponseHeaders2Fast")));
        });
    });
}

criterion_group!(
    text_analysis_benches,
    bench_levenshtein_short,
    bench_levenshtein_sentence,
    bench_levenshtein_unicode,
    bench_string_similarity,
    bench_char_frequency,
    bench_regex_backed_transforms
);
criterion_main!(text_analysis_benches);

//! Benchmarks for the classify + render path that runs on every reply.
//!
//! Classification inputs mix early-table hits, late-table hits and misses.

use std::hint::black_box;
use std::time::Duration;

use astreea_chat::{render, CategoryTable, IntentClassifier};
use criterion::{criterion_group, criterion_main, Criterion};

/// Generate a realistic customer question.
///
/// Only the topic carries table keywords. It cycles through an early hit,
/// late hits and a miss that scans every category before falling back.
fn generate_question(index: usize) -> String {
    let topic = match index % 6 {
        0 => "the company behind it",
        1 => "the amber glow at night",
        2 => "an error on the display",
        3 => "charging slowly overnight",
        4 => "the Type 2 plug",
        _ => "nothing in particular",
    };
    format!(
        "Hi there, I bought the charger last spring and it has been fine until \
         this week. I wanted to ask regarding {} because my neighbour mentioned \
         it and I could not find it in the manual. Reference {}.",
        topic, index
    )
}

fn bench_classify(c: &mut Criterion) {
    let classifier = IntentClassifier::default();
    let questions: Vec<String> = (0..60).map(generate_question).collect();

    c.bench_function("classify_60_questions", |b| {
        b.iter(|| {
            for q in &questions {
                black_box(classifier.classify(black_box(q)));
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let table = CategoryTable::builtin();
    let templates: Vec<&str> = table.categories().iter().map(|c| c.template).collect();

    c.bench_function("render_all_templates", |b| {
        b.iter(|| {
            for t in &templates {
                black_box(render(black_box(t)));
            }
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(5));
    targets = bench_classify, bench_render
}
criterion_main!(benches);

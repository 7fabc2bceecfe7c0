//! Criterion benchmarks for the list pipeline: filter, sort, paginate.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use holonet_core::types::CharacterSummary;
use holonet_query::{filter, paginate, sort, CharacterField, CharacterFilter, SortOrder};

const EYES: [&str; 4] = ["blue", "brown", "yellow", "blue-gray"];

fn collection(n: usize) -> Vec<CharacterSummary> {
    (0..n)
        .map(|i| CharacterSummary {
            id: i as u64 + 1,
            name: format!("Character {i}"),
            gender: if i % 2 == 0 { "male" } else { "female" }.into(),
            birth_year: format!("{}BBY", i % 100),
            eye_color: EYES[i % EYES.len()].into(),
            hair_color: "brown".into(),
            skin_color: "fair".into(),
            height: if i % 7 == 0 { "unknown".into() } else { format!("{}", 100 + i % 120) },
            mass: format!("{},{:03}", i % 3, i % 1000),
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let items = collection(1_000);
    let mut g = c.benchmark_group("filter");
    g.throughput(Throughput::Elements(items.len() as u64));
    g.bench_function("gender_and_eye_color", |b| {
        b.iter(|| {
            black_box(filter(
                items.clone(),
                &[
                    (CharacterFilter::Gender, Some("male")),
                    (CharacterFilter::EyeColor, Some("blue")),
                ],
            ))
        });
    });
    g.finish();
}

fn bench_sort(c: &mut Criterion) {
    let items = collection(1_000);
    let mut g = c.benchmark_group("sort");
    g.throughput(Throughput::Elements(items.len() as u64));
    g.bench_function("height_desc", |b| {
        b.iter(|| black_box(sort(items.clone(), CharacterField::Height, SortOrder::Desc)));
    });
    g.bench_function("name_asc", |b| {
        b.iter(|| black_box(sort(items.clone(), CharacterField::Name, SortOrder::Asc)));
    });
    g.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let items = collection(1_000);
    let mut g = c.benchmark_group("pipeline");
    g.bench_function("filter_sort_paginate", |b| {
        b.iter(|| {
            let filtered = filter(items.clone(), &[(CharacterFilter::EyeColor, Some("blue"))]);
            let sorted = sort(filtered, CharacterField::Mass, SortOrder::Asc);
            black_box(paginate(sorted, 3, 10))
        });
    });
    g.finish();
}

criterion_group!(benches, bench_filter, bench_sort, bench_pipeline);
criterion_main!(benches);

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use deckstate::{load_from_query, load_from_string, save_to_string, Document};

/// Документ с `categories` категориями по `cards` карточек.
fn make_document(
    categories: usize,
    cards: usize,
) -> Document {
    let mut doc = Document::new();
    for i in 0..cards {
        doc.uncategorized_mut().push(format!("loose card {i}"));
    }
    for c in 0..categories {
        let category = doc
            .add_category(format!("Category {c}"))
            .expect("unique category name");
        for i in 0..cards {
            category.cards_mut().push(format!("question {c}/{i}: what is {i} + {c}?"));
        }
    }
    doc
}

/// Бенчмарк сохранения документа в строку
fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_save");
    for &(categories, cards) in &[(0, 10), (5, 20), (20, 100)] {
        let doc = make_document(categories, cards);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{categories}x{cards}")),
            &doc,
            |b, doc| b.iter(|| save_to_string(black_box(doc))),
        );
    }
    group.finish();
}

/// Бенчмарк загрузки документа из строки
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_load");
    for &(categories, cards) in &[(0, 10), (5, 20), (20, 100)] {
        let text = save_to_string(&make_document(categories, cards));
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{categories}x{cards}")),
            &text,
            |b, text| b.iter(|| load_from_string(black_box(text)).unwrap()),
        );
    }
    group.finish();
}

/// Бенчмарк разбора параметров запроса
fn bench_query(c: &mut Criterion) {
    let cards: Vec<String> = (0..50).map(|i| format!("card%20{i}")).collect();
    let query = format!(
        "cards={}&categories=A,B,C&isRandomized=1&allowCardDup=0",
        cards.join(",")
    );
    c.bench_function("query_load", |b| {
        b.iter(|| load_from_query(black_box(&query)))
    });
}

criterion_group!(benches, bench_save, bench_load, bench_query);
criterion_main!(benches);

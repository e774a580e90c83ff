//! Benchmarks for the pagination pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use resume_pager::document::ExperienceItem;
use resume_pager::{
    flatten, paginate, ContactField, Document, EditOp, Editor, LayoutConstraints, MetricOracle,
};

fn resume(jobs: usize) -> Document {
    let mut doc = Document::new();
    doc.contact.full_name = "Ada Lovelace".into();
    doc.summary = "Writes programs for engines that do not exist yet. ".repeat(4);
    doc.skills = vec!["Mathematics".into(), "Notes".into(), "Engines".into()];
    doc.experience = (0..jobs)
        .map(|i| ExperienceItem {
            role: format!("Engineer {i}"),
            company: "Analytical Engines Ltd".into(),
            start: "2019".into(),
            end: "Present".into(),
            bullets: (0..4)
                .map(|b| format!("Bullet {b} describing a result that wraps onto a second line of the page"))
                .collect(),
            ..Default::default()
        })
        .collect();
    doc
}

fn bench_flatten(c: &mut Criterion) {
    let doc = resume(20);
    c.bench_function("flatten_20_jobs", |b| {
        b.iter(|| black_box(flatten(black_box(&doc))));
    });
}

fn bench_paginate_small(c: &mut Criterion) {
    let blocks = flatten(&resume(3));
    let mut oracle = MetricOracle::new(LayoutConstraints::default());
    c.bench_function("paginate_one_page", |b| {
        b.iter(|| black_box(paginate(&blocks, &mut oracle)));
    });
}

fn bench_paginate_medium(c: &mut Criterion) {
    // ~10 pages of content
    let blocks = flatten(&resume(80));
    let mut oracle = MetricOracle::new(LayoutConstraints::default());
    c.bench_function("paginate_ten_pages", |b| {
        b.iter(|| black_box(paginate(&blocks, &mut oracle)));
    });
}

fn bench_paginate_cold(c: &mut Criterion) {
    let blocks = flatten(&resume(80));
    c.bench_function("paginate_ten_pages_cold_cache", |b| {
        b.iter(|| {
            let mut oracle = MetricOracle::new(LayoutConstraints::default());
            black_box(paginate(&blocks, &mut oracle))
        });
    });
}

fn bench_keystroke(c: &mut Criterion) {
    c.bench_function("apply_keystroke", |b| {
        let mut editor = Editor::in_memory();
        editor.import_json(&resume(20).to_json().unwrap()).unwrap();
        let mut name = String::new();
        b.iter(|| {
            if name.len() > 40 {
                name.clear();
            }
            name.push('x');
            editor
                .apply_at(EditOp::set_contact(ContactField::FullName, name.clone()), 0)
                .unwrap();
        });
    });
}

fn bench_print_html(c: &mut Criterion) {
    c.bench_function("print_html", |b| {
        let mut editor = Editor::in_memory();
        editor.import_json(&resume(40).to_json().unwrap()).unwrap();
        b.iter(|| black_box(editor.print_snapshot()));
    });
}

criterion_group!(
    benches,
    bench_flatten,
    bench_paginate_small,
    bench_paginate_medium,
    bench_paginate_cold,
    bench_keystroke,
    bench_print_html,
);
criterion_main!(benches);
